//! OMC Receiver Notification Protocol
//!
//! This crate provides types and utilities for talking to the OMC pet-tracker
//! receiver over its notify/write characteristic. The receiver relays the
//! harness's GNSS fix and state as small JSON objects and accepts commands in
//! the same shape.
//!
//! # Protocol Overview
//!
//! Every frame is one flat JSON object with an integer `msgType`:
//!
//! - **Telemetry** (`0`, receiver → app): position, fix time, satellites, HDOP,
//!   both batteries, followed by the receiver's ambient state (light, power
//!   mode, SNR, RSSI)
//! - **Echoes** (`1`..`5`): acknowledgement, buzzer, LED, rainbow LED and power
//!   mode. The app sends these as commands; the receiver echoes them back
//!   without any ambient state
//!
//! There is no header, length or checksum. Over BLE one notification is one
//! frame; stream bridges use [`NotificationCodec`] to split lines.
//!
//! # Example
//!
//! ```rust
//! use omc_protocol::{parse_frame, Command, LedColor, Message, Rgb};
//!
//! // Build a command
//! let frame = Command::led(LedColor::Red).encode();
//!
//! // Parse a frame
//! let message = parse_frame(&frame)?;
//! assert_eq!(message, Message::Led { color: Rgb::new(255, 0, 0) });
//! # Ok::<(), omc_protocol::ParseError>(())
//! ```

mod commands;
mod constants;
mod error;
mod frame;
mod messages;
mod types;

pub use commands::*;
pub use constants::*;
pub use error::*;
pub use frame::*;
pub use messages::*;
pub use types::*;
