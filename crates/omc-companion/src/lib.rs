//! Companion side of the OMC tracker protocol.
//!
//! A [`Session`] ties together the two pipelines of the companion:
//!
//! - inbound: frame → [`decode_frame`](omc_protocol::decode_frame) →
//!   [`Message::parse`](omc_protocol::Message::parse) → [`Dispatcher`] →
//!   [`TelemetrySink`]
//! - outbound: [`Command`](omc_protocol::Command) → encode →
//!   [`CommandChannel`]
//!
//! The channel is usually the [`link`] to a BLE bridge, but anything
//! implementing [`CommandChannel`] can be attached.
//!
//! ```rust
//! use omc_companion::{Dispatcher, FrameOutcome, RecordingSink, Session};
//! use omc_protocol::MessageKind;
//!
//! let session = Session::new("Mount", Dispatcher::default());
//! let mut sink = RecordingSink::new();
//!
//! let outcome = session.handle_frame(br#"{"msgType":1,"ack":true}"#, &mut sink);
//! assert_eq!(outcome, FrameOutcome::Dispatched(MessageKind::Ack));
//! assert!(sink.is_empty());
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod link;
pub mod session;
pub mod sinks;
pub mod transport;

pub use config::CompanionConfig;
pub use dispatch::{DispatchOutcome, Dispatcher};
pub use error::{CliError, CliResult, ConfigError, SendError, TransportError};
pub use session::{FrameOutcome, SendHandle, Session};
pub use sinks::{LogSink, RecordingSink, SinkEvent, TelemetrySink};
pub use transport::{ChannelTransport, CommandChannel, OutboundFrame, WriteFuture};
