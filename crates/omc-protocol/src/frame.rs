//! Frame encoding/decoding utilities.
//!
//! Over the BLE characteristic one notification is one frame, so the frame
//! layer only has to turn bytes into clean text and messages into bytes.
//! Stream bridges (TCP, serial) have no notification boundary of their own;
//! they carry one frame per line:
//!
//! ```text
//! {"msgType":0,"lat":40.1,...}\n
//! {"msgType":1,"ack":true}\n
//! ```

use bytes::{Buf, BytesMut};

use crate::constants::*;
use crate::error::ParseResult;
use crate::messages::Message;

/// Whether `c` is one of the control characters the receiver pads frames
/// with. Tab, line feed and carriage return are kept.
pub fn is_stripped_control(c: char) -> bool {
    matches!(c, '\u{00}'..='\u{08}' | '\u{0B}' | '\u{0C}' | '\u{0E}'..='\u{1F}')
}

/// Turn a raw frame into text.
///
/// Invalid UTF-8 is replaced with U+FFFD, a leading byte order mark is
/// dropped, control characters are removed and surrounding whitespace is
/// trimmed. Never fails.
pub fn decode_frame(frame: &[u8]) -> String {
    let frame = frame.strip_prefix(UTF8_BOM).unwrap_or(frame);
    let text = String::from_utf8_lossy(frame);
    let cleaned: String = text.chars().filter(|&c| !is_stripped_control(c)).collect();
    cleaned.trim().to_string()
}

/// Decode and parse a raw frame in one step.
pub fn parse_frame(frame: &[u8]) -> ParseResult<Message> {
    Message::parse(&decode_frame(frame))
}

/// Serialize a message as a single frame (compact UTF-8 JSON).
pub fn encode_message(message: &Message) -> Vec<u8> {
    message.to_text().into_bytes()
}

/// A codec that splits a byte stream into newline-terminated notifications.
#[derive(Debug, Default)]
pub struct NotificationCodec {
    /// Buffer for accumulating incoming data.
    buffer: BytesMut,
    /// Set while skipping the rest of an oversized line.
    discarding: bool,
}

impl NotificationCodec {
    /// Create a new notification codec.
    pub fn new() -> Self {
        NotificationCodec {
            buffer: BytesMut::with_capacity(MAX_NOTIFICATION_SIZE),
            discarding: false,
        }
    }

    /// Add received data to the buffer.
    pub fn push(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Try to take the next complete notification from the buffer.
    ///
    /// Returns `Some(frame)` without its terminator, or `None` if more data
    /// is needed. Empty lines are skipped. A line longer than
    /// [`MAX_NOTIFICATION_SIZE`] is dropped.
    pub fn decode(&mut self) -> Option<Vec<u8>> {
        loop {
            let Some(end) = self.buffer.iter().position(|&b| b == NOTIFICATION_TERMINATOR) else {
                if self.buffer.len() > MAX_NOTIFICATION_SIZE {
                    log::warn!(
                        "dropping notification over {} bytes without terminator",
                        MAX_NOTIFICATION_SIZE
                    );
                    self.buffer.clear();
                    self.discarding = true;
                }
                return None;
            };

            let line = self.buffer.split_to(end);
            self.buffer.advance(1);

            if std::mem::take(&mut self.discarding) {
                continue;
            }
            if line.len() > MAX_NOTIFICATION_SIZE {
                log::warn!("dropping {} byte notification", line.len());
                continue;
            }
            if line.iter().all(|b| b.is_ascii_whitespace()) {
                continue;
            }
            return Some(line.to_vec());
        }
    }

    /// Terminate a frame for transmission over a stream bridge.
    pub fn encode(frame: &[u8]) -> Vec<u8> {
        let mut buf = Vec::with_capacity(frame.len() + 1);
        buf.extend_from_slice(frame);
        buf.push(NOTIFICATION_TERMINATOR);
        buf
    }

    /// Get the number of buffered bytes.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Clear the buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.discarding = false;
    }
}
