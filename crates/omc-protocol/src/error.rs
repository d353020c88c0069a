//! Protocol error types.

use thiserror::Error;

/// Errors produced while turning decoded text into a [`Message`](crate::Message).
///
/// A missing or mistyped field is never an error; it takes its default.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The text is not a JSON object.
    #[error("malformed frame: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        ParseError::Malformed(err.to_string())
    }
}

/// Result type alias for parsing.
pub type ParseResult<T> = Result<T, ParseError>;
