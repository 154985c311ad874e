//! Error types for log line parsing

use thiserror::Error;

/// Errors that can occur while parsing a single log line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No ISO-8601 timestamp with microseconds found in the line
    #[error("no ISO-8601 timestamp found in line")]
    TimestampMissing,

    /// More than one timestamp found; the line structure is ambiguous
    #[error("expected exactly one timestamp, found {0}")]
    TimestampAmbiguous(usize),

    /// The matched timestamp failed strict datetime parsing
    #[error("invalid timestamp {value}: {details}")]
    InvalidTimestamp { value: String, details: String },

    /// The session id token is not exactly 16 characters
    #[error("session id must be 16 characters, got {length}")]
    SessionIdLength { length: usize },

    /// Nothing remains after the timestamp and session id
    #[error("empty message after session id")]
    EmptyMessage,

    /// The constructed segment failed final validation
    #[error("segment failed validation")]
    Validation,
}

/// Result type for log parsing operations
pub type Result<T> = std::result::Result<T, ParseError>;
