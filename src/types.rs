//! Core types for parsed log segments and assembled email records

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// ISO-8601 timestamp with microsecond precision, e.g.
/// `2021-05-01T00:00:13.309684`
pub(crate) static TIMESTAMP_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{6}").unwrap()
});

/// Session identifier wrapper type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Required identifier length in characters
    pub const LENGTH: usize = 16;

    /// Parse a session id from a string; it must be exactly 16
    /// characters with no whitespace
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.chars().count() == Self::LENGTH && !s.chars().any(char::is_whitespace) {
            Some(Self(s.to_string()))
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One parsed unit derived from a single log line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LogSegment {
    /// Arrival timestamp as it appeared in the line (ISO-8601 with
    /// microseconds)
    pub time: String,

    /// The same instant as UTC Unix epoch seconds
    pub timestamp: f64,

    /// Identifier of the session this segment belongs to
    pub session_id: SessionId,

    /// Payload after the session id, nominally `key=value`
    pub message: String,
}

impl LogSegment {
    /// Check the segment invariant: non-empty message, 16-character
    /// session id, finite timestamp, and a `time` field matching the
    /// timestamp pattern
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.message.is_empty()
            && self.session_id.as_str().chars().count() == SessionId::LENGTH
            && self.timestamp.is_finite()
            && TIMESTAMP_PATTERN.is_match(&self.time)
    }
}

/// Session start and elapsed duration for an assembled record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailTime {
    /// First segment's timestamp (ISO-8601 with microseconds)
    pub start: String,

    /// Elapsed span formatted as `H:MM:SS.ffffff`
    pub duration: String,
}

impl EmailTime {
    /// Build a session time from a start timestamp and an elapsed span in
    /// seconds. Spans of 24 hours or more widen the hour field rather
    /// than wrapping.
    #[must_use]
    pub fn from_span(start: impl Into<String>, elapsed_seconds: f64) -> Self {
        debug_assert!(
            elapsed_seconds >= 0.0,
            "session duration must be non-negative, got {elapsed_seconds}"
        );

        #[allow(clippy::cast_possible_truncation)]
        let total_micros = (elapsed_seconds * 1_000_000.0).round() as i64;
        let micros = total_micros % 1_000_000;
        let total_seconds = total_micros / 1_000_000;
        let hours = total_seconds / 3600;
        let minutes = total_seconds / 60 % 60;
        let seconds = total_seconds % 60;

        Self {
            start: start.into(),
            duration: format!("{hours}:{minutes:02}:{seconds:02}.{micros:06}"),
        }
    }
}

/// Envelope addresses for an assembled record. The sender slot is stored
/// as `from_addr` and serialized as `from`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailAddress {
    #[serde(rename = "from")]
    pub from_addr: String,

    pub to: String,
}

/// A fully assembled email record for one session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Email {
    /// Session start and duration
    pub time: EmailTime,

    /// Identifier shared by all segments of the session
    pub session_id: SessionId,

    /// Client address observed for the session
    pub client: String,

    /// Message identifier reported by the exchange
    pub message_id: String,

    /// Envelope sender and recipient
    pub address: EmailAddress,

    /// Final delivery status
    pub status: String,
}
