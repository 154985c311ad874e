//! Log line parser implementation

use crate::diagnostics::{DiagnosticEvent, DiagnosticsSink, NoopSink};
use crate::error::{ParseError, Result};
use crate::types::{LogSegment, SessionId, TIMESTAMP_PATTERN};
use chrono::NaiveDateTime;
use tracing::debug;

/// Strict datetime format behind the timestamp pattern
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Converts raw log lines into validated [`LogSegment`] values.
///
/// Line format: `<timestamp> <16-char session id> <field>=<value>`.
/// Batch parsing is best-effort: malformed lines are reported to the
/// diagnostics sink and skipped, never surfaced as errors.
#[derive(Debug, Clone)]
pub struct SegmentParser<S = NoopSink> {
    sink: S,
}

impl SegmentParser {
    #[must_use]
    pub const fn new() -> Self {
        Self { sink: NoopSink }
    }
}

impl Default for SegmentParser {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DiagnosticsSink> SegmentParser<S> {
    /// Create a parser that reports rejected lines to `sink`
    #[must_use]
    pub const fn with_sink(sink: S) -> Self {
        Self { sink }
    }

    /// Parse a single line into a validated segment
    pub fn parse_line(&self, line: &str) -> Result<LogSegment> {
        let matches: Vec<_> = TIMESTAMP_PATTERN.find_iter(line).collect();
        let found = match matches.as_slice() {
            [] => return Err(ParseError::TimestampMissing),
            [m] => m,
            more => return Err(ParseError::TimestampAmbiguous(more.len())),
        };

        let time = found.as_str();
        let timestamp = parse_timestamp(time)?;

        // Anything before the timestamp is discarded; the session id and
        // message are positional slices of what follows it.
        let rest = line[found.end()..].trim_start_matches(' ');
        let id_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let token = &rest[..id_end];
        let session_id = SessionId::parse(token).ok_or_else(|| ParseError::SessionIdLength {
            length: token.chars().count(),
        })?;

        let message = rest[id_end..].trim();
        if message.is_empty() {
            return Err(ParseError::EmptyMessage);
        }

        let segment = LogSegment {
            time: time.to_string(),
            timestamp,
            session_id,
            message: message.to_string(),
        };

        if segment.is_valid() {
            Ok(segment)
        } else {
            Err(ParseError::Validation)
        }
    }

    /// Parse a sequence of lines, skipping malformed ones.
    ///
    /// Each rejected line is recorded on the diagnostics sink with its
    /// index and raw content.
    #[must_use = "parsing has no effect other than the returned segments"]
    pub fn parse<I, T>(&self, lines: I) -> Vec<LogSegment>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut segments = Vec::new();

        for (line_index, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            match self.parse_line(line) {
                Ok(segment) => segments.push(segment),
                Err(error) => self.sink.record(DiagnosticEvent::MalformedLine {
                    line_index,
                    line: line.to_string(),
                    error,
                }),
            }
        }

        debug!("parsed {} segments", segments.len());

        segments
    }

    /// Parse a whole text buffer line by line; empty input yields an
    /// empty vec
    #[must_use]
    pub fn parse_text(&self, text: &str) -> Vec<LogSegment> {
        self.parse(text.lines())
    }
}

fn parse_timestamp(value: &str) -> Result<f64> {
    let parsed = NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|e| {
        ParseError::InvalidTimestamp {
            value: value.to_string(),
            details: e.to_string(),
        }
    })?;

    #[allow(clippy::cast_precision_loss)]
    let timestamp = parsed.and_utc().timestamp_micros() as f64 / 1_000_000.0;

    Ok(timestamp)
}
