//! Diagnostics channel for rejected lines and unrecognized fields
//!
//! The parser and builder report recoverable problems through a
//! [`DiagnosticsSink`] passed in at construction instead of a
//! process-wide logger. The default [`NoopSink`] drops everything;
//! [`MemorySink`] collects events for inspection and [`TracingSink`]
//! forwards them to `tracing`.

use crate::error::ParseError;
use crate::types::SessionId;
use std::sync::Mutex;
use tracing::warn;

/// A recoverable problem observed during parsing or assembly
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticEvent {
    /// A line was rejected and contributes nothing to the output
    MalformedLine {
        line_index: usize,
        line: String,
        error: ParseError,
    },

    /// A message carried a field outside the recognized set; the
    /// session stays valid
    UnknownField { session_id: SessionId, field: String },
}

/// Receiver for diagnostic events
pub trait DiagnosticsSink {
    fn record(&self, event: DiagnosticEvent);
}

impl<S: DiagnosticsSink + ?Sized> DiagnosticsSink for &S {
    fn record(&self, event: DiagnosticEvent) {
        (**self).record(event);
    }
}

/// Sink that drops all events
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl DiagnosticsSink for NoopSink {
    fn record(&self, _event: DiagnosticEvent) {}
}

/// Sink that collects events in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events recorded so far
    #[must_use]
    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .is_empty()
    }
}

impl DiagnosticsSink for MemorySink {
    fn record(&self, event: DiagnosticEvent) {
        self.events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(event);
    }
}

/// Sink that forwards events to `tracing` as warnings
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn record(&self, event: DiagnosticEvent) {
        match event {
            DiagnosticEvent::MalformedLine {
                line_index,
                line,
                error,
            } => warn!(line_index, line = %line, %error, "failed to parse line"),
            DiagnosticEvent::UnknownField { session_id, field } => {
                warn!(session_id = %session_id, field = %field, "unrecognized message field");
            }
        }
    }
}
