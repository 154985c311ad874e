//! Email record assembly from parsed log segments

use crate::diagnostics::{DiagnosticEvent, DiagnosticsSink, NoopSink};
use crate::types::{Email, EmailAddress, EmailTime, LogSegment, SessionId};
use std::collections::HashMap;
use tracing::debug;

/// Assembles [`Email`] records from segments grouped by session.
///
/// A session yields a record only when it has at least two segments and
/// the five required fields (`status`, `client`, `from`, `to`,
/// `message-id`) were all observed. Incomplete sessions are dropped
/// without error.
#[derive(Debug, Clone)]
pub struct RecordBuilder<S = NoopSink> {
    sink: S,
}

impl RecordBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self { sink: NoopSink }
    }
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DiagnosticsSink> RecordBuilder<S> {
    /// Create a builder that reports unrecognized fields to `sink`
    #[must_use]
    pub const fn with_sink(sink: S) -> Self {
        Self { sink }
    }

    /// Group segments by session id, order each session chronologically,
    /// and assemble one record per complete session. Records come out in
    /// first-appearance order of their sessions.
    #[must_use]
    pub fn build_records(&self, segments: &[LogSegment]) -> Vec<Email> {
        let mut groups: HashMap<&SessionId, Vec<&LogSegment>> = HashMap::new();
        let mut order: Vec<&SessionId> = Vec::new();

        for segment in segments {
            let group = groups.entry(&segment.session_id).or_default();
            if group.is_empty() {
                order.push(&segment.session_id);
            }
            group.push(segment);
        }

        let mut records = Vec::new();

        for session_id in order {
            let Some(mut group) = groups.remove(session_id) else {
                continue;
            };

            // A single segment can never carry all required fields.
            if group.len() < 2 {
                continue;
            }

            group.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));

            if let Some(record) = self.assemble(session_id, &group) {
                records.push(record);
            }
        }

        records
    }

    /// Returns `None` when any required field is missing. An incomplete
    /// session is an expected outcome of partial data and carries no
    /// diagnostic.
    fn assemble(&self, session_id: &SessionId, segments: &[&LogSegment]) -> Option<Email> {
        let first = segments.first()?;
        let last = segments.last()?;
        let time = EmailTime::from_span(first.time.clone(), last.timestamp - first.timestamp);

        let mut template = FieldTemplate::default();

        for segment in segments {
            // field = text before the first '=', value = everything after
            let parsed = segment.message.split_once('=');
            let recognized = parsed.is_some_and(|(field, value)| template.set(field, value));
            if !recognized {
                let field = parsed.map_or(segment.message.as_str(), |(field, _)| field);
                self.sink.record(DiagnosticEvent::UnknownField {
                    session_id: session_id.clone(),
                    field: field.to_string(),
                });
            }
        }

        let record = template.into_email(session_id.clone(), time)?;

        debug!("assembled record for session {}", record.session_id);

        Some(record)
    }
}

/// Five-slot accumulator for the required fields of one session
#[derive(Debug, Default)]
struct FieldTemplate {
    status: Option<String>,
    client: Option<String>,
    from_addr: Option<String>,
    to: Option<String>,
    message_id: Option<String>,
}

impl FieldTemplate {
    /// Store `value` under a recognized field, last writer wins. Returns
    /// false for unrecognized fields.
    fn set(&mut self, field: &str, value: &str) -> bool {
        let slot = match field {
            "status" => &mut self.status,
            "client" => &mut self.client,
            "from" => &mut self.from_addr,
            "to" => &mut self.to,
            "message-id" => &mut self.message_id,
            _ => return false,
        };

        *slot = Some(value.to_string());
        true
    }

    /// The completeness check: a record exists only when every slot is
    /// filled
    fn into_email(self, session_id: SessionId, time: EmailTime) -> Option<Email> {
        Some(Email {
            time,
            session_id,
            client: self.client?,
            message_id: self.message_id?,
            address: EmailAddress {
                from_addr: self.from_addr?,
                to: self.to?,
            },
            status: self.status?,
        })
    }
}
