// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]
#![allow(clippy::significant_drop_tightening)]

//! Session Log Email Extractor
//!
//! Parses session-oriented protocol log lines into structured segments
//! and assembles one email record per session once every required field
//! has been observed.
//!
//! # Pipeline
//!
//! - [`SegmentParser`] turns raw lines into validated [`LogSegment`]s,
//!   silently skipping malformed input
//! - [`RecordBuilder`] groups segments by session id, orders them
//!   chronologically, and emits an [`Email`] for every complete session
//!
//! # Example
//!
//! ```rust
//! use maillog_extract::{RecordBuilder, SegmentParser};
//!
//! let parser = SegmentParser::new();
//! let builder = RecordBuilder::new();
//!
//! let segments = parser.parse_text(
//!     "2021-05-01T00:00:07.117297 09E8698600CF8B32 client=10.192.162.239\n\
//!      2021-05-01T00:00:08.200000 09E8698600CF8B32 from=<alice@example.com>\n\
//!      2021-05-01T00:00:09.300000 09E8698600CF8B32 to=<bob@example.com>\n\
//!      2021-05-01T00:00:10.400000 09E8698600CF8B32 message-id=<id@host>\n\
//!      2021-05-01T00:00:25.670689 09E8698600CF8B32 status=sent",
//! );
//! let records = builder.build_records(&segments);
//!
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].status, "sent");
//! assert_eq!(records[0].time.duration, "0:00:18.553392");
//! ```

mod builder;
mod diagnostics;
mod error;
mod parser;
mod types;

pub use builder::RecordBuilder;
pub use diagnostics::{DiagnosticEvent, DiagnosticsSink, MemorySink, NoopSink, TracingSink};
pub use error::{ParseError, Result};
pub use parser::SegmentParser;
pub use types::*;
