use maillog_extract::{DiagnosticEvent, MemorySink, ParseError, SegmentParser};
use std::fmt::Write as _;

const DEFAULT_LOG_LINE: &str = "2021-05-01T00:00:13.309684 0E9D8BAD6F58CF42 status=sent";

#[test]
fn test_parse_single_line() {
    let parser = SegmentParser::new();
    let segments = parser.parse_text(DEFAULT_LOG_LINE);

    assert_eq!(segments.len(), 1);
    let segment = &segments[0];
    assert_eq!(segment.time, "2021-05-01T00:00:13.309684");
    assert_eq!(segment.session_id.as_str(), "0E9D8BAD6F58CF42");
    assert_eq!(segment.message, "status=sent");
    assert!(segment.is_valid());
}

#[test]
fn test_parse_line_timestamp_value() {
    let parser = SegmentParser::new();
    let segment = parser.parse_line(DEFAULT_LOG_LINE).unwrap();

    // 2021-05-01T00:00:13.309684 UTC as epoch seconds
    assert!((segment.timestamp - 1_619_827_213.309_684).abs() < 1e-6);
}

#[test]
fn test_parse_empty_input() {
    let parser = SegmentParser::new();

    assert!(parser.parse_text("").is_empty());
    assert!(parser.parse(std::iter::empty::<&str>()).is_empty());
}

#[test]
fn test_parse_line_missing_timestamp() {
    let parser = SegmentParser::new();

    assert_eq!(
        parser.parse_line("no timestamp here status=sent"),
        Err(ParseError::TimestampMissing)
    );
}

#[test]
fn test_parse_line_two_timestamps() {
    let parser = SegmentParser::new();
    let line =
        "2021-05-01T00:00:13.309684 2021-05-01T00:00:14.309684 0E9D8BAD6F58CF42 status=sent";

    assert_eq!(parser.parse_line(line), Err(ParseError::TimestampAmbiguous(2)));
}

#[test]
fn test_parse_line_short_session_id() {
    let parser = SegmentParser::new();
    let line = "2021-05-01T00:00:13.309684 0E9D8BAD status=sent";

    assert_eq!(
        parser.parse_line(line),
        Err(ParseError::SessionIdLength { length: 8 })
    );
}

#[test]
fn test_parse_line_empty_message() {
    let parser = SegmentParser::new();

    assert_eq!(
        parser.parse_line("2021-05-01T00:00:13.309684 0E9D8BAD6F58CF42"),
        Err(ParseError::EmptyMessage)
    );
    assert_eq!(
        parser.parse_line("2021-05-01T00:00:13.309684 0E9D8BAD6F58CF42   "),
        Err(ParseError::EmptyMessage)
    );
}

#[test]
fn test_parse_line_invalid_calendar_date() {
    let parser = SegmentParser::new();
    // Matches the pattern but is not a real date
    let line = "2021-13-01T00:00:13.309684 0E9D8BAD6F58CF42 status=sent";

    assert!(matches!(
        parser.parse_line(line),
        Err(ParseError::InvalidTimestamp { .. })
    ));
}

#[test]
fn test_parse_line_leading_noise_discarded() {
    let parser = SegmentParser::new();
    let line = "worker[3]: 2021-05-01T00:00:13.309684 0E9D8BAD6F58CF42 status=sent";

    let segment = parser.parse_line(line).unwrap();
    assert_eq!(segment.session_id.as_str(), "0E9D8BAD6F58CF42");
    assert_eq!(segment.message, "status=sent");
}

#[test]
fn test_malformed_lines_skipped() {
    let sink = MemorySink::new();
    let parser = SegmentParser::with_sink(&sink);

    let lines = [
        "2021-05-01T00:00:13.309684 0E9D8BAD6F58CF42 status=sent",
        "not a log line",
        "2021-05-01T00:00:14.309684 0E9D8BAD6F58CF42 client=10.0.0.1",
        "2021-05-01T00:00:15.309684 SHORT status=sent",
    ];
    let segments = parser.parse(lines);

    assert_eq!(segments.len(), 2);

    let events = sink.events();
    assert_eq!(events.len(), 2);
    match &events[0] {
        DiagnosticEvent::MalformedLine {
            line_index,
            line,
            error,
        } => {
            assert_eq!(*line_index, 1);
            assert_eq!(line, "not a log line");
            assert_eq!(*error, ParseError::TimestampMissing);
        }
        other => panic!("unexpected event: {other:?}"),
    }
    match &events[1] {
        DiagnosticEvent::MalformedLine { line_index, error, .. } => {
            assert_eq!(*line_index, 3);
            assert_eq!(*error, ParseError::SessionIdLength { length: 5 });
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn test_parse_broken_lines_only() {
    let parser = SegmentParser::new();
    let text = "nonsense\n\
                2021-05-01 00:00:13 0E9D8BAD6F58CF42 status=sent\n\
                2021-05-01T00:00:13.309684 TOOSHORT status=sent\n\
                2021-05-01T00:00:13.309684 0E9D8BAD6F58CF42\n";

    assert!(parser.parse_text(text).is_empty());
}

#[test]
fn test_parse_many_lines() {
    let parser = SegmentParser::new();

    let mut text = String::new();
    for i in 0..50_000_u32 {
        writeln!(
            text,
            "2021-05-01T00:00:{:02}.{:06} {:016X} status=sent",
            i % 60,
            i % 1_000_000,
            u64::from(i)
        )
        .unwrap();
    }

    let start = std::time::Instant::now();
    let segments = parser.parse_text(&text);
    let elapsed = start.elapsed();

    assert_eq!(segments.len(), 50_000);
    for segment in &segments {
        assert!(segment.is_valid());
    }
    assert!(
        elapsed < std::time::Duration::from_secs(10),
        "parsing 50k lines took {elapsed:?}"
    );
}
