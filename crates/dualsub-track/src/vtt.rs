//! Tolerant parsing of WebVTT-style timed-text documents.
//!
//! Documents arrive as concatenations of remotely fetched segments and may
//! be truncated or garbled, so the parser never fails: anything that is not
//! a cue header followed by a text block is skipped, and malformed input
//! degrades to an empty cue sequence rather than an error.

use std::sync::LazyLock;

use regex::Regex;

use crate::timecode;
use crate::track::Cue;

// Start timestamp, arrow, end timestamp, then optional layout hints which
// are ignored for timing.
static CUE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+:\d{2}:\d{2}\.\d{3})[ \t]+-->[ \t]+(\d+:\d{2}:\d{2}\.\d{3})([ \t].*)?$")
        .expect("cue header pattern")
});

/// Parses a timed-text document into its cues, in source order.
///
/// Lines that are not cue headers and not part of an active text block
/// (format header, cue identifiers, comments) are skipped. A header's text
/// block is every non-blank line that immediately follows it, joined with
/// newlines and trimmed. Cues with empty text, or whose end does not lie
/// after their start, are discarded.
pub fn parse(document: &str) -> Vec<Cue> {
    let mut cues = Vec::new();
    let mut lines = document
        .split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .peekable();

    while let Some(line) = lines.next() {
        let Some(caps) = CUE_HEADER.captures(line) else {
            continue;
        };
        let raw_start = caps[1].to_string();
        let raw_end = caps[2].to_string();

        let mut payload = Vec::new();
        while let Some(next) = lines.peek() {
            if next.trim().is_empty() {
                break;
            }
            payload.push(lines.next().unwrap_or_default());
        }

        let text = payload.join("\n").trim().to_string();
        if text.is_empty() {
            continue;
        }

        let start_seconds = timecode::parse_timestamp(&raw_start);
        let end_seconds = timecode::parse_timestamp(&raw_end);
        if end_seconds <= start_seconds {
            continue;
        }

        cues.push(Cue {
            start_seconds,
            end_seconds,
            text,
            raw_start,
            raw_end,
        });
    }

    cues
}

/// Well-formedness summary of one timed-text document.
///
/// Produced without mutating any track state; used to decide whether a
/// fetched segment's content is usable before appending it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentReport {
    /// Number of cue-header (timestamp) lines.
    pub timestamp_lines: usize,
    /// Number of distinct text blocks following cue headers.
    pub text_blocks: usize,
    /// Whether the document opens with a `WEBVTT` format header. Missing
    /// headers are a warning, not an error.
    pub has_format_header: bool,
}

impl DocumentReport {
    pub fn is_valid(&self) -> bool {
        self.timestamp_lines > 0 && self.text_blocks > 0
    }
}

/// Classifies a document's well-formedness.
pub fn validate(document: &str) -> DocumentReport {
    let mut report = DocumentReport::default();
    let mut seen_content = false;
    let mut after_header = false;

    for line in document.split('\n').map(|line| line.trim_end_matches('\r')) {
        let trimmed = line.trim();
        if !seen_content && !trimmed.is_empty() {
            seen_content = true;
            if trimmed.trim_start_matches('\u{feff}').starts_with("WEBVTT") {
                report.has_format_header = true;
            }
        }

        if CUE_HEADER.is_match(line) {
            report.timestamp_lines += 1;
            after_header = true;
            continue;
        }
        if trimmed.is_empty() {
            after_header = false;
            continue;
        }
        if after_header {
            report.text_blocks += 1;
            after_header = false;
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    const SINGLE_CUE: &str = "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\nHello\n";

    #[test]
    fn parses_a_single_cue_document() {
        let cues = parse(SINGLE_CUE);
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].start_seconds, 1.0);
        assert_eq!(cues[0].end_seconds, 2.0);
        assert_eq!(cues[0].text, "Hello");
        assert_eq!(cues[0].raw_start, "00:00:01.000");
        assert_eq!(cues[0].raw_end, "00:00:02.000");
    }

    #[test]
    fn multi_line_payload_preserves_internal_newlines() {
        let document = "WEBVTT\n\n00:00:01.000 --> 00:00:03.000\nfirst line\nsecond line\n\n";
        let cues = parse(document);
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].text, "first line\nsecond line");
    }

    #[test]
    fn layout_hints_after_the_end_timestamp_are_ignored() {
        let document = "00:00:01.000 --> 00:00:02.000 align:start position:10%\nHinted\n";
        let cues = parse(document);
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].end_seconds, 2.0);
        assert_eq!(cues[0].raw_end, "00:00:02.000");
    }

    #[test]
    fn crlf_line_endings_are_tolerated() {
        let document = "WEBVTT\r\n\r\n00:00:01.000 --> 00:00:02.000\r\nHello\r\n";
        let cues = parse(document);
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].text, "Hello");
    }

    #[test]
    fn cue_identifiers_and_comments_are_skipped() {
        let document = "WEBVTT\n\nNOTE a comment\n\nintro\n00:00:01.000 --> 00:00:02.000\nHello\n";
        let cues = parse(document);
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].text, "Hello");
    }

    #[test]
    fn whitespace_only_payload_is_discarded() {
        let document = "00:00:01.000 --> 00:00:02.000\n   \n\n00:00:03.000 --> 00:00:04.000\nKept\n";
        let cues = parse(document);
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].text, "Kept");
    }

    #[test]
    fn inverted_or_zero_length_intervals_are_discarded() {
        let document = "00:00:02.000 --> 00:00:01.000\nBackwards\n\n\
                        00:00:03.000 --> 00:00:03.000\nEmptyInterval\n";
        assert!(parse(document).is_empty());
    }

    #[test]
    fn garbage_input_degrades_to_no_cues() {
        assert!(parse("").is_empty());
        assert!(parse("<html>not captions</html>").is_empty());
        assert!(parse("WEBVTT\n\nno timestamps here\n").is_empty());
    }

    #[test]
    fn parsing_concatenated_segments_equals_concatenated_parses() {
        let first = "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\none\n";
        let second = "WEBVTT\n\n00:00:03.000 --> 00:00:04.000\ntwo\n\n00:00:05.000 --> 00:00:06.000\nthree\n";

        let combined = format!("{}\n\n{}", first.trim_end(), second.trim_end());
        let mut expected = parse(first);
        expected.extend(parse(second));

        assert_eq!(parse(&combined), expected);
    }

    #[test]
    fn validate_reports_counts_and_header() {
        let report = validate(SINGLE_CUE);
        assert_eq!(report.timestamp_lines, 1);
        assert_eq!(report.text_blocks, 1);
        assert!(report.has_format_header);
        assert!(report.is_valid());
    }

    #[test]
    fn validate_flags_missing_format_header_as_nonfatal() {
        let report = validate("00:00:01.000 --> 00:00:02.000\nHello\n");
        assert!(!report.has_format_header);
        assert!(report.is_valid());
    }

    #[test]
    fn validate_rejects_documents_without_cues_or_text() {
        assert!(!validate("").is_valid());
        assert!(!validate("WEBVTT\n\n").is_valid());
        assert!(!validate("just prose, no timestamps").is_valid());
        assert!(!validate("00:00:01.000 --> 00:00:02.000\n\n").is_valid());
    }
}
