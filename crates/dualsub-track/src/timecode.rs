//! Conversions between `HH:MM:SS.mmm` textual timestamps and seconds.

use std::sync::LazyLock;

use regex::Regex;

static TIMESTAMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+):(\d{2}):(\d{2})\.(\d{3})$").expect("timestamp pattern"));

/// Parses an `H+:MM:SS.mmm` timestamp into seconds. The hour component may
/// be longer than two digits.
///
/// Soft-fails: input that does not match the pattern yields `0.0`, which is
/// indistinguishable from a legitimate zero timestamp. Callers must not use
/// the return value as an error signal; cues built from an unparseable end
/// timestamp are dropped by the `end > start` invariant instead.
pub fn parse_timestamp(text: &str) -> f64 {
    let Some(caps) = TIMESTAMP.captures(text.trim()) else {
        return 0.0;
    };

    let hours: f64 = caps[1].parse().unwrap_or(0.0);
    let minutes: f64 = caps[2].parse().unwrap_or(0.0);
    let seconds: f64 = caps[3].parse().unwrap_or(0.0);
    let millis: f64 = caps[4].parse().unwrap_or(0.0);

    hours * 3600.0 + minutes * 60.0 + seconds + millis / 1000.0
}

/// Formats seconds as `HH:MM:SS.mmm` with two-digit hours and minutes.
///
/// Used for diagnostics only; parsed cues retain their raw timestamp text,
/// so round-trip fidelity is not required here. Negative and non-finite
/// inputs clamp to zero.
pub fn format_timestamp(seconds: f64) -> String {
    let total = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
    let hours = (total / 3600.0) as u64;
    let minutes = ((total % 3600.0) / 60.0) as u64;
    let secs = total % 60.0;
    format!("{hours:02}:{minutes:02}:{secs:06.3}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_timestamps() {
        assert_eq!(parse_timestamp("00:00:01.000"), 1.0);
        assert_eq!(parse_timestamp("00:01:30.250"), 90.25);
        assert_eq!(parse_timestamp("01:30:00.500"), 5400.5);
    }

    #[test]
    fn hour_component_may_exceed_two_digits() {
        assert_eq!(parse_timestamp("100:00:00.000"), 360_000.0);
    }

    #[test]
    fn malformed_input_soft_fails_to_zero() {
        assert_eq!(parse_timestamp(""), 0.0);
        assert_eq!(parse_timestamp("1:2:3.4"), 0.0);
        assert_eq!(parse_timestamp("00:00:01,000"), 0.0);
        assert_eq!(parse_timestamp("not a timestamp"), 0.0);
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        assert_eq!(parse_timestamp("  00:00:02.000 "), 2.0);
    }

    #[test]
    fn formats_with_padded_fields() {
        assert_eq!(format_timestamp(1.5), "00:00:01.500");
        assert_eq!(format_timestamp(90.25), "00:01:30.250");
        assert_eq!(format_timestamp(5400.5), "01:30:00.500");
        assert_eq!(format_timestamp(0.0), "00:00:00.000");
    }

    #[test]
    fn format_clamps_invalid_values() {
        assert_eq!(format_timestamp(-3.0), "00:00:00.000");
        assert_eq!(format_timestamp(f64::NAN), "00:00:00.000");
    }
}
