//! Strict ISO-8601 timestamps
//!
//! Accepted form: `YYYY-MM-DDTHH:mm:ss[.fraction](Z|±HH:MM)`. The timezone
//! designator is mandatory; offsets are normalized to UTC on decode and
//! timestamps are always written with a `Z` suffix. Fractions of any length
//! are accepted, but only the first nine digits (nanoseconds) are kept.

use chrono::{DateTime, SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static ISO_8601: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^([0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2})(?:\.([0-9]+))?(Z|[+-][0-9]{2}:[0-9]{2})$",
    )
    .expect("timestamp pattern is valid")
});

const MAX_FRACTION_DIGITS: usize = 9;

/// Parse a wire timestamp, returning `None` when it is not strict ISO-8601
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let caps = ISO_8601.captures(raw)?;
    let mut normalized = caps[1].to_string();
    if let Some(fraction) = caps.get(2) {
        // Sub-nanosecond digits are dropped, not rounded
        let digits = fraction.as_str();
        normalized.push('.');
        normalized.push_str(&digits[..digits.len().min(MAX_FRACTION_DIGITS)]);
    }
    normalized.push_str(&caps[3]);

    DateTime::parse_from_rfc3339(&normalized)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

/// Format a timestamp for the wire, keeping sub-second precision when present
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn test_protocol_example() {
        let ts = parse_timestamp("1991-03-11T11:40:03.12Z").unwrap();
        assert_eq!(ts.nanosecond(), 120_000_000);
        assert_eq!(ts.hour(), 11);
    }

    #[test]
    fn test_offset_is_normalized_to_utc() {
        let ts = parse_timestamp("2024-05-01T12:00:00+02:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_rejects_missing_timezone() {
        assert!(parse_timestamp("2024-05-01T12:00:00").is_none());
        assert!(parse_timestamp("2024-05-01T12:00:00.123").is_none());
    }

    #[test]
    fn test_rejects_loose_forms() {
        assert!(parse_timestamp("2024-05-01 12:00:00Z").is_none());
        assert!(parse_timestamp("2024-05-01t12:00:00z").is_none());
        assert!(parse_timestamp("2024-05-01").is_none());
        assert!(parse_timestamp("1714564800").is_none());
        assert!(parse_timestamp("2024-13-01T12:00:00Z").is_none());
    }

    #[test]
    fn test_long_fractions_truncate_to_nanoseconds() {
        let ts = parse_timestamp("2024-05-01T12:00:00.123456789987Z").unwrap();
        assert_eq!(ts.nanosecond(), 123_456_789);
        let ts = parse_timestamp("2024-05-01T12:00:00.9999999999+01:00").unwrap();
        assert_eq!(ts.nanosecond(), 999_999_999);
        assert_eq!(ts.hour(), 11);
    }

    #[test]
    fn test_rejects_empty_fraction() {
        assert!(parse_timestamp("2024-05-01T12:00:00.Z").is_none());
    }

    #[test]
    fn test_format_round_trip() {
        for raw in [
            "2024-05-01T12:00:00Z",
            "2024-05-01T12:00:00.120Z",
            "2024-05-01T12:00:00.123456Z",
        ] {
            let ts = parse_timestamp(raw).unwrap();
            assert_eq!(parse_timestamp(&format_timestamp(&ts)), Some(ts));
        }
    }

    #[test]
    fn test_format_uses_z_suffix() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        assert_eq!(format_timestamp(&ts), "2024-05-01T10:00:00Z");
    }
}
