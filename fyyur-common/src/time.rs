//! Timestamp utilities
//!
//! Show start times are instants. They are parsed once at the form boundary,
//! stored as epoch milliseconds and compared as `DateTime<Utc>`. Input without
//! an offset is interpreted as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SubsecRound, TimeZone, Utc};

use crate::{Error, Result};

/// Naive layouts accepted by [`parse_start_time`], tried in order
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%d/%m/%Y %H:%M:%S",
];

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Convert a stored epoch-millisecond value back into an instant
pub fn from_millis(millis: i64) -> Result<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| Error::Integrity(format!("start time out of range: {} ms", millis)))
}

/// Convert an instant to epoch milliseconds for storage
pub fn to_millis(instant: DateTime<Utc>) -> i64 {
    instant.timestamp_millis()
}

/// Parse free-text start time input into a UTC instant
///
/// Accepts RFC 3339 (`2019-05-21T21:30:00.000Z`), naive date-times with a
/// space or `T` separator, the `DD/MM/YYYY HH:MM:SS` layout, and bare dates
/// (midnight). Precision below a millisecond is truncated, matching storage.
pub fn parse_start_time(input: &str) -> Result<DateTime<Utc>> {
    parse_instant(input.trim()).map(|instant| instant.trunc_subsecs(3))
}

fn parse_instant(text: &str) -> Result<DateTime<Utc>> {
    if text.is_empty() {
        return Err(Error::InvalidInput("start_time is required".to_string()));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&midnight));
        }
    }

    Err(Error::InvalidInput(format!(
        "unrecognized start_time '{}'",
        text
    )))
}

/// Display layouts for start times
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayFormat {
    /// `Tuesday May, 21, 2019 at 9:30PM`
    Full,
    /// `Tue 05, 21, 2019 9:30PM`
    Medium,
}

/// Render a start time for display
pub fn format_start_time(instant: DateTime<Utc>, format: DisplayFormat) -> String {
    let pattern = match format {
        DisplayFormat::Full => "%A %B, %-d, %Y at %-I:%M%p",
        DisplayFormat::Medium => "%a %m, %d, %Y %-I:%M%p",
    };
    instant.format(pattern).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_parse_rfc3339_with_millis_and_z() {
        let parsed = parse_start_time("2019-05-21T21:30:00.000Z").unwrap();
        assert_eq!(parsed, utc(2019, 5, 21, 21, 30));
    }

    #[test]
    fn test_parse_rfc3339_with_offset_normalizes_to_utc() {
        let parsed = parse_start_time("2019-05-21T14:30:00-07:00").unwrap();
        assert_eq!(parsed, utc(2019, 5, 21, 21, 30));
    }

    #[test]
    fn test_parse_naive_forms_are_utc() {
        let expected = utc(2035, 4, 1, 20, 0);
        assert_eq!(parse_start_time("2035-04-01 20:00:00").unwrap(), expected);
        assert_eq!(parse_start_time("2035-04-01 20:00").unwrap(), expected);
        assert_eq!(parse_start_time("2035-04-01T20:00:00").unwrap(), expected);
        assert_eq!(parse_start_time("  2035-04-01T20:00  ").unwrap(), expected);
        assert_eq!(parse_start_time("01/04/2035 20:00:00").unwrap(), expected);
    }

    #[test]
    fn test_parse_bare_date_is_midnight() {
        assert_eq!(parse_start_time("2035-04-01").unwrap(), utc(2035, 4, 1, 0, 0));
    }

    #[test]
    fn test_parse_rejects_garbage_and_empty() {
        assert!(matches!(parse_start_time("next tuesday"), Err(Error::InvalidInput(_))));
        assert!(matches!(parse_start_time("   "), Err(Error::InvalidInput(_))));
        assert!(matches!(parse_start_time("2035-13-01 20:00"), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_parse_truncates_to_stored_precision() {
        let parsed = parse_start_time("2019-05-21T21:30:00.123456789Z").unwrap();
        assert_eq!(to_millis(parsed), 1_558_474_200_123);
        assert_eq!(from_millis(to_millis(parsed)).unwrap(), parsed);

        let naive = parse_start_time("2019-05-21 21:30:00.999999").unwrap();
        assert_eq!(from_millis(to_millis(naive)).unwrap(), naive);
    }

    #[test]
    fn test_millis_roundtrip_is_exact() {
        let instant = parse_start_time("2019-05-21T21:30:00.125Z").unwrap();
        let millis = to_millis(instant);
        assert_eq!(millis, 1_558_474_200_125);
        assert_eq!(from_millis(millis).unwrap(), instant);
    }

    #[test]
    fn test_format_full_and_medium() {
        let instant = utc(2019, 5, 21, 21, 30);
        assert_eq!(
            format_start_time(instant, DisplayFormat::Full),
            "Tuesday May, 21, 2019 at 9:30PM"
        );
        assert_eq!(
            format_start_time(instant, DisplayFormat::Medium),
            "Tue 05, 21, 2019 9:30PM"
        );
    }

    #[test]
    fn test_now_returns_recent_timestamp() {
        let timestamp = now();
        assert!(timestamp.timestamp() > 946_684_800); // 2000-01-01 00:00:00 UTC
        assert!(timestamp.timestamp() < 4_102_444_800); // 2100-01-01 00:00:00 UTC
    }
}
