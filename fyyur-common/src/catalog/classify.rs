//! Past/upcoming classification of a single show

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Where a show falls relative to a reference instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShowTiming {
    Past,
    Upcoming,
}

/// Classify a show start against `now`
///
/// Strictly later than `now` is upcoming; a show starting exactly at `now`
/// is past.
pub fn classify(show_start: DateTime<Utc>, now: DateTime<Utc>) -> ShowTiming {
    if show_start > now {
        ShowTiming::Upcoming
    } else {
        ShowTiming::Past
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 20, 0, 0).unwrap()
    }

    #[test]
    fn test_later_start_is_upcoming() {
        let now = reference();
        assert_eq!(classify(now + Duration::milliseconds(1), now), ShowTiming::Upcoming);
        assert_eq!(classify(now + Duration::days(400), now), ShowTiming::Upcoming);
    }

    #[test]
    fn test_earlier_start_is_past() {
        let now = reference();
        assert_eq!(classify(now - Duration::milliseconds(1), now), ShowTiming::Past);
    }

    #[test]
    fn test_start_equal_to_now_is_past() {
        let now = reference();
        assert_eq!(classify(now, now), ShowTiming::Past);
    }
}
