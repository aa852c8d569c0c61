//! # Time Windows
//!
//! Boundary helpers for the dashboard's revenue windows and for date-coded
//! receipt numbers.
//!
//! "Today" and "this month" are shop-local concepts: the day rolls over at
//! local midnight, not UTC midnight. These helpers are generic over the
//! timezone so the callers decide what "local" means and tests can pin a
//! fixed offset.

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone};
use std::fmt;

/// The first instant of the day containing `now`, in `now`'s timezone.
pub fn start_of_day<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    day_open(now.timezone(), now.date_naive())
}

/// The first instant of the month containing `now`, in `now`'s timezone.
pub fn start_of_month<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    let date = now.date_naive();
    let first = date.with_day(1).unwrap_or(date);
    day_open(now.timezone(), first)
}

/// Compact local date stamp used in receipt numbers: "20260822".
pub fn day_stamp<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    now.format("%Y%m%d").to_string()
}

/// Resolves local midnight for a date, stepping past DST gaps.
///
/// Midnight can be ambiguous (clocks fell back across it) or nonexistent
/// (clocks sprang forward over it). Ambiguity takes the earlier instant; a
/// gap probes forward to the first wall time that exists.
fn day_open<Tz: TimeZone>(tz: Tz, date: NaiveDate) -> DateTime<Tz> {
    let mut naive = date.and_time(NaiveTime::MIN);
    loop {
        match tz.from_local_datetime(&naive) {
            LocalResult::Single(dt) => return dt,
            LocalResult::Ambiguous(earliest, _) => return earliest,
            LocalResult::None => naive += Duration::minutes(15),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn karachi() -> FixedOffset {
        FixedOffset::east_opt(5 * 3600).unwrap()
    }

    #[test]
    fn test_start_of_day_local() {
        let now = karachi().with_ymd_and_hms(2026, 8, 22, 14, 30, 45).unwrap();
        let start = start_of_day(&now);

        assert_eq!(start, karachi().with_ymd_and_hms(2026, 8, 22, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_start_of_day_just_after_local_midnight() {
        // 00:30 local is 19:30 the previous day in UTC. The day boundary
        // follows the local calendar, not UTC.
        let now = karachi().with_ymd_and_hms(2026, 8, 22, 0, 30, 0).unwrap();
        let start = start_of_day(&now);

        assert_eq!(start, karachi().with_ymd_and_hms(2026, 8, 22, 0, 0, 0).unwrap());

        let as_utc = start.with_timezone(&Utc);
        assert_eq!(as_utc, Utc.with_ymd_and_hms(2026, 8, 21, 19, 0, 0).unwrap());
    }

    #[test]
    fn test_start_of_month() {
        let now = karachi().with_ymd_and_hms(2026, 8, 22, 14, 30, 0).unwrap();
        let start = start_of_month(&now);

        assert_eq!(start, karachi().with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_start_of_month_on_the_first() {
        let now = karachi().with_ymd_and_hms(2026, 8, 1, 0, 0, 1).unwrap();
        let start = start_of_month(&now);

        assert_eq!(start, karachi().with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_utc_passthrough() {
        let now = Utc.with_ymd_and_hms(2026, 2, 28, 23, 59, 59).unwrap();
        assert_eq!(
            start_of_day(&now),
            Utc.with_ymd_and_hms(2026, 2, 28, 0, 0, 0).unwrap()
        );
        assert_eq!(
            start_of_month(&now),
            Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_day_stamp() {
        let now = karachi().with_ymd_and_hms(2026, 8, 22, 9, 5, 0).unwrap();
        assert_eq!(day_stamp(&now), "20260822");

        // Single-digit month and day are zero padded
        let now = karachi().with_ymd_and_hms(2026, 1, 3, 9, 5, 0).unwrap();
        assert_eq!(day_stamp(&now), "20260103");
    }
}
