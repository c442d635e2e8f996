use chrono::{Datelike, Duration, NaiveDate};

use super::error::HabitError;

/// The sole unit of granularity for completion and streak logic. Two moments
/// belong to the same calendar day iff their local-date rendering matches.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// This is the standard way of converting a day to a string in habitkeep.
pub fn day_key(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

/// Day strings arriving from outside the core must match [DAY_FORMAT]; a
/// malformed one is reported instead of entering the date arithmetic.
pub fn parse_day(value: &str) -> Result<NaiveDate, HabitError> {
    NaiveDate::parse_from_str(value, DAY_FORMAT)
        .map_err(|_| HabitError::InvalidCalendarDay(value.to_string()))
}

/// Signed day count `a - b` on midnight-normalized dates.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (a - b).num_days()
}

/// The Sunday-to-Saturday window containing `reference`. Both bounds
/// inclusive.
pub fn week_window(reference: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = reference - Duration::days(reference.weekday().num_days_from_sunday() as i64);
    (start, start + Duration::days(6))
}

pub fn in_window(day: NaiveDate, start: NaiveDate, end: NaiveDate) -> bool {
    start <= day && day <= end
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        parse_day(s).unwrap()
    }

    #[test]
    fn day_key_round_trips() {
        let d = day("2025-03-09");
        assert_eq!(day_key(d), "2025-03-09");
        assert_eq!(parse_day(&day_key(d)).unwrap(), d);
    }

    #[test]
    fn rejects_malformed_days() {
        assert!(matches!(
            parse_day("09/03/2025"),
            Err(HabitError::InvalidCalendarDay(_))
        ));
        assert!(parse_day("2025-13-01").is_err());
        assert!(parse_day("").is_err());
    }

    #[test]
    fn days_between_is_signed() {
        assert_eq!(days_between(day("2025-03-10"), day("2025-03-08")), 2);
        assert_eq!(days_between(day("2025-03-08"), day("2025-03-10")), -2);
        assert_eq!(days_between(day("2025-03-10"), day("2025-03-10")), 0);
        // month boundary
        assert_eq!(days_between(day("2025-03-01"), day("2025-02-28")), 1);
    }

    #[test]
    fn week_window_spans_sunday_to_saturday() {
        // 2025-03-12 is a Wednesday
        let (start, end) = week_window(day("2025-03-12"));
        assert_eq!(start, day("2025-03-09"));
        assert_eq!(end, day("2025-03-15"));
    }

    #[test]
    fn week_window_at_the_bounds() {
        // Sunday maps onto itself as the start
        let (start, end) = week_window(day("2025-03-09"));
        assert_eq!((start, end), (day("2025-03-09"), day("2025-03-15")));
        // Saturday maps onto itself as the end
        let (start, end) = week_window(day("2025-03-15"));
        assert_eq!((start, end), (day("2025-03-09"), day("2025-03-15")));
    }

    #[test]
    fn in_window_is_inclusive() {
        let (start, end) = week_window(day("2025-03-12"));
        assert!(in_window(start, start, end));
        assert!(in_window(end, start, end));
        assert!(!in_window(start - Duration::days(1), start, end));
        assert!(!in_window(end + Duration::days(1), start, end));
    }
}
