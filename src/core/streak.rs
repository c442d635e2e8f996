use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};

use super::date_window::days_between;

/// Counts consecutive completed calendar days ending at or adjacent to
/// `today`. The walk starts with the cursor on `today` and steps backward
/// through the completion days in descending order; a day counts while it is
/// at most one day behind the cursor, and the first larger gap ends the
/// streak.
///
/// A streak survives an uncompleted "today": with the cursor still on today,
/// a completion on yesterday has a diff of 1 and counts. The streak only
/// breaks once a full day passes with nothing logged.
///
/// Callers supply a set, so duplicate days cannot double count.
pub fn streak(completion_days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut cursor = today;
    for &day in completion_days.iter().rev() {
        if days_between(cursor, day) <= 1 {
            streak += 1;
            cursor = day - Duration::days(1);
        } else {
            break;
        }
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;

    const TODAY: NaiveDate = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();

    fn days_ago(offsets: &[i64]) -> BTreeSet<NaiveDate> {
        offsets.iter().map(|o| TODAY - Duration::days(*o)).collect()
    }

    #[test]
    fn empty_set_has_no_streak() {
        assert_eq!(streak(&BTreeSet::new(), TODAY), 0);
    }

    #[test]
    fn counts_consecutive_days_through_today() {
        assert_eq!(streak(&days_ago(&[0, 1, 2]), TODAY), 3);
    }

    #[test]
    fn uncompleted_today_keeps_streak_alive() {
        assert_eq!(streak(&days_ago(&[1, 2]), TODAY), 2);
    }

    #[test]
    fn full_skipped_day_breaks_streak() {
        assert_eq!(streak(&days_ago(&[2, 3]), TODAY), 0);
    }

    #[test]
    fn gap_in_history_stops_the_walk() {
        // today..today-2 count, then the hole at today-3 ends it
        assert_eq!(streak(&days_ago(&[0, 1, 2, 4, 5]), TODAY), 3);
    }

    #[test]
    fn single_completion_today() {
        assert_eq!(streak(&days_ago(&[0]), TODAY), 1);
    }

    #[test]
    fn long_unbroken_history() {
        let days = days_ago(&(0..30i64).collect::<Vec<_>>());
        assert_eq!(streak(&days, TODAY), 30);
    }
}
