use chrono::NaiveDate;

use crate::storage::entities::{CompletionEntity, HabitEntity, HabitFrequency};

use super::date_window::{in_window, week_window};

/// Percentage of daily habits with a completion on `today`, rounded half-up.
/// No daily habits means 0% progress, not an undefined ratio.
pub fn today_progress(
    habits: &[HabitEntity],
    completions: &[CompletionEntity],
    today: NaiveDate,
) -> u8 {
    let daily: Vec<&HabitEntity> = habits
        .iter()
        .filter(|h| h.frequency == HabitFrequency::Daily)
        .collect();
    if daily.is_empty() {
        return 0;
    }
    let completed = daily
        .iter()
        .filter(|habit| {
            completions
                .iter()
                .any(|c| c.habit_id == habit.id && c.day == today)
        })
        .count();
    percent(completed, daily.len())
}

/// Percentage of the week's possible completions that were logged, over the
/// Sunday-to-Saturday window containing `today`.
///
/// The denominator is `habits.len() * 7` regardless of each habit's
/// frequency, so weekly habits can never reach 100% on their own. That is the
/// established policy, kept as-is. Every completion in the window counts,
/// whatever its habit's frequency.
pub fn weekly_progress(
    habits: &[HabitEntity],
    completions: &[CompletionEntity],
    today: NaiveDate,
) -> u8 {
    if habits.is_empty() {
        return 0;
    }
    let (start, end) = week_window(today);
    let in_week = completions
        .iter()
        .filter(|c| in_window(c.day, start, end))
        .count();
    percent(in_week, habits.len() * 7)
}

fn percent(part: usize, whole: usize) -> u8 {
    (part as f64 / whole as f64 * 100.).round() as u8
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    const TODAY: NaiveDate = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();

    fn habit(id: &str, frequency: HabitFrequency) -> HabitEntity {
        HabitEntity {
            id: id.into(),
            name: Arc::from(format!("habit {id}")),
            frequency,
            owner_id: "u1".into(),
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap(),
        }
    }

    fn completion(habit_id: &str, day: NaiveDate) -> CompletionEntity {
        CompletionEntity {
            id: format!("{habit_id}-{day}").into(),
            habit_id: habit_id.into(),
            day,
            recorded_at: Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn today_progress_without_daily_habits_is_zero() {
        assert_eq!(today_progress(&[], &[], TODAY), 0);
        let weekly_only = vec![habit("h1", HabitFrequency::Weekly)];
        let done = vec![completion("h1", TODAY)];
        assert_eq!(today_progress(&weekly_only, &done, TODAY), 0);
    }

    #[test]
    fn today_progress_rounds_half_up() {
        let habits = vec![
            habit("h1", HabitFrequency::Daily),
            habit("h2", HabitFrequency::Daily),
            habit("h3", HabitFrequency::Daily),
        ];
        let completions = vec![completion("h1", TODAY), completion("h2", TODAY)];
        // 66.67 rounds to 67
        assert_eq!(today_progress(&habits, &completions, TODAY), 67);
    }

    #[test]
    fn today_progress_ignores_other_days_and_weekly_habits() {
        let habits = vec![
            habit("h1", HabitFrequency::Daily),
            habit("h2", HabitFrequency::Weekly),
        ];
        let completions = vec![
            completion("h1", TODAY - Duration::days(1)),
            completion("h2", TODAY),
        ];
        assert_eq!(today_progress(&habits, &completions, TODAY), 0);
    }

    #[test]
    fn weekly_progress_with_no_habits_is_zero() {
        assert_eq!(weekly_progress(&[], &[completion("h1", TODAY)], TODAY), 0);
    }

    #[test]
    fn weekly_progress_counts_window_bounds_inclusively() {
        let habits = vec![habit("h1", HabitFrequency::Daily)];
        let (start, end) = week_window(TODAY);
        let completions = vec![completion("h1", start), completion("h1", end)];
        // 2 of 7 ⇒ 28.57 ⇒ 29
        assert_eq!(weekly_progress(&habits, &completions, TODAY), 29);
    }

    #[test]
    fn weekly_progress_excludes_days_outside_the_window() {
        let habits = vec![habit("h1", HabitFrequency::Daily)];
        let (start, end) = week_window(TODAY);
        let completions = vec![
            completion("h1", start - Duration::days(1)),
            completion("h1", end + Duration::days(1)),
        ];
        assert_eq!(weekly_progress(&habits, &completions, TODAY), 0);
    }

    #[test]
    fn weekly_denominator_covers_all_habits_times_seven() {
        // one weekly habit completed once: 1 of 14 ⇒ 7%
        let habits = vec![
            habit("h1", HabitFrequency::Daily),
            habit("h2", HabitFrequency::Weekly),
        ];
        let completions = vec![completion("h2", TODAY)];
        assert_eq!(weekly_progress(&habits, &completions, TODAY), 7);
    }

    #[test]
    fn two_habit_scenario() {
        let habits = vec![
            habit("h1", HabitFrequency::Daily),
            habit("h2", HabitFrequency::Daily),
        ];
        let completions = vec![completion("h1", TODAY)];
        assert_eq!(today_progress(&habits, &completions, TODAY), 50);
    }
}
