use std::collections::BTreeSet;
use std::fmt::Write;

use ansi_term::{Colour, Style};
use anyhow::{anyhow, Result};
use chrono::{Datelike, NaiveDate};

use crate::{
    core::{date_window::parse_day, tracker::HabitTracker},
    storage::{
        completion_store::CompletionStore, entities::UserEntity, habit_repository::HabitRepository,
    },
};

use super::habits::resolve_habit;

/// Prints a month heat-map for one habit: completed days in green, today
/// underlined. Month defaults to the one containing `today`.
pub async fn show<R: HabitRepository, C: CompletionStore>(
    tracker: &HabitTracker<R, C>,
    user: &UserEntity,
    reference: &str,
    month: Option<String>,
    today: NaiveDate,
) -> Result<()> {
    let habit = resolve_habit(tracker, user, reference).await?;
    let first = match month {
        Some(month) => parse_month(&month)?,
        None => today.with_day(1).expect("the 1st exists in every month"),
    };
    let completed = tracker.completion_days(&habit.id).await?;

    println!("{} - {}", first.format("%B %Y"), habit.name);
    print!("{}", render_month(first, &completed, today));
    Ok(())
}

fn parse_month(value: &str) -> Result<NaiveDate> {
    parse_day(&format!("{value}-01")).map_err(|_| anyhow!("Can't parse month `{value}`, expected YYYY-MM"))
}

fn days_in_month(first: NaiveDate) -> u32 {
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    (next.expect("the 1st exists in every month") - first).num_days() as u32
}

fn render_month(first: NaiveDate, completed: &BTreeSet<NaiveDate>, today: NaiveDate) -> String {
    let mut out = String::new();
    out.push_str("Su Mo Tu We Th Fr Sa\n");

    let mut column = 0;
    for _ in 0..first.weekday().num_days_from_sunday() {
        if column != 0 {
            out.push(' ');
        }
        out.push_str("  ");
        column += 1;
    }

    for day_of_month in 1..=days_in_month(first) {
        if column != 0 {
            out.push(' ');
        }
        let date = first.with_day(day_of_month).expect("within month length");
        let cell = format!("{day_of_month:2}");
        let cell = if completed.contains(&date) {
            Colour::Green.bold().paint(cell).to_string()
        } else if date == today {
            Style::new().underline().paint(cell).to_string()
        } else {
            cell
        };
        let _ = write!(out, "{cell}");

        column += 1;
        if column == 7 {
            out.push('\n');
            column = 0;
        }
    }
    if column != 0 {
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(day(2025, 3, 1)), 31);
        assert_eq!(days_in_month(day(2025, 4, 1)), 30);
        assert_eq!(days_in_month(day(2025, 2, 1)), 28);
        assert_eq!(days_in_month(day(2024, 2, 1)), 29);
        assert_eq!(days_in_month(day(2025, 12, 1)), 31);
    }

    #[test]
    fn parse_month_accepts_year_dash_month() {
        assert_eq!(parse_month("2025-03").unwrap(), day(2025, 3, 1));
        assert!(parse_month("03/2025").is_err());
        assert!(parse_month("2025-13").is_err());
    }

    #[test]
    fn renders_offset_first_week() {
        // 2025-03-01 is a Saturday; today outside the month keeps the grid plain
        let rendered = render_month(day(2025, 3, 1), &BTreeSet::new(), day(2025, 4, 15));
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Su Mo Tu We Th Fr Sa");
        assert_eq!(lines[1], "                   1");
        assert_eq!(lines[2], " 2  3  4  5  6  7  8");
        assert_eq!(*lines.last().unwrap(), "30 31");
    }

    #[test]
    fn marks_completed_days() {
        let completed = [day(2025, 3, 5)].into_iter().collect();
        let rendered = render_month(day(2025, 3, 1), &completed, day(2025, 4, 15));
        // the completed cell carries the green escape sequence
        assert!(rendered.contains("\u{1b}["));
    }
}
