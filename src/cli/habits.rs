use std::fmt::Display;

use ansi_term::Colour;
use anyhow::{anyhow, bail, Result};
use clap::ValueEnum;

use crate::{
    core::tracker::HabitTracker,
    storage::{
        completion_store::CompletionStore,
        entities::{HabitEntity, HabitFrequency, UserEntity},
        habit_repository::HabitRepository,
    },
};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Frequency {
    Daily,
    Weekly,
}

impl From<Frequency> for HabitFrequency {
    fn from(value: Frequency) -> Self {
        match value {
            Frequency::Daily => Self::Daily,
            Frequency::Weekly => Self::Weekly,
        }
    }
}

impl Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Frequency::Daily => write!(f, "daily"),
            Frequency::Weekly => write!(f, "weekly"),
        }
    }
}

pub async fn add<R: HabitRepository, C: CompletionStore>(
    tracker: &HabitTracker<R, C>,
    user: &UserEntity,
    name: &str,
    frequency: Frequency,
) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        bail!("Habit name can't be empty");
    }
    let habit = tracker.create_habit(&user.id, name, frequency.into()).await?;
    println!("Added {} habit `{}`", habit.frequency, habit.name);
    Ok(())
}

pub async fn remove<R: HabitRepository, C: CompletionStore>(
    tracker: &HabitTracker<R, C>,
    user: &UserEntity,
    reference: &str,
) -> Result<()> {
    let habit = resolve_habit(tracker, user, reference).await?;
    tracker.delete_habit(&habit.id).await?;
    println!("Removed `{}` and its completion history", habit.name);
    Ok(())
}

pub async fn done<R: HabitRepository, C: CompletionStore>(
    tracker: &HabitTracker<R, C>,
    user: &UserEntity,
    reference: &str,
) -> Result<()> {
    let habit = resolve_habit(tracker, user, reference).await?;
    if tracker.mark_complete(&habit.id).await? {
        let streak = tracker.streak(&habit.id).await?;
        println!("Completed `{}` for today. Streak: {streak}", habit.name);
    } else {
        println!("`{}` is already completed today", habit.name);
    }
    Ok(())
}

pub async fn undo<R: HabitRepository, C: CompletionStore>(
    tracker: &HabitTracker<R, C>,
    user: &UserEntity,
    reference: &str,
) -> Result<()> {
    let habit = resolve_habit(tracker, user, reference).await?;
    if tracker.unmark_complete(&habit.id).await? {
        println!("Removed today's completion for `{}`", habit.name);
    } else {
        println!("`{}` has no completion for today", habit.name);
    }
    Ok(())
}

pub async fn list<R: HabitRepository, C: CompletionStore>(
    tracker: &HabitTracker<R, C>,
    user: &UserEntity,
) -> Result<()> {
    let overview = tracker.habit_overview(&user.id).await?;
    if overview.is_empty() {
        println!("No habits yet. Add one with `habitkeep add <name>`.");
        return Ok(());
    }
    for entry in overview {
        let mark = if entry.completed_today {
            Colour::Green.paint("✓").to_string()
        } else {
            "·".to_string()
        };
        println!(
            "{mark} {}\t{}\tstreak {}",
            entry.habit.name, entry.habit.frequency, entry.streak
        );
    }
    Ok(())
}

/// Habits are addressed by name (case-insensitive) or by id.
pub async fn resolve_habit<R: HabitRepository, C: CompletionStore>(
    tracker: &HabitTracker<R, C>,
    user: &UserEntity,
    reference: &str,
) -> Result<HabitEntity> {
    let habits = tracker.list_habits(&user.id).await?;
    habits
        .into_iter()
        .find(|h| &*h.id == reference || h.name.eq_ignore_ascii_case(reference))
        .ok_or_else(|| anyhow!("No habit named `{reference}`. See `habitkeep list`"))
}
