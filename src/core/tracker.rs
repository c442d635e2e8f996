use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::{
    storage::{
        completion_store::CompletionStore,
        entities::{CompletionEntity, HabitEntity, HabitFrequency},
        habit_repository::HabitRepository,
    },
    utils::clock::Clock,
};

use super::{
    date_window::day_key,
    error::HabitError,
    progress::{today_progress, weekly_progress},
    streak::streak,
};

/// One habit together with its derived state, as shown in the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitOverview {
    pub habit: HabitEntity,
    pub completed_today: bool,
    pub streak: u32,
}

/// Orchestrates habit records and the completion log. All derived values are
/// recomputed from the stored facts on every read; nothing is cached, so a
/// read issued after a toggle resolves always reflects the committed log.
///
/// Repository, store, and clock are injected explicitly. There is no shared
/// global state behind these functions.
pub struct HabitTracker<R, C> {
    habits: R,
    completions: C,
    clock: Box<dyn Clock>,
}

impl<R: HabitRepository, C: CompletionStore> HabitTracker<R, C> {
    pub fn new(habits: R, completions: C, clock: Box<dyn Clock>) -> Self {
        Self {
            habits,
            completions,
            clock,
        }
    }

    /// Caller contract: `name` is already trimmed and non-empty.
    pub async fn create_habit(
        &self,
        owner_id: &str,
        name: &str,
        frequency: HabitFrequency,
    ) -> Result<HabitEntity, HabitError> {
        debug_assert!(!name.trim().is_empty());
        let habit = HabitEntity {
            id: self.next_id(),
            name: name.into(),
            frequency,
            owner_id: owner_id.into(),
            created_at: self.clock.now(),
        };
        self.habits
            .insert(habit.clone())
            .await
            .map_err(HabitError::from_storage)?;
        Ok(habit)
    }

    /// Removes a habit and every completion referencing it. Returns whether
    /// the habit existed.
    pub async fn delete_habit(&self, habit_id: &str) -> Result<bool, HabitError> {
        let removed = self
            .habits
            .remove(habit_id)
            .await
            .map_err(HabitError::from_storage)?;
        if removed {
            self.completions
                .remove_by_habit(habit_id)
                .await
                .map_err(HabitError::from_storage)?;
        }
        Ok(removed)
    }

    pub async fn list_habits(&self, owner_id: &str) -> Result<Vec<HabitEntity>, HabitError> {
        self.habits
            .list_by_owner(owner_id)
            .await
            .map_err(HabitError::from_storage)
    }

    pub async fn find_habit(&self, habit_id: &str) -> Result<Option<HabitEntity>, HabitError> {
        self.habits
            .get(habit_id)
            .await
            .map_err(HabitError::from_storage)
    }

    /// Records a completion for (habit, today). Idempotent: when one already
    /// exists this is a no-op and returns `false`.
    pub async fn mark_complete(&self, habit_id: &str) -> Result<bool, HabitError> {
        let day = self.clock.today();
        let existing = self
            .completions
            .list_by_habit(habit_id)
            .await
            .map_err(HabitError::from_storage)?;
        if existing.iter().any(|c| c.day == day) {
            debug!("Habit {habit_id} already completed on {}", day_key(day));
            return Ok(false);
        }

        self.completions
            .insert(CompletionEntity {
                id: self.next_id(),
                habit_id: habit_id.into(),
                day,
                recorded_at: self.clock.now(),
            })
            .await
            .map_err(HabitError::from_storage)?;
        Ok(true)
    }

    /// Removes the completion for (habit, today) if present. Returns whether
    /// one was removed.
    pub async fn unmark_complete(&self, habit_id: &str) -> Result<bool, HabitError> {
        let day = self.clock.today();
        self.completions
            .remove_by_habit_and_day(habit_id, day)
            .await
            .map_err(HabitError::from_storage)
    }

    pub async fn today_progress(&self, owner_id: &str) -> Result<u8, HabitError> {
        let habits = self
            .habits
            .list_by_owner(owner_id)
            .await
            .map_err(HabitError::from_storage)?;
        let completions = self
            .completions
            .list_all()
            .await
            .map_err(HabitError::from_storage)?;
        Ok(today_progress(&habits, &completions, self.clock.today()))
    }

    pub async fn weekly_progress(&self, owner_id: &str) -> Result<u8, HabitError> {
        let habits = self
            .habits
            .list_by_owner(owner_id)
            .await
            .map_err(HabitError::from_storage)?;
        let completions = self
            .completions
            .list_all()
            .await
            .map_err(HabitError::from_storage)?;
        Ok(weekly_progress(&habits, &completions, self.clock.today()))
    }

    pub async fn streak(&self, habit_id: &str) -> Result<u32, HabitError> {
        let days = self.completion_days(habit_id).await?;
        Ok(streak(&days, self.clock.today()))
    }

    /// The distinct completed days of one habit, for the calendar view.
    pub async fn completion_days(&self, habit_id: &str) -> Result<BTreeSet<NaiveDate>, HabitError> {
        let completions = self
            .completions
            .list_by_habit(habit_id)
            .await
            .map_err(HabitError::from_storage)?;
        Ok(completions.into_iter().map(|c| c.day).collect())
    }

    /// Every habit of `owner_id` with its completed-today flag and streak.
    pub async fn habit_overview(&self, owner_id: &str) -> Result<Vec<HabitOverview>, HabitError> {
        let habits = self
            .habits
            .list_by_owner(owner_id)
            .await
            .map_err(HabitError::from_storage)?;
        let completions = self
            .completions
            .list_all()
            .await
            .map_err(HabitError::from_storage)?;
        let today = self.clock.today();

        let mut overview = Vec::with_capacity(habits.len());
        for habit in habits {
            let days: BTreeSet<NaiveDate> = completions
                .iter()
                .filter(|c| c.habit_id == habit.id)
                .map(|c| c.day)
                .collect();
            overview.push(HabitOverview {
                completed_today: days.contains(&today),
                streak: streak(&days, today),
                habit,
            });
        }
        Ok(overview)
    }

    fn next_id(&self) -> Arc<str> {
        self.clock.now().timestamp_millis().to_string().into()
    }
}
