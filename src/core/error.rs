use chrono::NaiveDate;
use thiserror::Error;

/// Errors crossing the core boundary. Storage failures are fatal to the
/// operation that hit them and are surfaced to the caller unchanged, never
/// retried: masking a failed write would desynchronize the in-memory view
/// from the persisted completion log.
#[derive(Debug, Error)]
pub enum HabitError {
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[source] anyhow::Error),

    #[error("`{0}` is not a valid calendar day, expected YYYY-MM-DD")]
    InvalidCalendarDay(String),

    /// Raised by the store's guarded insert. Only reachable when a caller
    /// bypasses the toggle contract, which checks for an existing record
    /// first.
    #[error("completion already recorded for habit {habit_id} on {day}")]
    DuplicateCompletion { habit_id: String, day: NaiveDate },
}

impl HabitError {
    /// Classifies an error coming back from a store call. A typed
    /// [HabitError] raised inside the store passes through; anything else is
    /// a storage failure.
    pub fn from_storage(error: anyhow::Error) -> Self {
        match error.downcast::<HabitError>() {
            Ok(e) => e,
            Err(e) => HabitError::StorageUnavailable(e),
        }
    }
}
