use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::core::error::HabitError;

use super::{entities::CompletionEntity, kv_store::KvStore};

/// Append/remove log of (habit, day) completion facts. Implementations must
/// reject an insert that would create a second record for the same pair.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<CompletionEntity>>;

    async fn list_by_habit(&self, habit_id: &str) -> Result<Vec<CompletionEntity>>;

    async fn insert(&self, completion: CompletionEntity) -> Result<()>;

    /// Returns whether a record was removed.
    async fn remove_by_habit_and_day(&self, habit_id: &str, day: NaiveDate) -> Result<bool>;

    /// Cascade support for habit deletion.
    async fn remove_by_habit(&self, habit_id: &str) -> Result<()>;
}

const COMPLETIONS_KEY: &str = "completions";

/// The main realization of [CompletionStore], one JSON document holding the
/// whole log. Volumes are single-user and local, so rewriting the document
/// per toggle is fine.
#[derive(Clone)]
pub struct KvCompletionStore {
    store: KvStore,
}

impl KvCompletionStore {
    pub fn new(store: KvStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CompletionStore for KvCompletionStore {
    async fn list_all(&self) -> Result<Vec<CompletionEntity>> {
        Ok(self
            .store
            .get::<Vec<CompletionEntity>>(COMPLETIONS_KEY)
            .await?
            .unwrap_or_default())
    }

    async fn list_by_habit(&self, habit_id: &str) -> Result<Vec<CompletionEntity>> {
        let mut all = self.list_all().await?;
        all.retain(|c| &*c.habit_id == habit_id);
        Ok(all)
    }

    async fn insert(&self, completion: CompletionEntity) -> Result<()> {
        // The duplicate check runs inside the exclusive-lock critical
        // section, so two concurrent toggles cannot both pass it.
        self.store
            .update(COMPLETIONS_KEY, |mut all: Vec<CompletionEntity>| {
                if all
                    .iter()
                    .any(|c| c.habit_id == completion.habit_id && c.day == completion.day)
                {
                    return Err(HabitError::DuplicateCompletion {
                        habit_id: completion.habit_id.to_string(),
                        day: completion.day,
                    }
                    .into());
                }
                all.push(completion);
                Ok(all)
            })
            .await
    }

    async fn remove_by_habit_and_day(&self, habit_id: &str, day: NaiveDate) -> Result<bool> {
        let mut removed = false;
        self.store
            .update(COMPLETIONS_KEY, |mut all: Vec<CompletionEntity>| {
                let before = all.len();
                all.retain(|c| !(&*c.habit_id == habit_id && c.day == day));
                removed = all.len() != before;
                Ok(all)
            })
            .await?;
        Ok(removed)
    }

    async fn remove_by_habit(&self, habit_id: &str) -> Result<()> {
        self.store
            .update(COMPLETIONS_KEY, |mut all: Vec<CompletionEntity>| {
                all.retain(|c| &*c.habit_id != habit_id);
                Ok(all)
            })
            .await
    }
}
