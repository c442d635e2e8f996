use anyhow::Result;
use async_trait::async_trait;

use super::{entities::HabitEntity, kv_store::KvStore};

/// Read/write access to habit records. The core mostly needs the read-only
/// owner-filtered view; inserts and removals come from explicit user actions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HabitRepository: Send + Sync {
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<HabitEntity>>;

    async fn get(&self, habit_id: &str) -> Result<Option<HabitEntity>>;

    async fn insert(&self, habit: HabitEntity) -> Result<()>;

    /// Returns whether a record was removed.
    async fn remove(&self, habit_id: &str) -> Result<bool>;
}

const HABITS_KEY: &str = "habits";

/// The main realization of [HabitRepository].
#[derive(Clone)]
pub struct KvHabitRepository {
    store: KvStore,
}

impl KvHabitRepository {
    pub fn new(store: KvStore) -> Self {
        Self { store }
    }

    async fn list_all(&self) -> Result<Vec<HabitEntity>> {
        Ok(self
            .store
            .get::<Vec<HabitEntity>>(HABITS_KEY)
            .await?
            .unwrap_or_default())
    }
}

#[async_trait]
impl HabitRepository for KvHabitRepository {
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<HabitEntity>> {
        let mut all = self.list_all().await?;
        all.retain(|h| &*h.owner_id == owner_id);
        Ok(all)
    }

    async fn get(&self, habit_id: &str) -> Result<Option<HabitEntity>> {
        Ok(self
            .list_all()
            .await?
            .into_iter()
            .find(|h| &*h.id == habit_id))
    }

    async fn insert(&self, habit: HabitEntity) -> Result<()> {
        self.store
            .update(HABITS_KEY, |mut all: Vec<HabitEntity>| {
                all.push(habit);
                Ok(all)
            })
            .await
    }

    async fn remove(&self, habit_id: &str) -> Result<bool> {
        let mut removed = false;
        self.store
            .update(HABITS_KEY, |mut all: Vec<HabitEntity>| {
                let before = all.len();
                all.retain(|h| &*h.id != habit_id);
                removed = all.len() != before;
                Ok(all)
            })
            .await?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    use crate::storage::entities::HabitFrequency;

    use super::*;

    fn habit(id: &str, owner_id: &str) -> HabitEntity {
        HabitEntity {
            id: id.into(),
            name: "Meditate".into(),
            frequency: HabitFrequency::Daily,
            owner_id: owner_id.into(),
            created_at: Utc.with_ymd_and_hms(2025, 3, 1, 7, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_owner_filtered_listing() -> Result<()> {
        let dir = tempdir()?;
        let repository = KvHabitRepository::new(KvStore::new(dir.path().to_owned())?);
        repository.insert(habit("h1", "u1")).await?;
        repository.insert(habit("h2", "u2")).await?;
        repository.insert(habit("h3", "u1")).await?;

        let habits = repository.list_by_owner("u1").await?;
        assert_eq!(habits.len(), 2);
        assert!(habits.iter().all(|h| &*h.owner_id == "u1"));
        assert!(repository.list_by_owner("u3").await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_get_and_remove() -> Result<()> {
        let dir = tempdir()?;
        let repository = KvHabitRepository::new(KvStore::new(dir.path().to_owned())?);
        repository.insert(habit("h1", "u1")).await?;

        assert!(repository.get("h1").await?.is_some());
        assert!(repository.get("h9").await?.is_none());

        assert!(repository.remove("h1").await?);
        assert!(!repository.remove("h1").await?);
        assert!(repository.get("h1").await?.is_none());
        Ok(())
    }
}
