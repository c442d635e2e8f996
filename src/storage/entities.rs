use std::fmt::Display;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A recurring habit owned by exactly one user. Immutable after creation
/// apart from deletion, which cascades to its completions.
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
pub struct HabitEntity {
    pub id: Arc<str>,
    pub name: Arc<str>,
    pub frequency: HabitFrequency,
    pub owner_id: Arc<str>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,
}

#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum HabitFrequency {
    Daily,
    Weekly,
}

impl Display for HabitFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HabitFrequency::Daily => write!(f, "daily"),
            HabitFrequency::Weekly => write!(f, "weekly"),
        }
    }
}

/// The fact that a habit was performed on a calendar day. At most one may
/// exist per (habit, day); completions are inserted and removed, never
/// edited. `day` serializes as `YYYY-MM-DD`.
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
pub struct CompletionEntity {
    pub id: Arc<str>,
    pub habit_id: Arc<str>,
    pub day: NaiveDate,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub recorded_at: DateTime<Utc>,
}

/// A registered account. The password is stored as typed; hardening local
/// credentials is out of scope for a single-user device file.
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
pub struct UserEntity {
    pub id: Arc<str>,
    pub name: Arc<str>,
    pub email: Arc<str>,
    pub password: Arc<str>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,
}
