//! Durable state. Every collection (habits, completions, users) is one JSON
//! document in the store directory, guarded by file locks so a toggle's
//! read-modify-write commits as a unit.

pub mod completion_store;
pub mod entities;
pub mod habit_repository;
pub mod kv_store;
