//! Pure habit semantics: calendar-day arithmetic, streak and progress
//! computation, and the completion-toggle orchestration. Everything here is
//! deterministic given a completion log and a reference day; the only I/O
//! happens through the storage traits injected into [tracker::HabitTracker].

pub mod date_window;
pub mod error;
pub mod progress;
pub mod streak;
pub mod tracker;
