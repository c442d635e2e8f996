//! Local-first habit tracker for the terminal. Habits, completions, and
//! accounts live as plain JSON documents on disk; streaks and progress are
//! recomputed from the completion log on every read, so stored facts and
//! derived numbers can never drift apart.

pub mod account;
pub mod cli;
pub mod core;
pub mod storage;
pub mod utils;
