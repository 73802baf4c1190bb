//! Habit tracker domain models
//!
//! - `task`: task definitions kept in the task registry
//! - `day_log`: per-day check-in records and month shard keys
//! - `score`: derived score result and rank labels

mod day_log;
mod score;
mod task;

pub use day_log::{DayLog, DayLogMap, MonthKey};
pub use score::{Rank, ScoreResult};
pub use task::{Task, TaskDraft};
