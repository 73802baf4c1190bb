//! Habit Score Library
//!
//! Core of a personal daily-habit tracker: users define a small set of tasks,
//! check them off per day, and get a computed score and rank.
//!
//! # Architecture
//!
//! - **Domain Layer**: `habit` types and the pure `scoring` engine
//! - **Registry Layer**: `registry` (task definitions) and `day_logs`
//!   (month-sharded check-in records), both normalizing on every load
//! - **Persistence Layer**: `storage` key-value backends behind a storage
//!   handle, with `migration` from the legacy unsharded day-log format
//! - **Command Layer**: `HabitHandler` turns operations into display text
//!
//! # Example
//!
//! ```
//! use habit_score::{DayLogStore, MemoryStore, Storage, TaskDraft, TaskRegistry, compute_score};
//! use chrono::NaiveDate;
//!
//! let mut storage = Storage::new(MemoryStore::new());
//! let task = TaskRegistry::new(&mut storage)
//!     .add_task(&TaskDraft::core("Meditate"))
//!     .unwrap();
//!
//! let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
//! let log = DayLogStore::new(&mut storage).toggle_check(date, &task.id).unwrap();
//!
//! let tasks = TaskRegistry::new(&mut storage).load_tasks();
//! let score = compute_score(&tasks, &log);
//! assert_eq!(score.raw_score, 100.0);
//! ```

pub mod clock;
pub mod day_logs;
pub mod error;
pub mod formatting;
pub mod habit;
pub mod handlers;
pub mod migration;
pub mod registry;
pub mod scoring;
pub mod stats;
pub mod storage;
pub mod validation;

use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use std::path::Path;

// Re-export commonly used types
pub use clock::{Clock, FixedClock, SystemClock, local_date_today};
pub use day_logs::DayLogStore;
pub use error::TaskEditError;
pub use habit::{DayLog, DayLogMap, MonthKey, Rank, ScoreResult, Task, TaskDraft};
pub use registry::TaskRegistry;
pub use scoring::{compute_score, rank_of};
pub use stats::{HistoryOptions, HistorySummary, summarize_history};
pub use storage::{FileStore, KeyValueStore, MemoryStore, Storage};

/// Command handler for the habit tracker
///
/// Owns the storage handle and exposes one `handle_*` method per command,
/// each returning display text. Commands are implemented in `handlers`.
pub struct HabitHandler<B: KeyValueStore = FileStore> {
    pub(crate) storage: Storage<B>,
    pub(crate) today: NaiveDate,
}

impl HabitHandler<FileStore> {
    /// Open a handler on a TOML data file
    ///
    /// # Arguments
    /// * `storage_path` - Path to the data file; created on first write
    ///
    /// # Example
    /// ```no_run
    /// # use habit_score::HabitHandler;
    /// # use anyhow::Result;
    /// # fn main() -> Result<()> {
    /// let mut handler = HabitHandler::open("habits.toml")?;
    /// println!("{}", handler.handle_tasks());
    /// # Ok(())
    /// # }
    /// ```
    pub fn open(storage_path: impl AsRef<Path>) -> Result<Self> {
        let store = FileStore::open(storage_path)?;
        Ok(Self::with_storage(Storage::new(store), local_date_today()))
    }
}

impl<B: KeyValueStore> HabitHandler<B> {
    pub fn with_storage(storage: Storage<B>, today: NaiveDate) -> Self {
        Self { storage, today }
    }

    pub fn storage(&self) -> &Storage<B> {
        &self.storage
    }

    pub(crate) fn tasks(&mut self) -> TaskRegistry<'_, B> {
        TaskRegistry::new(&mut self.storage)
    }

    pub(crate) fn day_logs(&mut self) -> DayLogStore<'_, B> {
        DayLogStore::new(&mut self.storage)
    }

    /// Resolve an optional date argument, defaulting to today
    pub(crate) fn resolve_date(&self, date: Option<&str>) -> Result<NaiveDate> {
        match date {
            Some(date_str) => validation::parse_date(date_str).map_err(|e| anyhow!(e)),
            None => Ok(self.today),
        }
    }

    /// Resolve a task reference: exact id, 1-based position, unique id prefix,
    /// or case-insensitive title
    pub(crate) fn resolve_task_id(&mut self, query: &str) -> Result<String> {
        let query = query.trim();
        let tasks = self.tasks().load_tasks();

        if let Some(task) = tasks.iter().find(|t| t.id == query) {
            return Ok(task.id.clone());
        }
        if let Ok(position) = query.parse::<usize>()
            && let Some(task) = position.checked_sub(1).and_then(|i| tasks.get(i))
        {
            return Ok(task.id.clone());
        }

        let by_prefix: Vec<&Task> = tasks.iter().filter(|t| t.id.starts_with(query)).collect();
        if by_prefix.len() == 1 {
            return Ok(by_prefix[0].id.clone());
        }
        let by_title: Vec<&Task> = tasks
            .iter()
            .filter(|t| t.title.eq_ignore_ascii_case(query))
            .collect();
        if by_title.len() == 1 {
            return Ok(by_title[0].id.clone());
        }

        if by_prefix.len() > 1 || by_title.len() > 1 {
            Err(anyhow!("Task reference '{}' is ambiguous", query))
        } else {
            Err(TaskEditError::UnknownTask(query.to_string()).into())
        }
    }
}
