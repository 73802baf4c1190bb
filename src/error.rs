//! Recoverable errors reported back to the user
//!
//! Malformed persisted data is never an error (it reads as absent), and
//! out-of-range stored values are corrected silently on load. The errors
//! here only block the single mutating action that triggered them.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskEditError {
    #[error("Task title must not be blank")]
    BlankTitle,

    #[error("At most {limit} active core tasks are allowed")]
    CoreLimitReached { limit: usize },

    #[error("Task not found: {0}")]
    UnknownTask(String),

    #[error("Failed to save tasks: {0}")]
    Storage(String),
}

impl From<anyhow::Error> for TaskEditError {
    fn from(e: anyhow::Error) -> Self {
        TaskEditError::Storage(format!("{:#}", e))
    }
}
