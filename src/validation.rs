//! Normalization and validation rules for the task registry
//!
//! Stored task lists are corrected in place on every load and save:
//! at most [`MAX_ACTIVE_CORE_TASKS`] tasks may be active core tasks at once
//! (later ones in stored order are demoted to bonus tasks), core tasks carry
//! zero points, and bonus tasks are clamped to `MIN_POINTS..=MAX_POINTS`.
//!
//! User actions are validated up front instead and rejected with a
//! [`TaskEditError`].

use crate::error::TaskEditError;
use crate::habit::{MonthKey, Task, TaskDraft};
use chrono::NaiveDate;

pub const MAX_ACTIVE_CORE_TASKS: usize = 5;
pub const MIN_POINTS: i64 = 1;
pub const MAX_POINTS: i64 = 10;

/// Clamp a bonus task's point value into the allowed range
pub fn clamp_points(points: i64) -> i64 {
    points.clamp(MIN_POINTS, MAX_POINTS)
}

/// Apply the points rule to a single task
///
/// # Returns
/// `true` if the task was modified
pub fn normalize_task(task: &mut Task) -> bool {
    let points = if task.is_core {
        0
    } else {
        clamp_points(task.points)
    };
    let changed = task.points != points;
    task.points = points;
    changed
}

/// Enforce the core-task cap and the points rules over a whole task list
///
/// The cap is applied first so a demoted task picks up a valid bonus value.
///
/// # Returns
/// `true` if any task was modified
pub fn normalize_tasks(tasks: &mut [Task]) -> bool {
    let mut changed = false;
    let mut active_cores = 0;

    for task in tasks.iter_mut() {
        if task.is_active_core() {
            active_cores += 1;
            if active_cores > MAX_ACTIVE_CORE_TASKS {
                tracing::warn!(task_id = %task.id, "demoting core task beyond the active core limit");
                task.is_core = false;
                changed = true;
            }
        }
        if normalize_task(task) {
            changed = true;
        }
    }

    changed
}

pub fn active_core_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| t.is_active_core()).count()
}

/// Reject a blank title
pub fn validate_title(title: &str) -> Result<String, TaskEditError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(TaskEditError::BlankTitle);
    }
    Ok(title.to_string())
}

/// Check that `candidate` may become an active core task
///
/// `existing_id` names the task being edited or activated so it isn't
/// counted against itself.
pub fn ensure_core_capacity(
    tasks: &[Task],
    existing_id: Option<&str>,
) -> Result<(), TaskEditError> {
    let others = tasks
        .iter()
        .filter(|t| t.is_active_core() && Some(t.id.as_str()) != existing_id)
        .count();
    if others >= MAX_ACTIVE_CORE_TASKS {
        return Err(TaskEditError::CoreLimitReached {
            limit: MAX_ACTIVE_CORE_TASKS,
        });
    }
    Ok(())
}

/// Validate a draft and return it with a trimmed title and normalized points
pub fn validate_draft(draft: &TaskDraft) -> Result<TaskDraft, TaskEditError> {
    let title = validate_title(&draft.title)?;
    let points = if draft.is_core {
        0
    } else {
        clamp_points(draft.points)
    };
    Ok(TaskDraft {
        title,
        points,
        is_core: draft.is_core,
    })
}

/// Parse a calendar date in YYYY-MM-DD format
pub fn parse_date(date_str: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|_| {
        format!(
            "Invalid date format '{}'. Use YYYY-MM-DD (e.g., '2025-03-15')",
            date_str
        )
    })
}

/// Parse a month in YYYY-MM format
pub fn parse_month(month_str: &str) -> Result<MonthKey, String> {
    month_str.parse()
}
