//! Task registry
//!
//! Owns the persisted task list. Loading never fails: missing or corrupt
//! data reads as an empty list, and out-of-range values are corrected and
//! written back so storage heals itself on the next load.

use crate::error::TaskEditError;
use crate::habit::{Task, TaskDraft};
use crate::storage::{KeyValueStore, Storage, TASKS_KEY};
use crate::validation::{ensure_core_capacity, normalize_tasks, validate_draft};
use anyhow::Result;
use uuid::Uuid;

pub struct TaskRegistry<'s, B: KeyValueStore> {
    storage: &'s mut Storage<B>,
}

impl<'s, B: KeyValueStore> TaskRegistry<'s, B> {
    pub fn new(storage: &'s mut Storage<B>) -> Self {
        Self { storage }
    }

    /// Load the task list, normalizing and persisting corrections
    pub fn load_tasks(&mut self) -> Vec<Task> {
        let mut tasks: Vec<Task> = self.storage.read_json(TASKS_KEY).unwrap_or_default();
        if normalize_tasks(&mut tasks) {
            tracing::info!(count = tasks.len(), "normalized stored tasks");
            if let Err(e) = self.storage.write_json(TASKS_KEY, &tasks) {
                tracing::warn!(error = %e, "failed to persist normalized tasks");
            }
        }
        tasks
    }

    /// Replace the stored task list in a single overwrite
    pub fn save_tasks(&mut self, tasks: &[Task]) -> Result<()> {
        let mut tasks = tasks.to_vec();
        normalize_tasks(&mut tasks);
        self.storage.write_json(TASKS_KEY, &tasks)
    }

    /// Create a new active task with a fresh id
    pub fn add_task(&mut self, draft: &TaskDraft) -> Result<Task, TaskEditError> {
        let draft = validate_draft(draft)?;
        let mut tasks = self.load_tasks();
        if draft.is_core {
            ensure_core_capacity(&tasks, None)?;
        }

        let task = Task {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            points: draft.points,
            is_core: draft.is_core,
            is_active: true,
        };
        tasks.push(task.clone());
        self.save_tasks(&tasks)?;
        Ok(task)
    }

    /// Replace the title, points and core flag of an existing task
    pub fn update_task(&mut self, id: &str, draft: &TaskDraft) -> Result<Task, TaskEditError> {
        let draft = validate_draft(draft)?;
        let mut tasks = self.load_tasks();
        let index = position(&tasks, id)?;
        if draft.is_core && tasks[index].is_active {
            ensure_core_capacity(&tasks, Some(id))?;
        }

        let task = &mut tasks[index];
        task.title = draft.title;
        task.points = draft.points;
        task.is_core = draft.is_core;
        let updated = task.clone();

        self.save_tasks(&tasks)?;
        Ok(updated)
    }

    /// Activate or deactivate a task
    pub fn set_active(&mut self, id: &str, active: bool) -> Result<Task, TaskEditError> {
        let mut tasks = self.load_tasks();
        let index = position(&tasks, id)?;
        if active && tasks[index].is_core && !tasks[index].is_active {
            ensure_core_capacity(&tasks, Some(id))?;
        }

        tasks[index].is_active = active;
        let updated = tasks[index].clone();
        self.save_tasks(&tasks)?;
        Ok(updated)
    }

    /// Remove a task from the list; day logs keep their stale check entries
    pub fn remove_task(&mut self, id: &str) -> Result<Task, TaskEditError> {
        let mut tasks = self.load_tasks();
        let index = position(&tasks, id)?;
        let removed = tasks.remove(index);
        self.save_tasks(&tasks)?;
        Ok(removed)
    }

    /// Move a task to `new_index`, clamped to the end of the list
    pub fn move_task(&mut self, id: &str, new_index: usize) -> Result<Vec<Task>, TaskEditError> {
        let mut tasks = self.load_tasks();
        let index = position(&tasks, id)?;
        let task = tasks.remove(index);
        let new_index = new_index.min(tasks.len());
        tasks.insert(new_index, task);
        self.save_tasks(&tasks)?;
        Ok(tasks)
    }
}

fn position(tasks: &[Task], id: &str) -> Result<usize, TaskEditError> {
    tasks
        .iter()
        .position(|t| t.id == id)
        .ok_or_else(|| TaskEditError::UnknownTask(id.to_string()))
}
