//! Task registry commands

use crate::formatting;
use crate::habit::TaskDraft;
use crate::{HabitHandler, KeyValueStore};
use anyhow::Result;

impl<B: KeyValueStore> HabitHandler<B> {
    pub fn handle_tasks(&mut self) -> String {
        let tasks = self.tasks().load_tasks();
        formatting::format_tasks(&tasks)
    }

    pub fn handle_add_task(&mut self, title: &str, points: i64, core: bool) -> Result<String> {
        let draft = TaskDraft {
            title: title.to_string(),
            points,
            is_core: core,
        };
        let task = self.tasks().add_task(&draft)?;
        Ok(format!("Task created with ID: {} ({})", task.id, task.title))
    }

    pub fn handle_edit_task(
        &mut self,
        task_ref: &str,
        title: Option<&str>,
        points: Option<i64>,
        core: Option<bool>,
    ) -> Result<String> {
        let id = self.resolve_task_id(task_ref)?;
        let tasks = self.tasks().load_tasks();
        let current = tasks
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| crate::TaskEditError::UnknownTask(id.clone()))?;

        let draft = TaskDraft {
            title: title.unwrap_or(current.title.as_str()).to_string(),
            points: points.unwrap_or(current.points),
            is_core: core.unwrap_or(current.is_core),
        };
        let task = self.tasks().update_task(&id, &draft)?;
        Ok(format!("Task {} updated ({})", task.id, task.title))
    }

    pub fn handle_set_active(&mut self, task_ref: &str, active: bool) -> Result<String> {
        let id = self.resolve_task_id(task_ref)?;
        let task = self.tasks().set_active(&id, active)?;
        let state = if active { "activated" } else { "deactivated" };
        Ok(format!("Task {} {} ({})", task.id, state, task.title))
    }

    pub fn handle_remove_task(&mut self, task_ref: &str) -> Result<String> {
        let id = self.resolve_task_id(task_ref)?;
        let task = self.tasks().remove_task(&id)?;
        Ok(format!("Task {} removed ({})", task.id, task.title))
    }

    /// Move a task to a 1-based position
    pub fn handle_move_task(&mut self, task_ref: &str, position: usize) -> Result<String> {
        let id = self.resolve_task_id(task_ref)?;
        let tasks = self.tasks().move_task(&id, position.saturating_sub(1))?;
        Ok(formatting::format_tasks(&tasks))
    }
}
