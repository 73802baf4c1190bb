//! Per-day check-in commands

use crate::formatting;
use crate::scoring::compute_score;
use crate::{DayLog, HabitHandler, KeyValueStore};
use anyhow::Result;

impl<B: KeyValueStore> HabitHandler<B> {
    fn render_day(&mut self, log: &DayLog) -> String {
        let tasks = self.tasks().load_tasks();
        let score = compute_score(&tasks, log);
        formatting::format_day(log, &tasks, &score)
    }

    pub fn handle_day(&mut self, date: Option<&str>, json: bool) -> Result<String> {
        let date = self.resolve_date(date)?;
        let log = self.day_logs().get_day_log(date);
        if json {
            let tasks = self.tasks().load_tasks();
            let score = compute_score(&tasks, &log);
            return Ok(serde_json::to_string_pretty(&score)?);
        }
        Ok(self.render_day(&log))
    }

    pub fn handle_check(&mut self, date: Option<&str>, task_ref: &str) -> Result<String> {
        let date = self.resolve_date(date)?;
        let id = self.resolve_task_id(task_ref)?;
        let log = self.day_logs().toggle_check(date, &id)?;
        Ok(self.render_day(&log))
    }

    pub fn handle_note(&mut self, date: Option<&str>, note: &str) -> Result<String> {
        let date = self.resolve_date(date)?;
        let log = self.day_logs().set_note(date, note)?;
        Ok(self.render_day(&log))
    }

    pub fn handle_exclude(&mut self, date: Option<&str>, exclude: bool) -> Result<String> {
        let date = self.resolve_date(date)?;
        let log = self.day_logs().set_exclude_from_stats(date, exclude)?;
        Ok(self.render_day(&log))
    }

    pub fn handle_clear_day(&mut self, date: Option<&str>) -> Result<String> {
        let date = self.resolve_date(date)?;
        self.day_logs().delete_day_log(date)?;
        Ok(format!("Cleared {}", date))
    }
}
