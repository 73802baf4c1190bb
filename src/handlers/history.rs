//! Month listing and history summary commands

use crate::formatting;
use crate::stats::{HistoryOptions, summarize_history};
use crate::validation;
use crate::{HabitHandler, KeyValueStore};
use anyhow::{Result, anyhow};

impl<B: KeyValueStore> HabitHandler<B> {
    pub fn handle_months(&mut self) -> String {
        let months = self.day_logs().list_available_months();
        formatting::format_months(&months)
    }

    /// Summarize one month, or the full history when `month` is `None`
    pub fn handle_history(&mut self, month: Option<&str>, include_excluded: bool) -> Result<String> {
        let logs = match month {
            Some(month_str) => {
                let month = validation::parse_month(month_str).map_err(|e| anyhow!(e))?;
                self.day_logs().load_day_log_map_for_month(&month)
            }
            None => self.day_logs().load_day_log_map(),
        };
        let tasks = self.tasks().load_tasks();
        let options = HistoryOptions {
            today: self.today,
            include_excluded,
        };
        let summary = summarize_history(&tasks, &logs, &options);
        Ok(formatting::format_history(&summary))
    }
}
