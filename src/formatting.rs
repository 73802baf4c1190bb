//! Formatting helper functions for command output
//!
//! This module turns tasks, day logs, scores and history summaries into
//! plain text for display.

use crate::habit::{DayLog, MonthKey, ScoreResult, Task};
use crate::stats::HistorySummary;

/// Format a score as shown to the user: whole numbers without decimals
pub fn format_points(score: f64) -> String {
    if (score - score.round()).abs() < 1e-9 {
        format!("{}", score.round() as i64)
    } else {
        format!("{:.1}", score)
    }
}

/// Format the task list in stored order
///
/// # Arguments
/// * `tasks` - Tasks to format
///
/// # Returns
/// Formatted string representation of the tasks
pub fn format_tasks(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks defined".to_string();
    }

    let mut result = format!("{} task(s):\n\n", tasks.len());
    for (index, task) in tasks.iter().enumerate() {
        let kind = if task.is_core {
            "core".to_string()
        } else {
            format!("+{}", task.points)
        };
        let state = if task.is_active { "" } else { " (inactive)" };
        result.push_str(&format!(
            "{}. [{}] {} ({}){}\n",
            index + 1,
            task.id,
            task.title,
            kind,
            state
        ));
    }
    result
}

pub fn format_score(score: &ScoreResult) -> String {
    let mut result = format!(
        "Score: {} (core {}/{})",
        format_points(score.raw_score),
        score.core_done,
        score.core_total
    );
    match score.rank {
        Some(rank) => result.push_str(&format!(" Rank: {}", rank)),
        None if score.core_total > 0 => {
            result.push_str(&format!(" {} core task(s) left", score.core_incomplete_count))
        }
        None => {}
    }
    result
}

/// Format one day: every active task with its check state, the note, and the score
pub fn format_day(log: &DayLog, tasks: &[Task], score: &ScoreResult) -> String {
    let mut result = format!("{}\n\n", log.date);
    for task in tasks.iter().filter(|t| t.is_active) {
        let mark = if log.is_checked(&task.id) { "x" } else { " " };
        let kind = if task.is_core {
            "core".to_string()
        } else {
            format!("+{}", task.points)
        };
        result.push_str(&format!("[{}] {} ({})\n", mark, task.title, kind));
    }
    if log.has_note() {
        result.push_str(&format!("\nNote: {}\n", log.note));
    }
    if log.exclude_from_stats {
        result.push_str("\nExcluded from stats\n");
    }
    result.push('\n');
    result.push_str(&format_score(score));
    result
}

pub fn format_months(months: &[MonthKey]) -> String {
    if months.is_empty() {
        return "No logged months".to_string();
    }
    months
        .iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_history(summary: &HistorySummary) -> String {
    if summary.days.is_empty() {
        return "No days to summarize".to_string();
    }

    let mut result = String::new();
    for day in &summary.days {
        let rank = day
            .score
            .rank
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".to_string());
        let excluded = if day.excluded { " (excluded)" } else { "" };
        result.push_str(&format!(
            "{}  {:>6}  {:>3}{}\n",
            day.date,
            format_points(day.score.raw_score),
            rank,
            excluded
        ));
    }

    result.push_str(&format!("\nDays: {}\n", summary.days_counted()));
    if let Some(average) = summary.average_score {
        result.push_str(&format!("Average: {:.1}\n", average));
    }
    result.push_str(&format!("Full core days: {}\n", summary.full_core_days));
    let ranks: Vec<String> = summary
        .rank_counts
        .iter()
        .rev()
        .map(|(rank, count)| format!("{}: {}", rank, count))
        .collect();
    if !ranks.is_empty() {
        result.push_str(&format!("Ranks: {}\n", ranks.join(", ")));
    }
    result
}
