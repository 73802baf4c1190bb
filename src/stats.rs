//! History summary over stored day logs
//!
//! Which days count toward averages:
//! - days after `today` never count
//! - days marked `excludeFromStats` count only when `include_excluded` is set
//! - only days with some input (a checked task or a non-blank note) count
//!
//! Every day is scored against the current task registry snapshot.

use crate::habit::{DayLog, DayLogMap, Rank, ScoreResult, Task};
use crate::scoring::compute_score;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryOptions {
    pub today: NaiveDate,
    pub include_excluded: bool,
}

impl HistoryOptions {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            include_excluded: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayScore {
    pub date: NaiveDate,
    pub excluded: bool,
    pub score: ScoreResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySummary {
    /// Counted days, oldest first
    pub days: Vec<DayScore>,
    pub average_score: Option<f64>,
    /// Days on which every active core task was done
    pub full_core_days: usize,
    pub rank_counts: BTreeMap<Rank, usize>,
}

impl HistorySummary {
    pub fn days_counted(&self) -> usize {
        self.days.len()
    }
}

/// Whether a day log takes part in the history summary
pub fn counts_toward_stats(log: &DayLog, options: &HistoryOptions) -> bool {
    if log.date > options.today {
        return false;
    }
    if log.exclude_from_stats && !options.include_excluded {
        return false;
    }
    log.has_any_check() || log.has_note()
}

pub fn summarize_history(
    tasks: &[Task],
    logs: &DayLogMap,
    options: &HistoryOptions,
) -> HistorySummary {
    let days: Vec<DayScore> = logs
        .values()
        .filter(|log| counts_toward_stats(log, options))
        .map(|log| DayScore {
            date: log.date,
            excluded: log.exclude_from_stats,
            score: compute_score(tasks, log),
        })
        .collect();

    let average_score = if days.is_empty() {
        None
    } else {
        let total: f64 = days.iter().map(|d| d.score.raw_score).sum();
        Some(total / days.len() as f64)
    };

    let mut rank_counts = BTreeMap::new();
    for rank in days.iter().filter_map(|d| d.score.rank) {
        *rank_counts.entry(rank).or_insert(0) += 1;
    }

    HistorySummary {
        full_core_days: days.iter().filter(|d| d.score.show_rank).count(),
        days,
        average_score,
        rank_counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tasks() -> Vec<Task> {
        vec![
            Task {
                id: "core".to_string(),
                title: "Core".to_string(),
                points: 0,
                is_core: true,
                is_active: true,
            },
            Task {
                id: "bonus".to_string(),
                title: "Bonus".to_string(),
                points: 10,
                is_core: false,
                is_active: true,
            },
        ]
    }

    fn logs() -> DayLogMap {
        let mut map = DayLogMap::new();
        let mut add = |d: NaiveDate, checks: &[&str], note: &str, excluded: bool| {
            let mut log = DayLog::new(d);
            for id in checks {
                log.set_check(id, true);
            }
            log.note = note.to_string();
            log.exclude_from_stats = excluded;
            map.insert(d, log);
        };
        add(date(2024, 3, 1), &["core", "bonus"], "", false);
        add(date(2024, 3, 2), &["core"], "", false);
        add(date(2024, 3, 3), &[], "sick", false);
        add(date(2024, 3, 4), &["core"], "", true);
        add(date(2024, 3, 5), &[], "", true);
        add(date(2024, 3, 9), &["core"], "", false);
        map
    }

    #[test]
    fn test_default_policy() {
        let summary = summarize_history(&tasks(), &logs(), &HistoryOptions::new(date(2024, 3, 8)));
        let dates: Vec<NaiveDate> = summary.days.iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![date(2024, 3, 1), date(2024, 3, 2), date(2024, 3, 3)]);
        assert_eq!(summary.average_score, Some((110.0 + 100.0 + 0.0) / 3.0));
        assert_eq!(summary.full_core_days, 2);
        assert_eq!(summary.rank_counts.get(&Rank::S), Some(&1));
        assert_eq!(summary.rank_counts.get(&Rank::A), Some(&1));
    }

    #[test]
    fn test_include_excluded_still_needs_input() {
        let options = HistoryOptions {
            today: date(2024, 3, 8),
            include_excluded: true,
        };
        let summary = summarize_history(&tasks(), &logs(), &options);
        assert_eq!(summary.days_counted(), 4);
        assert!(summary.days.iter().any(|d| d.excluded));
    }

    #[test]
    fn test_future_days_never_count() {
        let options = HistoryOptions {
            today: date(2024, 2, 1),
            include_excluded: true,
        };
        let summary = summarize_history(&tasks(), &logs(), &options);
        assert_eq!(summary.days_counted(), 0);
        assert_eq!(summary.average_score, None);
    }
}
