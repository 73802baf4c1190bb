//! Scoring engine
//!
//! Active core tasks split a fixed pool of 100 points evenly; active bonus
//! tasks add their own point value on top, uncapped. A rank is only shown
//! once every active core task is done.

use crate::habit::{DayLog, Rank, ScoreResult, Task};

/// Points shared by all active core tasks
pub const CORE_POOL: f64 = 100.0;

/// Inclusive lower bounds, highest first
const RANK_THRESHOLDS: [(f64, Rank); 3] = [(150.0, Rank::SSS), (120.0, Rank::SS), (101.0, Rank::S)];

/// Map a raw score to its rank label
pub fn rank_of(raw_score: f64) -> Rank {
    RANK_THRESHOLDS
        .iter()
        .find(|(threshold, _)| raw_score >= *threshold)
        .map(|(_, rank)| *rank)
        .unwrap_or(Rank::A)
}

/// Compute the score of one day against a task registry snapshot
pub fn compute_score(tasks: &[Task], log: &DayLog) -> ScoreResult {
    let (cores, bonuses): (Vec<&Task>, Vec<&Task>) =
        tasks.iter().filter(|t| t.is_active).partition(|t| t.is_core);

    let core_total = cores.len();
    let core_unit = if core_total > 0 {
        CORE_POOL / core_total as f64
    } else {
        0.0
    };

    let core_done = cores.iter().filter(|t| log.is_checked(&t.id)).count();
    let core_incomplete_count = core_total - core_done;

    // f64: stored points are not guaranteed to be clamped
    let bonus_score: f64 = bonuses
        .iter()
        .filter(|t| log.is_checked(&t.id))
        .map(|t| t.points as f64)
        .sum();

    let raw_score = core_done as f64 * core_unit + bonus_score;
    let show_rank = core_total > 0 && core_incomplete_count == 0;

    ScoreResult {
        raw_score,
        core_total,
        core_done,
        core_incomplete_count,
        show_rank,
        rank: show_rank.then(|| rank_of(raw_score)),
    }
}
