use serde::Serialize;
use std::fmt;

/// Coarse label for a fully core-complete day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Rank {
    A,
    S,
    SS,
    SSS,
}

impl Rank {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::A => "A",
            Rank::S => "S",
            Rank::SS => "SS",
            Rank::SSS => "SSS",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived score for one day; never persisted
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub raw_score: f64,
    pub core_total: usize,
    pub core_done: usize,
    pub core_incomplete_count: usize,
    pub show_rank: bool,
    pub rank: Option<Rank>,
}
