use crate::storage::DAY_LOG_SHARD_PREFIX;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Full or partial history keyed by calendar date
pub type DayLogMap = BTreeMap<NaiveDate, DayLog>;

/// Check-in record for one calendar date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayLog {
    pub date: NaiveDate,
    /// Task id → checked; only tasks toggled at least once that day appear
    #[serde(default)]
    pub checks: BTreeMap<String, bool>,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub exclude_from_stats: bool,
    /// Epoch millis of the first write; never changes afterwards
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    /// Epoch millis of the latest write
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

impl DayLog {
    /// Default record for a date that has never been written
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            checks: BTreeMap::new(),
            note: String::new(),
            exclude_from_stats: false,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn is_checked(&self, task_id: &str) -> bool {
        self.checks.get(task_id).copied().unwrap_or(false)
    }

    pub fn set_check(&mut self, task_id: &str, checked: bool) {
        self.checks.insert(task_id.to_string(), checked);
    }

    /// Flip a task's check and return the new state
    pub fn toggle(&mut self, task_id: &str) -> bool {
        let checked = !self.is_checked(task_id);
        self.set_check(task_id, checked);
        checked
    }

    pub fn has_any_check(&self) -> bool {
        self.checks.values().any(|&checked| checked)
    }

    pub fn has_note(&self) -> bool {
        !self.note.trim().is_empty()
    }

    /// True when the record carries no information worth storing
    pub fn is_empty(&self) -> bool {
        !self.has_any_check() && !self.has_note() && !self.exclude_from_stats
    }

    pub fn month(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }
}

/// Calendar month in `YYYY-MM` form
///
/// The string form sorts lexicographically in chronological order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey(String);

impl MonthKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self(format!("{:04}-{:02}", date.year(), date.month()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Storage key of this month's shard
    pub fn shard_key(&self) -> String {
        format!("{}{}", DAY_LOG_SHARD_PREFIX, self.0)
    }

    /// Parse a storage key back into a month, if it names a shard
    pub fn from_shard_key(key: &str) -> Option<Self> {
        key.strip_prefix(DAY_LOG_SHARD_PREFIX)?.parse().ok()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::from_date(date) == *self
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for MonthKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let well_formed = s.len() == 7
            && s.as_bytes()[4] == b'-'
            && NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d").is_ok();
        if well_formed {
            Ok(Self(s.to_string()))
        } else {
            Err(format!("Invalid month '{}'. Use YYYY-MM (e.g., '2024-03')", s))
        }
    }
}
