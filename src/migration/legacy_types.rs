//! Legacy (v1) day log entry
//!
//! The v1 blob used the same field names as the current day log, but entries
//! were not required to repeat their own date: the object key is the date.
//! An embedded `date` field, when present, is never read.

use super::normalize::normalize_note;
use crate::habit::DayLog;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;

/// A day log as stored in the legacy `daylogs_v1` blob
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyDayLog {
    #[serde(default)]
    pub checks: BTreeMap<String, bool>,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub exclude_from_stats: bool,
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub updated_at: Option<i64>,
}

impl LegacyDayLog {
    /// Convert to the current format, dated by the blob key
    pub fn into_day_log(self, date: NaiveDate) -> DayLog {
        DayLog {
            date,
            checks: self.checks,
            note: normalize_note(&self.note),
            exclude_from_stats: self.exclude_from_stats,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_entry_without_date() {
        let legacy: LegacyDayLog =
            serde_json::from_str(r#"{"checks":{"a":true},"note":"x\r\ny","createdAt":5}"#).unwrap();
        let log = legacy.into_day_log(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(log.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert!(log.is_checked("a"));
        assert_eq!(log.note, "x\ny");
        assert_eq!(log.created_at, Some(5));
        assert_eq!(log.updated_at, None);
    }

    #[test]
    fn test_embedded_date_does_not_affect_entry() {
        let key_date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        for embedded in [r#""""#, r#""2024-1-5""#, r#""2023-07-01""#, "42", "null"] {
            let json = format!(r#"{{"date":{},"checks":{{"a":true}},"note":"keep me"}}"#, embedded);
            let legacy: LegacyDayLog = serde_json::from_str(&json).unwrap();
            let log = legacy.into_day_log(key_date);
            assert_eq!(log.date, key_date, "embedded date {}", embedded);
            assert_eq!(log.note, "keep me");
            assert!(log.is_checked("a"));
        }
    }

    #[test]
    fn test_legacy_entry_rejects_foreign_shape() {
        assert!(serde_json::from_str::<LegacyDayLog>(r#"{"checks":["a","b"]}"#).is_err());
        assert!(serde_json::from_str::<LegacyDayLog>("true").is_err());
    }
}
