//! Day log store
//!
//! Day logs are sharded by calendar month: each `daylogs_v2_<YYYY-MM>` key
//! holds a JSON object mapping date → day log. Every write reads the full
//! shard, mutates it and writes it back. Empty logs are deleted instead of
//! stored, and a shard that ends up empty is removed entirely.
//!
//! Every operation first makes sure the legacy unsharded blob has been
//! migrated (see [`crate::migration`]).

use crate::habit::{DayLog, DayLogMap, MonthKey};
use crate::migration::{ensure_migrated, normalize_note};
use crate::storage::{KeyValueStore, Storage};
use anyhow::Result;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

/// Parse a JSON object keyed by `YYYY-MM-DD`
///
/// Returns `None` if `raw` isn't a JSON object. Entries whose key isn't a
/// date or whose value doesn't match `T` are dropped and counted.
pub(crate) fn parse_dated_entries<T: DeserializeOwned>(
    raw: &str,
    source: &str,
) -> Option<(Vec<(NaiveDate, T)>, usize)> {
    let object: serde_json::Map<String, serde_json::Value> = match serde_json::from_str(raw) {
        Ok(object) => object,
        Err(e) => {
            tracing::debug!(source, error = %e, "stored day logs are not a JSON object");
            return None;
        }
    };

    let mut entries = Vec::with_capacity(object.len());
    let mut skipped = 0;
    for (key, value) in object {
        let Ok(date) = NaiveDate::parse_from_str(&key, "%Y-%m-%d") else {
            tracing::warn!(source, key = %key, "skipping day log with invalid date key");
            skipped += 1;
            continue;
        };
        match serde_json::from_value::<T>(value) {
            Ok(entry) => entries.push((date, entry)),
            Err(e) => {
                tracing::warn!(source, key = %key, error = %e, "skipping malformed day log");
                skipped += 1;
            }
        }
    }
    Some((entries, skipped))
}

/// Read one month shard; missing or malformed shards read as empty
pub(crate) fn read_shard<B: KeyValueStore>(storage: &Storage<B>, month: &MonthKey) -> DayLogMap {
    let key = month.shard_key();
    let Some(raw) = storage.get_raw(&key) else {
        return DayLogMap::new();
    };
    let Some((entries, _)) = parse_dated_entries::<DayLog>(&raw, &key) else {
        return DayLogMap::new();
    };

    entries
        .into_iter()
        .filter(|(date, _)| month.contains(*date))
        .map(|(date, mut log)| {
            log.date = date;
            (date, log)
        })
        .collect()
}

/// Write one month shard in full, removing it when nothing is left
pub(crate) fn write_shard<B: KeyValueStore>(
    storage: &mut Storage<B>,
    month: &MonthKey,
    shard: &DayLogMap,
) -> Result<()> {
    let key = month.shard_key();
    if shard.is_empty() {
        storage.remove(&key)
    } else {
        storage.write_json(&key, shard)
    }
}

pub struct DayLogStore<'s, B: KeyValueStore> {
    storage: &'s mut Storage<B>,
}

impl<'s, B: KeyValueStore> DayLogStore<'s, B> {
    pub fn new(storage: &'s mut Storage<B>) -> Self {
        Self { storage }
    }

    fn prepare(&mut self) {
        if let Err(e) = ensure_migrated(self.storage) {
            tracing::warn!(error = %format!("{:#}", e), "legacy day log migration failed; will retry");
        }
    }

    /// Stored record for `date`, or an unstamped default
    pub fn get_day_log(&mut self, date: NaiveDate) -> DayLog {
        self.prepare();
        read_shard(self.storage, &MonthKey::from_date(date))
            .remove(&date)
            .unwrap_or_else(|| DayLog::new(date))
    }

    /// Write `log` into its month shard
    ///
    /// `createdAt` keeps the first stored value; `updatedAt` is stamped with
    /// the current time. An empty log deletes the stored record instead.
    ///
    /// # Returns
    /// The record as it now reads back
    pub fn upsert_day_log(&mut self, log: &DayLog) -> Result<DayLog> {
        self.prepare();
        let month = log.month();
        let mut shard = read_shard(self.storage, &month);

        if log.is_empty() {
            if shard.remove(&log.date).is_some() {
                write_shard(self.storage, &month, &shard)?;
            }
            return Ok(DayLog::new(log.date));
        }

        let now = self.storage.now_millis();
        let created_at = shard
            .get(&log.date)
            .and_then(|existing| existing.created_at)
            .or(log.created_at)
            .unwrap_or(now);

        let mut stored = log.clone();
        stored.created_at = Some(created_at);
        stored.updated_at = Some(now);
        shard.insert(stored.date, stored.clone());
        write_shard(self.storage, &month, &shard)?;
        Ok(stored)
    }

    pub fn delete_day_log(&mut self, date: NaiveDate) -> Result<()> {
        self.prepare();
        let month = MonthKey::from_date(date);
        let mut shard = read_shard(self.storage, &month);
        if shard.remove(&date).is_some() {
            write_shard(self.storage, &month, &shard)?;
        }
        Ok(())
    }

    /// Months with a stored shard, most recent first
    pub fn list_available_months(&mut self) -> Vec<MonthKey> {
        self.prepare();
        let mut months: Vec<MonthKey> = self
            .storage
            .keys()
            .iter()
            .filter_map(|key| MonthKey::from_shard_key(key))
            .collect();
        months.sort_by(|a, b| b.cmp(a));
        months.dedup();
        months
    }

    pub fn load_day_log_map_for_month(&mut self, month: &MonthKey) -> DayLogMap {
        self.prepare();
        read_shard(self.storage, month)
    }

    /// Full history across every month shard
    pub fn load_day_log_map(&mut self) -> DayLogMap {
        let mut all = DayLogMap::new();
        for month in self.list_available_months() {
            all.extend(read_shard(self.storage, &month));
        }
        all
    }

    /// Replace the full history
    ///
    /// Logs are re-bucketed by month and written verbatim; empty logs are
    /// dropped and shards for months absent from `logs` are removed.
    pub fn save_day_log_map(&mut self, logs: &DayLogMap) -> Result<()> {
        let existing = self.list_available_months();

        let mut buckets: BTreeMap<MonthKey, DayLogMap> = BTreeMap::new();
        for (date, log) in logs {
            if log.is_empty() {
                continue;
            }
            let mut log = log.clone();
            log.date = *date;
            buckets
                .entry(MonthKey::from_date(*date))
                .or_default()
                .insert(*date, log);
        }

        for month in existing.iter().filter(|m| !buckets.contains_key(*m)) {
            write_shard(self.storage, month, &DayLogMap::new())?;
        }
        for (month, shard) in &buckets {
            write_shard(self.storage, month, shard)?;
        }
        Ok(())
    }

    /// Flip one task's check for `date`
    pub fn toggle_check(&mut self, date: NaiveDate, task_id: &str) -> Result<DayLog> {
        let mut log = self.get_day_log(date);
        log.toggle(task_id);
        self.upsert_day_log(&log)
    }

    pub fn set_note(&mut self, date: NaiveDate, note: &str) -> Result<DayLog> {
        let mut log = self.get_day_log(date);
        log.note = normalize_note(note);
        self.upsert_day_log(&log)
    }

    pub fn set_exclude_from_stats(&mut self, date: NaiveDate, exclude: bool) -> Result<DayLog> {
        let mut log = self.get_day_log(date);
        log.exclude_from_stats = exclude;
        self.upsert_day_log(&log)
    }
}
