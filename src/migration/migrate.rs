//! v1 → v2 day log migration

use super::legacy_types::LegacyDayLog;
use crate::day_logs::{parse_dated_entries, read_shard, write_shard};
use crate::habit::{DayLogMap, MonthKey};
use crate::storage::{KeyValueStore, LEGACY_BACKUP_KEY, LEGACY_DAY_LOGS_KEY, Storage};
use anyhow::Result;
use std::collections::BTreeMap;

/// What a migration run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// A legacy blob was present
    pub legacy_found: bool,
    /// The blob was copied to the backup slot during this run
    pub backed_up: bool,
    /// Entries written into month shards
    pub migrated: usize,
    /// Entries dropped because the shard already had that date
    pub kept_existing: usize,
    /// Entries dropped for an invalid key, shape, or because they were empty
    pub skipped: usize,
    /// Shards touched, oldest first
    pub months: Vec<MonthKey>,
}

/// Migrate the legacy blob into month shards, if one exists
///
/// Safe to call repeatedly: once the legacy key is gone this is a no-op.
/// A blob that isn't a JSON object migrates nothing but is still backed up
/// and removed.
pub fn migrate_legacy_day_logs<B: KeyValueStore>(
    storage: &mut Storage<B>,
) -> Result<MigrationReport> {
    let mut report = MigrationReport::default();
    let Some(raw) = storage.get_raw(LEGACY_DAY_LOGS_KEY) else {
        return Ok(report);
    };
    report.legacy_found = true;

    if storage.get_raw(LEGACY_BACKUP_KEY).is_none() {
        storage.set_raw(LEGACY_BACKUP_KEY, raw.clone())?;
        report.backed_up = true;
    }

    let mut buckets: BTreeMap<MonthKey, DayLogMap> = BTreeMap::new();
    if let Some((entries, skipped)) =
        parse_dated_entries::<LegacyDayLog>(&raw, LEGACY_DAY_LOGS_KEY)
    {
        report.skipped += skipped;
        for (date, legacy) in entries {
            let log = legacy.into_day_log(date);
            if log.is_empty() {
                report.skipped += 1;
                continue;
            }
            buckets
                .entry(MonthKey::from_date(date))
                .or_default()
                .insert(date, log);
        }
    }

    for (month, entries) in buckets {
        let mut shard = read_shard(storage, &month);
        for (date, log) in entries {
            if shard.contains_key(&date) {
                report.kept_existing += 1;
            } else {
                shard.insert(date, log);
                report.migrated += 1;
            }
        }
        write_shard(storage, &month, &shard)?;
        report.months.push(month);
    }

    storage.remove(LEGACY_DAY_LOGS_KEY)?;
    tracing::info!(
        migrated = report.migrated,
        kept_existing = report.kept_existing,
        skipped = report.skipped,
        months = report.months.len(),
        "migrated legacy day logs"
    );
    Ok(report)
}

/// Run the migration once per storage handle
pub fn ensure_migrated<B: KeyValueStore>(storage: &mut Storage<B>) -> Result<()> {
    if storage.day_logs_migrated {
        return Ok(());
    }
    migrate_legacy_day_logs(storage)?;
    storage.day_logs_migrated = true;
    Ok(())
}
