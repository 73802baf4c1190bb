//! Legacy day log migration tests
//!
//! These tests verify the one-time move from the unsharded `daylogs_v1`
//! blob to month shards.

mod common;

use common::{date, memory_storage, reopen};
use habit_score::migration::migrate_legacy_day_logs;
use habit_score::storage::{LEGACY_BACKUP_KEY, LEGACY_DAY_LOGS_KEY};
use habit_score::{DayLogStore, KeyValueStore};

const LEGACY_BLOB: &str = r#"{"2024-01-15":{"date":"2024-01-15","checks":{"a":true},"note":"","excludeFromStats":false,"createdAt":100,"updatedAt":200},"2024-02-01":{"date":"2024-02-01","checks":{},"note":"rest day","excludeFromStats":true}}"#;

#[test]
fn test_migration_scenario() {
    let (mut storage, _) = memory_storage(1_000);
    storage
        .set_raw(LEGACY_DAY_LOGS_KEY, LEGACY_BLOB.to_string())
        .unwrap();

    let mut store = DayLogStore::new(&mut storage);
    let months: Vec<String> = store
        .list_available_months()
        .iter()
        .map(|m| m.to_string())
        .collect();
    assert_eq!(months, vec!["2024-02", "2024-01"]);

    let january = store.get_day_log(date(2024, 1, 15));
    assert!(january.is_checked("a"));
    assert_eq!(january.created_at, Some(100));
    assert_eq!(january.updated_at, Some(200));

    let february = store.get_day_log(date(2024, 2, 1));
    assert_eq!(february.note, "rest day");
    assert!(february.exclude_from_stats);

    assert_eq!(storage.get_raw(LEGACY_DAY_LOGS_KEY), None);
    assert_eq!(
        storage.get_raw(LEGACY_BACKUP_KEY),
        Some(LEGACY_BLOB.to_string())
    );
}

#[test]
fn test_existing_shard_entries_take_precedence() {
    let (mut storage, _) = memory_storage(1_000);
    {
        let mut store = DayLogStore::new(&mut storage);
        store.set_note(date(2024, 1, 15), "written under v2").unwrap();
    }

    // A legacy blob showing up after the v2 write, picked up by a new session
    let mut backend = storage.into_backend();
    backend
        .set(LEGACY_DAY_LOGS_KEY, LEGACY_BLOB.to_string())
        .unwrap();
    let mut storage = reopen(backend);

    let report = migrate_legacy_day_logs(&mut storage).unwrap();
    assert_eq!(report.kept_existing, 1);
    assert_eq!(report.migrated, 1);

    let mut store = DayLogStore::new(&mut storage);
    let january = store.get_day_log(date(2024, 1, 15));
    assert_eq!(january.note, "written under v2");
    assert!(!january.is_checked("a"));
    assert_eq!(store.get_day_log(date(2024, 2, 1)).note, "rest day");
}

#[test]
fn test_migration_is_idempotent() {
    let (mut once, _) = memory_storage(0);
    once.set_raw(LEGACY_DAY_LOGS_KEY, LEGACY_BLOB.to_string())
        .unwrap();
    migrate_legacy_day_logs(&mut once).unwrap();

    let (mut twice, _) = memory_storage(0);
    twice
        .set_raw(LEGACY_DAY_LOGS_KEY, LEGACY_BLOB.to_string())
        .unwrap();
    migrate_legacy_day_logs(&mut twice).unwrap();
    let second = migrate_legacy_day_logs(&mut twice).unwrap();
    assert!(!second.legacy_found);

    assert_eq!(once.backend().entries(), twice.backend().entries());
}

#[test]
fn test_redundant_store_calls_migrate_once() {
    let (mut storage, _) = memory_storage(0);
    storage
        .set_raw(LEGACY_DAY_LOGS_KEY, LEGACY_BLOB.to_string())
        .unwrap();

    let mut store = DayLogStore::new(&mut storage);
    let first = store.load_day_log_map();
    let second = store.load_day_log_map();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn test_empty_legacy_object_leaves_no_shards() {
    let (mut storage, _) = memory_storage(0);
    storage
        .set_raw(LEGACY_DAY_LOGS_KEY, "{}".to_string())
        .unwrap();

    let mut store = DayLogStore::new(&mut storage);
    assert!(store.list_available_months().is_empty());

    let keys = storage.keys();
    assert_eq!(keys, vec![LEGACY_BACKUP_KEY.to_string()]);
}

#[test]
fn test_entry_with_malformed_embedded_date_is_migrated() {
    let (mut storage, _) = memory_storage(0);
    storage
        .set_raw(
            LEGACY_DAY_LOGS_KEY,
            r#"{"2024-01-15":{"date":"","checks":{"a":true},"note":"keep me"},"2024-01-16":{"date":"2024-1-5","note":"also kept"}}"#.to_string(),
        )
        .unwrap();

    let report = migrate_legacy_day_logs(&mut storage).unwrap();
    assert_eq!(report.migrated, 2);
    assert_eq!(report.skipped, 0);

    let mut store = DayLogStore::new(&mut storage);
    let log = store.get_day_log(date(2024, 1, 15));
    assert_eq!(log.date, date(2024, 1, 15));
    assert_eq!(log.note, "keep me");
    assert!(log.is_checked("a"));
    assert_eq!(store.get_day_log(date(2024, 1, 16)).note, "also kept");
}
