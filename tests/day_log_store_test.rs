//! Day log store persistence tests
mod common;

use common::{date, memory_storage, reopen};
use habit_score::{DayLog, DayLogMap, DayLogStore, MonthKey};

#[test]
fn test_upsert_then_get_roundtrip() {
    let (mut storage, clock) = memory_storage(10_000);
    let mut store = DayLogStore::new(&mut storage);

    let mut log = DayLog::new(date(2024, 3, 9));
    log.set_check("walk", true);
    log.set_check("read", false);
    log.note = "good day".to_string();
    store.upsert_day_log(&log).unwrap();

    let mut previous = store.get_day_log(date(2024, 3, 9));
    assert_eq!(previous.checks, log.checks);
    assert_eq!(previous.note, log.note);
    assert_eq!(previous.exclude_from_stats, log.exclude_from_stats);
    assert_eq!(previous.created_at, Some(10_000));

    for i in 0..5 {
        clock.advance(1);
        let mut edit = previous.clone();
        edit.note = format!("edit {}", i);
        store.upsert_day_log(&edit).unwrap();

        let read = store.get_day_log(date(2024, 3, 9));
        assert_eq!(read.created_at, Some(10_000));
        assert!(read.updated_at > previous.updated_at);
        previous = read;
    }
}

#[test]
fn test_frozen_clock_keeps_updated_at_equal() {
    let (mut storage, _) = memory_storage(7);
    let mut store = DayLogStore::new(&mut storage);
    let log = common::checked_log(date(2024, 3, 9), &["a"]);

    let first = store.upsert_day_log(&log).unwrap();
    let second = store.upsert_day_log(&log).unwrap();
    assert_eq!(first.updated_at, second.updated_at);
    assert_eq!(first.created_at, second.created_at);
}

#[test]
fn test_log_that_becomes_empty_reads_as_default() {
    let (mut storage, _) = memory_storage(0);
    let mut store = DayLogStore::new(&mut storage);

    let mut log = common::checked_log(date(2024, 3, 9), &["a"]);
    log.note = "note".to_string();
    log.exclude_from_stats = true;
    store.upsert_day_log(&log).unwrap();

    log.set_check("a", false);
    log.note = "  ".to_string();
    log.exclude_from_stats = false;
    store.upsert_day_log(&log).unwrap();

    let read = store.get_day_log(date(2024, 3, 9));
    assert_eq!(read, DayLog::new(date(2024, 3, 9)));
    assert!(store.load_day_log_map().is_empty());
}

#[test]
fn test_month_views_agree_with_full_history() {
    let (mut storage, _) = memory_storage(0);
    let mut store = DayLogStore::new(&mut storage);
    for d in [date(2024, 1, 30), date(2024, 1, 31), date(2024, 2, 1)] {
        store.toggle_check(d, "a").unwrap();
    }

    let full = store.load_day_log_map();
    let january = store.load_day_log_map_for_month(&MonthKey::from_date(date(2024, 1, 1)));
    let february = store.load_day_log_map_for_month(&"2024-02".parse().unwrap());
    assert_eq!(full.len(), 3);
    assert_eq!(january.len() + february.len(), full.len());
    assert!(january.keys().all(|d| full.contains_key(d)));
}

#[test]
fn test_save_day_log_map_survives_new_session() {
    let (mut storage, _) = memory_storage(0);
    let mut map = DayLogMap::new();
    map.insert(date(2023, 12, 31), common::checked_log(date(2023, 12, 31), &["a"]));
    map.insert(date(2024, 1, 1), common::checked_log(date(2024, 1, 1), &["b"]));
    DayLogStore::new(&mut storage).save_day_log_map(&map).unwrap();

    let mut storage = reopen(storage.into_backend());
    let mut store = DayLogStore::new(&mut storage);
    assert_eq!(store.load_day_log_map(), map);
    let months: Vec<String> = store
        .list_available_months()
        .iter()
        .map(|m| m.to_string())
        .collect();
    assert_eq!(months, vec!["2024-01", "2023-12"]);
}
