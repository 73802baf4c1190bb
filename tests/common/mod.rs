//! Common test utilities for integration tests
#![allow(dead_code)]

use chrono::NaiveDate;
use habit_score::{DayLog, FixedClock, MemoryStore, Storage, Task};
use std::rc::Rc;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// In-memory storage with a controllable clock starting at `start_millis`
pub fn memory_storage(start_millis: i64) -> (Storage<MemoryStore>, Rc<FixedClock>) {
    let clock = Rc::new(FixedClock::new(start_millis));
    let storage = Storage::with_clock(MemoryStore::new(), Box::new(Rc::clone(&clock)));
    (storage, clock)
}

/// Fresh handle over an existing backend, as a new session would open it
pub fn reopen(backend: MemoryStore) -> Storage<MemoryStore> {
    Storage::with_clock(backend, Box::new(FixedClock::new(0)))
}

pub fn core_task(id: &str) -> Task {
    Task {
        id: id.to_string(),
        title: format!("Core {}", id),
        points: 0,
        is_core: true,
        is_active: true,
    }
}

pub fn bonus_task(id: &str, points: i64) -> Task {
    Task {
        id: id.to_string(),
        title: format!("Bonus {}", id),
        points,
        is_core: false,
        is_active: true,
    }
}

pub fn checked_log(date: NaiveDate, ids: &[&str]) -> DayLog {
    let mut log = DayLog::new(date);
    for id in ids {
        log.set_check(id, true);
    }
    log
}
