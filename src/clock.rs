//! Time source for record timestamps
//!
//! Day logs carry `createdAt`/`updatedAt` as epoch milliseconds. The clock is
//! injected through the storage handle so tests can freeze or step time.

use chrono::{Local, NaiveDate, Utc};
use std::cell::Cell;

/// Get the current date in local timezone
pub fn local_date_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Source of the current time in epoch milliseconds
pub trait Clock {
    fn now_millis(&self) -> i64;
}

/// Wall clock backed by `chrono::Utc::now()`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Manually controlled clock
///
/// Stays frozen at the current value until `advance` or `set` is called.
#[derive(Debug, Default)]
pub struct FixedClock {
    millis: Cell<i64>,
}

impl FixedClock {
    pub fn new(millis: i64) -> Self {
        Self {
            millis: Cell::new(millis),
        }
    }

    pub fn advance(&self, delta_millis: i64) {
        self.millis.set(self.millis.get() + delta_millis);
    }

    pub fn set(&self, millis: i64) {
        self.millis.set(millis);
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.millis.get()
    }
}

impl<C: Clock + ?Sized> Clock for std::rc::Rc<C> {
    fn now_millis(&self) -> i64 {
        (**self).now_millis()
    }
}
