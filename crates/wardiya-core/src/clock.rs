//! Date source injected into the controller.

use chrono::{Local, NaiveDate};
use std::sync::RwLock;

/// Supplies "today" as a calendar date.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock that reports whatever date it was last set to.
#[derive(Debug)]
pub struct FixedClock {
    date: RwLock<NaiveDate>,
}

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: RwLock::new(date),
        }
    }

    pub fn set(&self, date: NaiveDate) {
        if let Ok(mut current) = self.date.write() {
            *current = date;
        }
    }

    /// Move forward by `days`. No-op past the end of the calendar.
    pub fn advance_days(&self, days: u64) {
        if let Ok(mut current) = self.date.write() {
            if let Some(next) = current.checked_add_days(chrono::Days::new(days)) {
                *current = next;
            }
        }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        match self.date.read() {
            Ok(date) => *date,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}
