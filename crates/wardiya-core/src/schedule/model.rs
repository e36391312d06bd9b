//! Schedule domain models.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::rotation::model::{Participant, Role, RotationAssignment};

/// The weekly non-working day. Constant across every week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestDay {
    FridayOff,
}

impl RestDay {
    /// Short marker used in table cells.
    pub fn label(&self) -> &'static str {
        "OFF"
    }
}

impl fmt::Display for RestDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FridayOff => write!(f, "Friday: {}", self.label()),
        }
    }
}

/// One scheduled week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekRecord {
    /// 1-based, equal to the week's schedule index + 1.
    pub week_number: u32,
    pub week_start: NaiveDate,
    /// Last working day, `week_start + 5 days`.
    pub week_end: NaiveDate,
    pub assignment: RotationAssignment,
    pub rest_day: RestDay,
}

impl WeekRecord {
    /// Zero-based schedule index.
    pub fn index(&self) -> usize {
        self.week_number as usize - 1
    }

    /// Whole-day containment: `week_start <= date < week_start + 7`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.week_start
            && self
                .week_start
                .checked_add_days(Days::new(super::DAYS_PER_WEEK as u64))
                .map_or(true, |next| date < next)
    }

    pub fn involves(&self, participant: Participant) -> bool {
        self.assignment.contains(participant)
    }

    pub fn week_start_formatted(&self) -> String {
        format_date(self.week_start)
    }

    pub fn week_end_formatted(&self) -> String {
        format_date(self.week_end)
    }

    /// "DD/MM/YYYY - DD/MM/YYYY"
    pub fn date_range(&self) -> String {
        format!("{} - {}", self.week_start_formatted(), self.week_end_formatted())
    }
}

/// Format a date as DD/MM/YYYY.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// The full ordered, contiguous run of weeks.
///
/// Only built by [`super::generate`], which guarantees
/// `weeks[i].week_number == i + 1` and a 7-day step between starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schedule {
    pub(crate) weeks: Vec<WeekRecord>,
}

impl Schedule {
    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&WeekRecord> {
        self.weeks.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WeekRecord> {
        self.weeks.iter()
    }

    pub fn weeks(&self) -> &[WeekRecord] {
        &self.weeks
    }

    /// First week's start (the anchor).
    pub fn start(&self) -> Option<NaiveDate> {
        self.weeks.first().map(|w| w.week_start)
    }

    /// Day after the last scheduled day: last week's start + 7 days.
    pub fn end_exclusive(&self) -> Option<NaiveDate> {
        self.weeks
            .last()
            .and_then(|w| w.week_start.checked_add_days(Days::new(super::DAYS_PER_WEEK as u64)))
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a WeekRecord;
    type IntoIter = std::slice::Iter<'a, WeekRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.weeks.iter()
    }
}

/// Table filter. `role` only narrows the result when a participant is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekFilter {
    pub participant: Option<Participant>,
    pub role: Option<Role>,
}

impl WeekFilter {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn participant(participant: Participant) -> Self {
        Self {
            participant: Some(participant),
            role: None,
        }
    }

    pub fn matches(&self, week: &WeekRecord) -> bool {
        match (self.participant, self.role) {
            (None, _) => true,
            (Some(p), None) => week.involves(p),
            (Some(p), Some(role)) => week.assignment.get(role) == p,
        }
    }
}
