//! Current-week resolution and the last/current/next display window.

use chrono::NaiveDate;
use serde::Serialize;

use super::model::Schedule;
use super::DAYS_PER_WEEK;

/// Index of the week containing `today`, or `None` outside the schedule.
///
/// Comparisons are whole-day; callers truncate instants to a local date first.
pub fn resolve(schedule: &Schedule, today: NaiveDate) -> Option<usize> {
    let start = schedule.start()?;
    let offset = (today - start).num_days();
    if offset < 0 {
        return None;
    }
    let index = usize::try_from(offset / DAYS_PER_WEEK).ok()?;
    (index < schedule.len()).then_some(index)
}

/// Wire form of a resolved index: the index itself, or `-1`.
pub fn to_sentinel(index: Option<usize>) -> i64 {
    index.map_or(-1, |i| i as i64)
}

/// Card position on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotPosition {
    Last,
    Current,
    Next,
}

impl SlotPosition {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Last => "Last Week",
            Self::Current => "Current Week",
            Self::Next => "Next Week",
        }
    }
}

/// One dashboard card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplaySlot {
    pub position: SlotPosition,
    /// `None` renders as "Not Available".
    pub index: Option<usize>,
    /// Set only when the slot holds the genuinely resolved week.
    pub highlighted: bool,
}

/// Last / current / next cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayWindow {
    pub last: DisplaySlot,
    pub current: DisplaySlot,
    pub next: DisplaySlot,
}

impl DisplayWindow {
    pub fn slots(&self) -> [DisplaySlot; 3] {
        [self.last, self.current, self.next]
    }

    pub fn indices(&self) -> (Option<usize>, Option<usize>, Option<usize>) {
        (self.last.index, self.current.index, self.next.index)
    }
}

/// Choose which weeks the dashboard shows.
///
/// Before the schedule starts the first three weeks are shown; after it ends
/// the last three are. Neither case highlights a card since `resolved` is
/// `None` there.
pub fn display_window(schedule: &Schedule, today: NaiveDate, resolved: Option<usize>) -> DisplayWindow {
    let len = schedule.len() as i64;
    let before_start = schedule.start().is_some_and(|start| today < start);
    let after_end = schedule.end_exclusive().is_some_and(|end| today >= end);

    let centre: Option<i64> = if before_start {
        Some(1)
    } else if resolved.is_none() && after_end {
        Some(len - 2)
    } else {
        resolved.map(|i| i as i64)
    };

    let slot = |position: SlotPosition, offset: i64| {
        let index = centre
            .map(|c| c + offset)
            .filter(|i| (0..len).contains(i))
            .map(|i| i as usize);
        DisplaySlot {
            position,
            index,
            highlighted: index.is_some() && index == resolved,
        }
    };

    DisplayWindow {
        last: slot(SlotPosition::Last, -1),
        current: slot(SlotPosition::Current, 0),
        next: slot(SlotPosition::Next, 1),
    }
}
