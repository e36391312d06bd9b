//! Events handed to presentation adapters.

use serde::Serialize;

use crate::schedule::model::Schedule;
use crate::schedule::resolver::to_sentinel;
use crate::tracker::NewWeekNotification;

/// Discrete roster events, serialized as `{"type": ..., "data": ...}`.
#[derive(Clone, Serialize, Debug, PartialEq, Eq)]
#[serde(tag = "type", content = "data")]
pub enum RosterEvent {
    /// The schedule was generated.
    ScheduleReady(Schedule),
    /// The resolved current week changed. `-1` means outside the schedule.
    CurrentWeekChanged { index: i64 },
    /// A new week began since the viewer last looked.
    NewWeekNotification { week_number: u32 },
}

impl RosterEvent {
    pub fn current_week_changed(index: Option<usize>) -> Self {
        Self::CurrentWeekChanged {
            index: to_sentinel(index),
        }
    }

    pub fn new_week(notification: NewWeekNotification) -> Self {
        Self::NewWeekNotification {
            week_number: notification.week_number,
        }
    }

    /// Short name, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ScheduleReady(_) => "schedule_ready",
            Self::CurrentWeekChanged { .. } => "current_week_changed",
            Self::NewWeekNotification { .. } => "new_week_notification",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_value(RosterEvent::current_week_changed(None)).unwrap();
        assert_eq!(json, serde_json::json!({"type": "CurrentWeekChanged", "data": {"index": -1}}));

        let json = serde_json::to_value(RosterEvent::new_week(NewWeekNotification::for_index(6))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "NewWeekNotification", "data": {"week_number": 7}})
        );
    }
}
