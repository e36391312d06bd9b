//! Week-change detection.
//!
//! Remembers the last week index the viewer saw as "current" and reports a
//! one-shot notification when it moves. State lives in a [`KeyValueStore`]
//! so it survives restarts.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};
use wardiya_db::KeyValueStore;

use crate::error::RosterResult;

/// Storage key for the last-seen week index.
pub const WEEK_TRACK_KEY: &str = "wardiya_last_seen_week_index_v1";

/// Tracker state as read from storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "last_index", rename_all = "snake_case")]
pub enum TrackerState {
    Uninitialized,
    Tracking(usize),
}

/// Emitted once per genuine week transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWeekNotification {
    pub week_index: usize,
    /// Human-facing, 1-based.
    pub week_number: u32,
}

impl NewWeekNotification {
    pub fn for_index(week_index: usize) -> Self {
        Self {
            week_index,
            week_number: week_index as u32 + 1,
        }
    }

    /// Banner text, e.g. "New Week Started! Week #7".
    pub fn message(&self) -> String {
        format!("New Week Started! Week #{}", self.week_number)
    }
}

/// Persisted week-change state machine.
#[derive(Clone)]
pub struct WeekChangeTracker {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl WeekChangeTracker {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, WEEK_TRACK_KEY)
    }

    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Current state. Unparseable stored values read as `Uninitialized`.
    pub fn state(&self) -> RosterResult<TrackerState> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(TrackerState::Uninitialized);
        };
        match raw.trim().parse::<usize>() {
            Ok(index) => Ok(TrackerState::Tracking(index)),
            Err(_) => {
                warn!(key = %self.key, value = %raw, "Ignoring corrupt week tracking state");
                Ok(TrackerState::Uninitialized)
            }
        }
    }

    /// Feed a resolved index and get back a notification if the week changed.
    ///
    /// The first observation and out-of-range observations never notify.
    pub fn observe(&self, resolved: Option<usize>) -> RosterResult<Option<NewWeekNotification>> {
        let Some(index) = resolved else {
            debug!("Current date outside schedule; tracking unchanged");
            return Ok(None);
        };

        match self.state()? {
            TrackerState::Uninitialized => {
                self.persist(index)?;
                debug!(week_index = index, "Week tracking initialized");
                Ok(None)
            }
            TrackerState::Tracking(last) if last == index => Ok(None),
            TrackerState::Tracking(last) => {
                self.persist(index)?;
                let notification = NewWeekNotification::for_index(index);
                info!(
                    previous_index = last,
                    week_index = index,
                    week_number = notification.week_number,
                    "New week started"
                );
                Ok(Some(notification))
            }
        }
    }

    /// Forget the last-seen week; the next observation is treated as the first.
    pub fn clear(&self) -> RosterResult<()> {
        self.store.clear(&self.key)?;
        Ok(())
    }

    fn persist(&self, index: usize) -> RosterResult<()> {
        self.store.set(&self.key, &index.to_string())?;
        Ok(())
    }
}

impl std::fmt::Debug for WeekChangeTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeekChangeTracker")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wardiya_db::MemoryStore;

    fn tracker() -> (Arc<MemoryStore>, WeekChangeTracker) {
        let store = Arc::new(MemoryStore::new());
        let tracker = WeekChangeTracker::new(store.clone());
        (store, tracker)
    }

    #[test]
    fn test_first_observation_is_silent() {
        let (store, tracker) = tracker();
        assert_eq!(tracker.state().unwrap(), TrackerState::Uninitialized);

        assert_eq!(tracker.observe(Some(5)).unwrap(), None);
        assert_eq!(tracker.state().unwrap(), TrackerState::Tracking(5));
        assert_eq!(store.get(WEEK_TRACK_KEY).unwrap().as_deref(), Some("5"));
    }

    #[test]
    fn test_transition_notifies_once() {
        let (_, tracker) = tracker();
        tracker.observe(Some(5)).unwrap();

        let notification = tracker.observe(Some(6)).unwrap().unwrap();
        assert_eq!(notification.week_number, 7);
        assert_eq!(notification.week_index, 6);
        assert_eq!(notification.message(), "New Week Started! Week #7");

        assert_eq!(tracker.observe(Some(6)).unwrap(), None);
        assert_eq!(tracker.state().unwrap(), TrackerState::Tracking(6));
    }

    #[test]
    fn test_out_of_range_changes_nothing() {
        let (_, tracker) = tracker();
        assert_eq!(tracker.observe(None).unwrap(), None);
        assert_eq!(tracker.state().unwrap(), TrackerState::Uninitialized);

        tracker.observe(Some(3)).unwrap();
        assert_eq!(tracker.observe(None).unwrap(), None);
        assert_eq!(tracker.state().unwrap(), TrackerState::Tracking(3));
    }

    #[test]
    fn test_backwards_move_also_notifies() {
        let (_, tracker) = tracker();
        tracker.observe(Some(10)).unwrap();
        let notification = tracker.observe(Some(2)).unwrap().unwrap();
        assert_eq!(notification.week_number, 3);
    }

    #[test]
    fn test_state_survives_new_tracker() {
        let store = Arc::new(MemoryStore::new());
        WeekChangeTracker::new(store.clone()).observe(Some(4)).unwrap();

        let restarted = WeekChangeTracker::new(store);
        assert_eq!(restarted.state().unwrap(), TrackerState::Tracking(4));
        assert!(restarted.observe(Some(5)).unwrap().is_some());
    }

    #[test]
    fn test_corrupt_state_treated_as_absent() {
        for raw in ["garbage", "-1", "", "4.5"] {
            let store = Arc::new(MemoryStore::with_value(WEEK_TRACK_KEY, raw));
            let tracker = WeekChangeTracker::new(store.clone());
            assert_eq!(tracker.state().unwrap(), TrackerState::Uninitialized, "{raw:?}");
            assert_eq!(tracker.observe(Some(8)).unwrap(), None);
            assert_eq!(store.get(WEEK_TRACK_KEY).unwrap().as_deref(), Some("8"));
        }
    }

    #[test]
    fn test_clear_resets_to_uninitialized() {
        let (_, tracker) = tracker();
        tracker.observe(Some(1)).unwrap();
        tracker.clear().unwrap();
        assert_eq!(tracker.state().unwrap(), TrackerState::Uninitialized);
        assert_eq!(tracker.observe(Some(2)).unwrap(), None);
    }

    #[test]
    fn test_sqlite_backed_tracker() {
        let pool = Arc::new(wardiya_db::init_memory_pool().unwrap());
        let tracker = WeekChangeTracker::new(pool);
        tracker.observe(Some(0)).unwrap();
        assert!(tracker.observe(Some(1)).unwrap().is_some());
    }
}
