//! Roster application state.
//!
//! One controller owns the generated schedule, the active table filter, the
//! last resolved week and the week-change tracker. Adapters read from it and
//! drive it with [`RosterController::start`] and [`RosterController::tick`].

use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info, warn};
use wardiya_db::KeyValueStore;

use crate::clock::Clock;
use crate::config::{RosterConfig, Settings};
use crate::error::RosterResult;
use crate::events::RosterEvent;
use crate::schedule::model::{Schedule, WeekFilter, WeekRecord};
use crate::schedule::resolver::{display_window, resolve, DisplayWindow};
use crate::schedule::{self, generate};
use crate::tracker::{TrackerState, WeekChangeTracker};

pub struct RosterController {
    settings: Settings,
    schedule: Schedule,
    filter: WeekFilter,
    /// `None` until `start` has run.
    last_index: Option<Option<usize>>,
    tracker: WeekChangeTracker,
    clock: Arc<dyn Clock>,
}

impl RosterController {
    /// Generate the schedule. Fails only on invalid settings.
    pub fn new(
        settings: Settings,
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
    ) -> RosterResult<Self> {
        let schedule = generate(settings.anchor, settings.total_weeks)?;
        let tracker = WeekChangeTracker::with_key(store, settings.storage_key.clone());
        Ok(Self {
            settings,
            schedule,
            filter: WeekFilter::none(),
            last_index: None,
            tracker,
            clock,
        })
    }

    pub fn from_config(
        config: &RosterConfig,
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
    ) -> RosterResult<Self> {
        Self::new(config.validate()?, store, clock)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Resolve against the clock now.
    pub fn current_index(&self) -> Option<usize> {
        resolve(&self.schedule, self.today())
    }

    pub fn current_week(&self) -> Option<&WeekRecord> {
        self.current_index().and_then(|i| self.schedule.get(i))
    }

    pub fn display_window(&self) -> DisplayWindow {
        let today = self.today();
        display_window(&self.schedule, today, resolve(&self.schedule, today))
    }

    pub fn filter(&self) -> WeekFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: WeekFilter) {
        debug!(?filter, "Filter changed");
        self.filter = filter;
    }

    pub fn clear_filter(&mut self) {
        self.set_filter(WeekFilter::none());
    }

    /// Weeks passing the active filter.
    pub fn filtered_weeks(&self) -> Vec<&WeekRecord> {
        schedule::filter(&self.schedule, &self.filter)
    }

    pub fn tracker_state(&self) -> RosterResult<TrackerState> {
        self.tracker.state()
    }

    /// Forget the last-seen week.
    pub fn reset_tracking(&self) -> RosterResult<()> {
        info!("Clearing week tracking state");
        self.tracker.clear()
    }

    /// Initial resolution. Emits `ScheduleReady`, `CurrentWeekChanged`, and a
    /// `NewWeekNotification` if the week moved since the previous session.
    pub fn start(&mut self) -> Vec<RosterEvent> {
        let index = self.current_index();
        self.last_index = Some(index);
        info!(
            weeks = self.schedule.len(),
            current_index = ?index,
            "Roster started"
        );

        let mut events = vec![
            RosterEvent::ScheduleReady(self.schedule.clone()),
            RosterEvent::current_week_changed(index),
        ];
        events.extend(self.check_new_week(index));
        events
    }

    /// Re-resolve. Emits nothing unless the current week changed.
    pub fn tick(&mut self) -> Vec<RosterEvent> {
        let Some(last) = self.last_index else {
            return self.start();
        };

        let index = self.current_index();
        if index == last {
            return Vec::new();
        }

        debug!(previous = ?last, current = ?index, "Current week changed");
        self.last_index = Some(index);

        let mut events = vec![RosterEvent::current_week_changed(index)];
        events.extend(self.check_new_week(index));
        events
    }

    fn check_new_week(&self, index: Option<usize>) -> Option<RosterEvent> {
        match self.tracker.observe(index) {
            Ok(notification) => notification.map(RosterEvent::new_week),
            Err(e) => {
                warn!(error = %e, "Failed to update week tracking state");
                None
            }
        }
    }
}

impl std::fmt::Debug for RosterController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RosterController")
            .field("settings", &self.settings)
            .field("filter", &self.filter)
            .field("last_index", &self.last_index)
            .finish_non_exhaustive()
    }
}
