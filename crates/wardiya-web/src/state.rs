//! Application state.

use tokio::sync::broadcast;
use wardiya_core::events::RosterEvent;
use wardiya_core::poller::{create_event_channel, EventSender, SharedController};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub controller: SharedController,
    pub tx: EventSender,
}

impl AppState {
    pub fn new(controller: SharedController) -> Self {
        Self {
            controller,
            tx: create_event_channel(),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RosterEvent> {
        self.tx.subscribe()
    }
}
