//! Periodic re-resolution of the current week.
//!
//! [`spawn_poller`] ticks the controller on a fixed interval and forwards any
//! events to a broadcast channel. The returned [`PollHandle`] stops the task
//! when cancelled or dropped.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{broadcast, oneshot};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::controller::RosterController;
use crate::events::RosterEvent;

/// Controller shared between the poller and adapters.
pub type SharedController = Arc<Mutex<RosterController>>;

/// Sender side of the event stream.
pub type EventSender = broadcast::Sender<RosterEvent>;

/// Create an event channel with default capacity.
pub fn create_event_channel() -> EventSender {
    let (tx, _rx) = broadcast::channel(100);
    tx
}

/// Handle to a running poller.
#[derive(Debug)]
pub struct PollHandle {
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl PollHandle {
    /// Stop the poller and wait for it to exit. No tick runs afterwards.
    pub async fn cancel(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
        debug!("Poller cancelled");
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Tick `controller` every `interval` on the current tokio runtime.
///
/// The first tick fires after one full interval; callers run
/// [`RosterController::start`] themselves before spawning.
pub fn spawn_poller(controller: SharedController, interval: Duration, events: EventSender) -> PollHandle {
    let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let mut timer = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = &mut shutdown_rx => break,
                _ = timer.tick() => {
                    let emitted = match controller.lock() {
                        Ok(mut guard) => guard.tick(),
                        Err(_) => {
                            warn!("Roster controller lock poisoned; stopping poller");
                            break;
                        }
                    };
                    for event in emitted {
                        debug!(kind = event.kind(), "Forwarding roster event");
                        // No subscribers is fine; adapters may not be attached yet.
                        let _ = events.send(event);
                    }
                }
            }
        }
    });

    PollHandle {
        shutdown_tx: Some(shutdown_tx),
        task: Some(task),
    }
}
