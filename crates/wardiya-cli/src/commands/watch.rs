//! Watch command: live dashboard.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tracing::warn;
use wardiya_core::controller::RosterController;
use wardiya_core::events::RosterEvent;
use wardiya_core::poller::{create_event_channel, spawn_poller};

use crate::output;

#[derive(Args)]
pub struct WatchArgs {
    /// Seconds between checks (defaults to the configured poll interval)
    #[arg(long)]
    pub interval: Option<u64>,
}

pub async fn execute(args: &WatchArgs, mut controller: RosterController) -> Result<()> {
    let interval = args
        .interval
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .unwrap_or(controller.settings().poll_interval);

    let events = controller.start();
    output::print_dashboard(&controller);
    output::print_notifications(&events);
    println!();
    println!("  {}", "Watching for new weeks. Ctrl+C to stop".dimmed());

    let controller = Arc::new(Mutex::new(controller));
    let tx = create_event_channel();
    let mut rx = tx.subscribe();
    let poller = spawn_poller(controller.clone(), interval, tx);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            received = rx.recv() => match received {
                Ok(RosterEvent::CurrentWeekChanged { .. }) => {
                    if let Ok(guard) = controller.lock() {
                        println!();
                        output::print_dashboard(&guard);
                    }
                }
                Ok(event @ RosterEvent::NewWeekNotification { .. }) => {
                    output::print_notifications(std::slice::from_ref(&event));
                }
                Ok(RosterEvent::ScheduleReady(_)) => {}
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Missed roster events");
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    poller.cancel().await;
    Ok(())
}
