//! Reset command.

use anyhow::{Context, Result};
use colored::Colorize;
use std::sync::Arc;
use wardiya_core::tracker::WeekChangeTracker;
use wardiya_db::KeyValueStore;

/// Forget the last-seen week stored under `key`.
///
/// Works from the store alone, so a broken roster config cannot block it.
pub fn execute(store: Arc<dyn KeyValueStore>, key: String) -> Result<()> {
    WeekChangeTracker::with_key(store, key)
        .clear()
        .context("Failed to clear week tracking state")?;
    println!("{} Cleared last-seen week", "✓".green().bold());
    Ok(())
}
