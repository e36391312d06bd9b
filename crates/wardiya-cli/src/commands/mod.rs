//! CLI command definitions and handlers.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;
use wardiya_core::clock::{Clock, FixedClock, SystemClock};
use wardiya_core::config::RosterConfig;
use wardiya_core::controller::RosterController;
use wardiya_core::tracker::WEEK_TRACK_KEY;
use wardiya_core::RosterError;

pub mod current;
pub mod dashboard;
pub mod reset;
pub mod serve;
pub mod table;
pub mod watch;

/// Database file inside the data directory.
const STATE_DB_FILE: &str = "state.db";

/// Wardiya - weekly shift roster viewer
#[derive(Parser)]
#[command(name = "wardiya")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding persisted viewer state
    #[arg(long, global = true, env = "WARDIYA_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Roster config file (defaults to ./wardiya.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long, global = true, value_parser = parse_date)]
    pub today: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show last, current and next week
    Dashboard,

    /// Show the full schedule table
    Table(table::TableArgs),

    /// Jump to the current week in the schedule
    Current,

    /// Keep the dashboard open and announce new weeks
    Watch(watch::WatchArgs),

    /// Forget the last-seen week
    Reset,

    /// Start the web server
    Serve(serve::ServeArgs),
}

impl Cli {
    pub async fn execute(&self) -> Result<()> {
        match &self.command {
            Commands::Dashboard => dashboard::execute(self.open_controller()?),
            Commands::Table(args) => table::execute(args, self.open_controller()?),
            Commands::Current => current::execute(self.open_controller()?),
            Commands::Watch(args) => watch::execute(args, self.open_controller()?).await,
            // Clearing state must keep working when the roster config is broken.
            Commands::Reset => reset::execute(open_store(&self.data_dir())?, self.storage_key()),
            Commands::Serve(args) => serve::execute(args, self.open_controller()?).await,
        }
    }

    /// Resolve the data directory: flag / env, then the platform data dir.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .map(|d| d.join("wardiya"))
                .unwrap_or_else(|| PathBuf::from(".wardiya"))
        })
    }

    /// Tracker key from the config, or the default when the config cannot be read.
    fn storage_key(&self) -> String {
        let loaded = std::env::current_dir()
            .map_err(RosterError::from)
            .and_then(|cwd| RosterConfig::load(self.config.as_deref(), &cwd));
        match loaded {
            Ok(config) => config.storage_key,
            Err(e) => {
                warn!(error = %e, "Roster config unreadable; using the default tracker key");
                WEEK_TRACK_KEY.to_string()
            }
        }
    }

    fn open_controller(&self) -> Result<RosterController> {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        let config = RosterConfig::load(self.config.as_deref(), &cwd).context("Failed to load roster config")?;

        let store = open_store(&self.data_dir())?;
        let clock: Arc<dyn Clock> = match self.today {
            Some(date) => Arc::new(FixedClock::new(date)),
            None => Arc::new(SystemClock),
        };

        RosterController::from_config(&config, store, clock).context("Invalid roster configuration")
    }
}

fn open_store(data_dir: &Path) -> Result<Arc<wardiya_db::DbPool>> {
    let db_path = data_dir.join(STATE_DB_FILE);
    let pool = wardiya_db::init_pool(&db_path)
        .with_context(|| format!("Failed to open state database at {}", db_path.display()))?;
    Ok(Arc::new(pool))
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["wardiya", "--today", "2026-02-01", "table", "--person", "omar"]).unwrap();
        assert_eq!(cli.today, NaiveDate::from_ymd_opt(2026, 2, 1));
        assert!(matches!(cli.command, Commands::Table(_)));
    }

    #[test]
    fn test_bad_date_rejected() {
        assert!(Cli::try_parse_from(["wardiya", "--today", "01/02/2026", "dashboard"]).is_err());
    }

    #[test]
    fn test_reset_key_survives_unreadable_config() {
        let cli = Cli::try_parse_from(["wardiya", "--config", "/nonexistent/wardiya.toml", "reset"]).unwrap();
        assert_eq!(cli.storage_key(), WEEK_TRACK_KEY);
    }

    #[test]
    fn test_explicit_data_dir() {
        let cli = Cli::try_parse_from(["wardiya", "--data-dir", "/tmp/w", "reset"]).unwrap();
        assert_eq!(cli.data_dir(), PathBuf::from("/tmp/w"));
    }
}
