//! Roster configuration.
//!
//! Defaults are compiled in. A TOML file may override them, and `WARDIYA_*`
//! environment variables override the file. The rotation table, rest day and
//! working-week offset are not configurable.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::error::{RosterError, RosterResult};
use crate::rotation::CYCLE_LEN;
use crate::schedule::TOTAL_WEEKS;
use crate::tracker::WEEK_TRACK_KEY;

/// Default schedule anchor: Saturday 3 January 2026.
pub const DEFAULT_ANCHOR: &str = "2026-01-03";

/// Default poll interval in seconds.
pub const DEFAULT_POLL_SECS: u64 = 60;

/// Config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "wardiya.toml";

/// Raw configuration as read from file and environment. Not yet validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// ISO date (YYYY-MM-DD) of week 1's first day.
    pub anchor: String,
    /// Signed so that a non-positive value can be reported rather than rejected by the parser.
    pub total_weeks: i64,
    pub poll_interval_secs: u64,
    pub storage_key: String,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            anchor: DEFAULT_ANCHOR.to_string(),
            total_weeks: TOTAL_WEEKS as i64,
            poll_interval_secs: DEFAULT_POLL_SECS,
            storage_key: WEEK_TRACK_KEY.to_string(),
        }
    }
}

/// Validated configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub anchor: NaiveDate,
    pub total_weeks: usize,
    pub poll_interval: Duration,
    pub storage_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        // The default config is known to be valid.
        Self {
            anchor: NaiveDate::from_ymd_opt(2026, 1, 3).unwrap_or_default(),
            total_weeks: TOTAL_WEEKS,
            poll_interval: Duration::from_secs(DEFAULT_POLL_SECS),
            storage_key: WEEK_TRACK_KEY.to_string(),
        }
    }
}

impl RosterConfig {
    /// Parse a TOML document.
    pub fn from_toml(source: &str) -> RosterResult<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Read a TOML file.
    pub fn from_file(path: &Path) -> RosterResult<Self> {
        let source = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "Loaded roster config");
        Self::from_toml(&source)
    }

    /// Load `explicit` if given, else `wardiya.toml` in `dir` if present,
    /// else defaults. Environment overrides are applied last.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> RosterResult<Self> {
        Self::load_with(explicit, dir, |name| std::env::var(name).ok())
    }

    /// [`RosterConfig::load`] with an injected environment lookup.
    pub fn load_with<F>(explicit: Option<&Path>, dir: &Path, lookup: F) -> RosterResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let candidate = dir.join(CONFIG_FILE_NAME);
                if candidate.is_file() {
                    Self::from_file(&candidate)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env(lookup)?;
        Ok(config)
    }

    /// Apply `WARDIYA_ANCHOR`, `WARDIYA_TOTAL_WEEKS` and `WARDIYA_POLL_SECS`.
    pub fn apply_env<F>(&mut self, lookup: F) -> RosterResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(anchor) = lookup("WARDIYA_ANCHOR") {
            self.anchor = anchor;
        }
        if let Some(weeks) = lookup("WARDIYA_TOTAL_WEEKS") {
            self.total_weeks = weeks.trim().parse().map_err(|_| {
                RosterError::invalid_config(format!("WARDIYA_TOTAL_WEEKS is not an integer: {}", weeks))
            })?;
        }
        if let Some(secs) = lookup("WARDIYA_POLL_SECS") {
            self.poll_interval_secs = secs.trim().parse().map_err(|_| {
                RosterError::invalid_config(format!("WARDIYA_POLL_SECS is not an integer: {}", secs))
            })?;
        }
        Ok(())
    }

    /// Check every field and produce [`Settings`].
    pub fn validate(&self) -> RosterResult<Settings> {
        let anchor = NaiveDate::parse_from_str(self.anchor.trim(), "%Y-%m-%d").map_err(|e| {
            RosterError::invalid_config(format!("anchor '{}' is not a YYYY-MM-DD date: {}", self.anchor, e))
        })?;

        if self.total_weeks <= 0 {
            return Err(RosterError::invalid_config(format!(
                "total_weeks must be positive, got {}",
                self.total_weeks
            )));
        }
        let total_weeks = usize::try_from(self.total_weeks)
            .map_err(|_| RosterError::invalid_config("total_weeks is too large"))?;
        if total_weeks < CYCLE_LEN {
            return Err(RosterError::invalid_config(format!(
                "total_weeks must be at least {} to fill the dashboard, got {}",
                CYCLE_LEN, total_weeks
            )));
        }

        if self.poll_interval_secs == 0 {
            return Err(RosterError::invalid_config("poll_interval_secs must be at least 1"));
        }

        if self.storage_key.trim().is_empty() {
            return Err(RosterError::invalid_config("storage_key must not be empty"));
        }

        Ok(Settings {
            anchor,
            total_weeks,
            poll_interval: Duration::from_secs(self.poll_interval_secs),
            storage_key: self.storage_key.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let settings = RosterConfig::default().validate().unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.total_weeks, 52);
        assert_eq!(settings.poll_interval, Duration::from_secs(60));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = RosterConfig::from_toml("total_weeks = 26\n").unwrap();
        assert_eq!(config.total_weeks, 26);
        assert_eq!(config.anchor, DEFAULT_ANCHOR);
    }

    #[test]
    fn test_bad_anchor() {
        let config = RosterConfig {
            anchor: "03/01/2026".into(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(RosterError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_week_count_rejected() {
        for weeks in [0, -4, 2] {
            let config = RosterConfig {
                total_weeks: weeks,
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(RosterError::InvalidConfiguration(_))));
        }
    }

    #[test]
    fn test_zero_poll_interval() {
        let config = RosterConfig {
            poll_interval_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = RosterConfig::default();
        config
            .apply_env(|name| match name {
                "WARDIYA_ANCHOR" => Some("2027-01-02".into()),
                "WARDIYA_TOTAL_WEEKS" => Some("10".into()),
                _ => None,
            })
            .unwrap();
        let settings = config.validate().unwrap();
        assert_eq!(settings.anchor, NaiveDate::from_ymd_opt(2027, 1, 2).unwrap());
        assert_eq!(settings.total_weeks, 10);
    }

    #[test]
    fn test_env_rejects_garbage() {
        let mut config = RosterConfig::default();
        let result = config.apply_env(|name| (name == "WARDIYA_POLL_SECS").then(|| "soon".to_string()));
        assert!(result.is_err());
    }

    fn temp_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("wardiya-config-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let dir = temp_dir("empty");
        let config = RosterConfig::load_with(None, &dir, no_env).unwrap();
        assert_eq!(config, RosterConfig::default());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_discovers_file_in_dir() {
        let dir = temp_dir("discover");
        std::fs::write(dir.join(CONFIG_FILE_NAME), "anchor = \"2027-01-02\"\ntotal_weeks = 12\n").unwrap();

        let config = RosterConfig::load_with(None, &dir, no_env).unwrap();
        assert_eq!(config.anchor, "2027-01-02");
        assert_eq!(config.total_weeks, 12);
        assert_eq!(config.poll_interval_secs, DEFAULT_POLL_SECS);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_explicit_file_wins_over_discovered() {
        let dir = temp_dir("explicit");
        std::fs::write(dir.join(CONFIG_FILE_NAME), "total_weeks = 12\n").unwrap();
        let explicit = dir.join("other.toml");
        std::fs::write(&explicit, "total_weeks = 30\n").unwrap();

        let config = RosterConfig::load_with(Some(&explicit), &dir, no_env).unwrap();
        assert_eq!(config.total_weeks, 30);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_env_applied_after_file() {
        let dir = temp_dir("env");
        std::fs::write(dir.join(CONFIG_FILE_NAME), "total_weeks = 12\npoll_interval_secs = 5\n").unwrap();

        let config = RosterConfig::load_with(None, &dir, |name| {
            (name == "WARDIYA_TOTAL_WEEKS").then(|| "20".to_string())
        })
        .unwrap();
        assert_eq!(config.total_weeks, 20);
        assert_eq!(config.poll_interval_secs, 5);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = temp_dir("missing");
        let result = RosterConfig::load_with(Some(&dir.join("nope.toml")), &dir, no_env);
        assert!(matches!(result, Err(RosterError::Io(_))));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            RosterConfig::from_toml("total_weeks = \"many\""),
            Err(RosterError::Toml(_))
        ));
    }
}
