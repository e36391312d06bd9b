//! Centralized error types for Wardiya.

use thiserror::Error;

/// Main error type for roster operations.
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Unknown participant: {0}")]
    UnknownParticipant(String),

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Storage error: {0}")]
    Storage(#[from] wardiya_db::DbError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config file error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type for roster operations.
pub type RosterResult<T> = Result<T, RosterError>;

impl RosterError {
    /// Create an invalid configuration error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}
