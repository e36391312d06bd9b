//! Wardiya Core Library
//!
//! Rotation, schedule generation, current-week resolution and week-change
//! tracking for the three-person shift roster.

pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod poller;
pub mod rotation;
pub mod schedule;
pub mod tracker;

pub use error::{RosterError, RosterResult};
