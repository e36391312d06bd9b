//! Rotation domain models.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{RosterError, RosterResult};

/// One of the three people on the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Participant {
    Ahmed,
    Yousef,
    Omar,
}

impl Participant {
    /// Every participant, in table order.
    pub const ALL: [Participant; 3] = [Self::Ahmed, Self::Yousef, Self::Omar];

    /// Parse a participant name, ignoring case.
    pub fn parse(s: &str) -> RosterResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "ahmed" => Ok(Self::Ahmed),
            "yousef" => Ok(Self::Yousef),
            "omar" => Ok(Self::Omar),
            _ => Err(RosterError::UnknownParticipant(s.to_string())),
        }
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ahmed => "Ahmed",
            Self::Yousef => "Yousef",
            Self::Omar => "Omar",
        }
    }

    /// Lowercase slug, stable across versions. Used as a style key by adapters.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Ahmed => "ahmed",
            Self::Yousef => "yousef",
            Self::Omar => "omar",
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A shift slot within a week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    First,
    Second,
    Third,
}

impl Role {
    pub const ALL: [Role; 3] = [Self::First, Self::Second, Self::Third];

    /// Parse from string ("first", "second", "third", or 1-3).
    pub fn parse(s: &str) -> RosterResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "first" | "1" => Ok(Self::First),
            "second" | "2" => Ok(Self::Second),
            "third" | "3" => Ok(Self::Third),
            _ => Err(RosterError::UnknownRole(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Second => "second",
            Self::Third => "third",
        }
    }

    /// Human label, e.g. "First Shift".
    pub fn label(&self) -> &'static str {
        match self {
            Self::First => "First Shift",
            Self::Second => "Second Shift",
            Self::Third => "Third Shift",
        }
    }
}

/// Who works which shift in a given week.
///
/// Always a permutation of [`Participant::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationAssignment {
    pub first: Participant,
    pub second: Participant,
    pub third: Participant,
}

impl RotationAssignment {
    /// Participant holding `role`.
    pub fn get(&self, role: Role) -> Participant {
        match role {
            Role::First => self.first,
            Role::Second => self.second,
            Role::Third => self.third,
        }
    }

    /// Role held by `participant`, if any.
    pub fn role_of(&self, participant: Participant) -> Option<Role> {
        self.iter()
            .find(|(_, p)| *p == participant)
            .map(|(role, _)| role)
    }

    pub fn contains(&self, participant: Participant) -> bool {
        self.role_of(participant).is_some()
    }

    /// `(role, participant)` pairs in shift order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, Participant)> + '_ {
        Role::ALL.into_iter().map(move |role| (role, self.get(role)))
    }

    /// True when every participant appears exactly once.
    pub fn is_permutation(&self) -> bool {
        Participant::ALL
            .iter()
            .all(|p| self.iter().filter(|(_, q)| q == p).count() == 1)
    }
}
