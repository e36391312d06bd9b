//! Weekly shift rotation.

pub mod model;

use model::{Participant, RotationAssignment};

/// The three-week cycle.
///
/// Each entry shifts everyone one role up, so every participant holds every
/// role exactly once per cycle and never keeps the same role two weeks in a row.
pub const ROTATION_TABLE: [RotationAssignment; 3] = [
    RotationAssignment {
        first: Participant::Ahmed,
        second: Participant::Yousef,
        third: Participant::Omar,
    },
    RotationAssignment {
        first: Participant::Yousef,
        second: Participant::Omar,
        third: Participant::Ahmed,
    },
    RotationAssignment {
        first: Participant::Omar,
        second: Participant::Ahmed,
        third: Participant::Yousef,
    },
];

/// Length of the rotation cycle in weeks.
pub const CYCLE_LEN: usize = ROTATION_TABLE.len();

/// Assignment for the zero-based `week_index`.
pub fn rotation_for(week_index: usize) -> RotationAssignment {
    ROTATION_TABLE[week_index % CYCLE_LEN]
}
