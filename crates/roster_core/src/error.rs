use crate::models::Position;
use crate::tactics::Formation;
use thiserror::Error;

/// Caller-visible reason a roster action was refused. The state is left
/// untouched whenever one of these is produced; the text is meant to be
/// shown to the user as is.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Notice {
    #[error("{name} is already on your roster")]
    AlreadyRostered { id: u32, name: String },

    #[error(
        "No free {position} slot in {formation}. Occupied by: {}",
        .occupants.join(", ")
    )]
    NoCompatibleSlot {
        position: Position,
        formation: Formation,
        occupants: Vec<String>,
    },
}

/// Why a hydration payload was refused. Any of these rejects the payload as
/// a whole.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HydrateError {
    #[error("Hydration payload must be a JSON object")]
    NotAnObject,

    #[error("Invalid field '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Player {id} appears more than once across lineup and bench")]
    DuplicatePlayer { id: u32 },
}

impl HydrateError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        HydrateError::InvalidField { field, reason: reason.into() }
    }
}
