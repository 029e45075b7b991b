use crate::error::{CombatError, ErrorSeverity};
use crate::state::ParticipantId;

/// Errors raised while building an encounter from participant definitions.
///
/// Malformed upstream data fails here, before the first turn, never mid-encounter.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InitializationError {
    #[error("an encounter needs at least one participant")]
    NoParticipants,

    #[error("encounter exceeds {max} participants (got {count})")]
    TooManyParticipants { count: usize, max: usize },

    #[error("participant at index {index} has an empty id")]
    EmptyId { index: usize },

    #[error("participant id {0} appears more than once")]
    DuplicateId(ParticipantId),

    #[error("no player-kind participant supplied")]
    MissingPlayer,

    #[error("more than one player-kind participant supplied ({0} and {1})")]
    MultiplePlayers(ParticipantId, ParticipantId),

    #[error("participant {id} is missing required value `{field}`")]
    MissingVitals { id: ParticipantId, field: &'static str },
}

impl CombatError for InitializationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Setup
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoParticipants => "no_participants",
            Self::TooManyParticipants { .. } => "too_many_participants",
            Self::EmptyId { .. } => "empty_id",
            Self::DuplicateId(_) => "duplicate_id",
            Self::MissingPlayer => "missing_player",
            Self::MultiplePlayers(..) => "multiple_players",
            Self::MissingVitals { .. } => "missing_vitals",
        }
    }
}
