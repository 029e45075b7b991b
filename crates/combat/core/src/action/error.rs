//! Action rejection errors.
//!
//! [`ValidationError`] covers illegal actions; [`StateError`] covers an
//! encounter that cannot accept any action right now. Neither is raised after
//! mutation starts: both are returned before the state is touched.

use crate::error::{CombatError, ErrorSeverity};
use crate::state::{ItemId, ParticipantId, SkillId};

/// The proposed action is not legal in the current state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValidationError {
    #[error("participant {0} not found")]
    ActorNotFound(ParticipantId),

    #[error("it is not {actor}'s turn (current: {current})")]
    NotYourTurn {
        actor: ParticipantId,
        current: ParticipantId,
    },

    #[error("participant {0} is dead")]
    ActorDead(ParticipantId),

    #[error("insufficient action points: need {required}, have {available}")]
    InsufficientActionPoints { required: u32, available: u32 },

    #[error("insufficient mana: need {required}, have {available}")]
    InsufficientMana { required: u32, available: u32 },

    #[error("skill {skill} is on cooldown for {remaining} more turn(s)")]
    SkillOnCooldown { skill: SkillId, remaining: u32 },

    #[error("unknown skill {0}")]
    UnknownSkill(SkillId),

    #[error("unknown item {0}")]
    UnknownItem(ItemId),

    #[error("item {0} is depleted")]
    ItemDepleted(ItemId),

    #[error("this action requires a target")]
    MissingTarget,

    #[error("{0} is not a valid target for this action")]
    InvalidTarget(ParticipantId),

    #[error("destination is not a valid position")]
    InvalidDestination,

    #[error("destination is {distance} tiles away (max {max})")]
    OutOfRange { distance: u32, max: u32 },
}

impl CombatError for ValidationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ActorNotFound(_) => "actor_not_found",
            Self::NotYourTurn { .. } => "not_your_turn",
            Self::ActorDead(_) => "actor_dead",
            Self::InsufficientActionPoints { .. } => "insufficient_action_points",
            Self::InsufficientMana { .. } => "insufficient_mana",
            Self::SkillOnCooldown { .. } => "skill_on_cooldown",
            Self::UnknownSkill(_) => "unknown_skill",
            Self::UnknownItem(_) => "unknown_item",
            Self::ItemDepleted(_) => "item_depleted",
            Self::MissingTarget => "missing_target",
            Self::InvalidTarget(_) => "invalid_target",
            Self::InvalidDestination => "invalid_destination",
            Self::OutOfRange { .. } => "out_of_range",
        }
    }
}

/// The encounter cannot accept actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    #[error("no encounter is in progress")]
    NoEncounter,

    #[error("the encounter is not active")]
    EncounterInactive,

    #[error("the encounter has already ended")]
    AlreadyEnded,

    #[error("another action is already being executed")]
    ExecutionInFlight,
}

impl CombatError for StateError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::State
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoEncounter => "no_encounter",
            Self::EncounterInactive => "encounter_inactive",
            Self::AlreadyEnded => "already_ended",
            Self::ExecutionInFlight => "execution_in_flight",
        }
    }
}
