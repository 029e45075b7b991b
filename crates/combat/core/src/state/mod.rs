//! Encounter state: the [`CombatState`] aggregate and everything it owns.
//!
//! The aggregate is plain data. It is built by
//! [`CombatEngine::initiate`](crate::engine::CombatEngine::initiate) and only
//! ever replaced wholesale by
//! [`CombatEngine::execute`](crate::engine::CombatEngine::execute); callers
//! treat it as read-only between executions.
mod common;
mod conditions;
mod error;
mod participant;
mod status;

pub use common::{ItemId, ParticipantId, Position, SkillId, Timestamp};
pub use conditions::{
    ConditionPayload, DefeatCondition, DefeatKind, Outcome, TerminalResult, VictoryCondition,
    VictoryKind,
};
pub use error::InitializationError;
pub use participant::{CombatStats, FactionKind, Item, Participant, ResourceMeter, Skill};
pub use status::{
    Application, EffectClassification, EffectDuration, ModifierMode, PeriodicEffect,
    StackPolicy, StatKind, StatModifier, StatusEffect, StatusEffects,
};

use crate::action::ActionKind;

/// Coarse indicator of whose turn it is.
///
/// Every non-player faction, allies included, is reported as `EnemyTurn`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Phase {
    PlayerTurn,
    EnemyTurn,
    Ended,
}

impl Phase {
    pub fn for_faction(faction: FactionKind) -> Self {
        match faction {
            FactionKind::Player => Phase::PlayerTurn,
            FactionKind::Ally | FactionKind::Enemy => Phase::EnemyTurn,
        }
    }
}

/// Opaque description of where the encounter takes place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Environment {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<String>,
}

impl Environment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            tags: Vec::new(),
        }
    }
}

/// Chronological record of one resolved action or round-boundary tick.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionLogEntry {
    pub round: u32,
    pub nonce: u64,
    pub actor: ParticipantId,
    /// `None` for entries produced by the status processor.
    pub kind: Option<ActionKind>,
    pub target: Option<ParticipantId>,
    pub summary: String,
    pub timestamp: Timestamp,
}

/// The encounter aggregate root.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatState {
    pub active: bool,
    pub phase: Phase,
    /// All participants, in the order they were supplied.
    pub participants: Vec<Participant>,
    pub current_turn: Option<ParticipantId>,
    /// Fixed initiative sequence computed at initiate.
    pub turn_order: Vec<ParticipantId>,
    /// Index into `turn_order` of the current turn.
    pub turn_index: usize,
    /// Starts at 1 and increments each time the turn order wraps.
    pub round: u32,
    pub environment: Option<Environment>,
    pub log: Vec<ActionLogEntry>,
    pub victory_conditions: Vec<VictoryCondition>,
    pub defeat_conditions: Vec<DefeatCondition>,
    /// Set once, when the encounter ends.
    #[cfg_attr(feature = "serde", serde(default))]
    pub terminal: Option<TerminalResult>,
    /// Base seed for every roll in this encounter.
    pub seed: u64,
    /// Number of actions resolved so far.
    pub nonce: u64,
    pub started_at: Timestamp,
    pub turn_started_at: Timestamp,
}

impl CombatState {
    pub fn participant(&self, id: &ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.id == id)
    }

    pub fn participant_mut(&mut self, id: &ParticipantId) -> Option<&mut Participant> {
        self.participants.iter_mut().find(|p| &p.id == id)
    }

    /// Index of a participant in `participants`, used as its RNG slot.
    pub fn slot_of(&self, id: &ParticipantId) -> Option<usize> {
        self.participants.iter().position(|p| &p.id == id)
    }

    pub fn living(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter().filter(|p| p.is_alive())
    }

    pub fn living_by_faction(&self, faction: FactionKind) -> impl Iterator<Item = &Participant> {
        self.living().filter(move |p| p.faction == faction)
    }

    pub fn current_actor(&self) -> Option<&Participant> {
        self.current_turn.as_ref().and_then(|id| self.participant(id))
    }

    /// The unique player-kind participant.
    pub fn player(&self) -> Option<&Participant> {
        self.participants
            .iter()
            .find(|p| p.faction == FactionKind::Player)
    }

    pub fn is_ended(&self) -> bool {
        self.phase == Phase::Ended
    }

    pub(crate) fn push_log(
        &mut self,
        actor: ParticipantId,
        kind: Option<ActionKind>,
        target: Option<ParticipantId>,
        summary: String,
        timestamp: Timestamp,
    ) {
        self.log.push(ActionLogEntry {
            round: self.round,
            nonce: self.nonce,
            actor,
            kind,
            target,
            summary,
            timestamp,
        });
    }
}
