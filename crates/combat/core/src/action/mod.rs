//! Combat actions and their resolution.
//!
//! [`CombatAction`] is a closed variant: one struct per kind, each carrying
//! exactly the fields that kind needs. Every struct implements
//! [`ActionTransition`], which the engine drives in two steps:
//!
//! 1. `validate`: kind-specific legality checks (after the shared checks in
//!    [`validation`]), never mutates
//! 2. `apply`: resolves effects on a working copy of the state, after the
//!    action point cost has been deducted
//!
//! Adding a kind means adding a variant here; every dispatch below is an
//! exhaustive match, so the compiler points at each place that needs it.
mod ability;
mod available;
mod combat;
mod effect;
mod error;
mod flee;
mod inventory;
mod movement;
mod targeting;
mod types;
mod wait;

pub mod validation;

pub use ability::SkillAction;
pub use available::{AvailableAction, available_actions, valid_targets};
pub use combat::{AttackAction, DefendAction, GUARD_EFFECT_ID};
pub use effect::Effect;
pub use error::{StateError, ValidationError};
pub use flee::FleeAction;
pub use inventory::ItemAction;
pub use movement::MoveAction;
pub use targeting::{TargetClass, attack_targets, class_targets, resolve_class_targets};
pub use types::{ActionResult, AppliedValue, EffectFlags, EffectResult, ResourceKind};
pub use wait::WaitAction;

pub(crate) use effect::{apply_effects, describe_all};

use crate::config::CombatTables;
use crate::env::CombatEnv;
use crate::state::{CombatState, ItemId, Participant, ParticipantId, Position, SkillId};

/// Discriminant of [`CombatAction`], used in logs and availability queries.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ActionKind {
    Attack,
    Defend,
    Skill,
    Item,
    Move,
    Flee,
    Wait,
}

/// What `apply` hands back to the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Applied {
    pub effects: Vec<EffectResult>,
    pub summary: String,
}

/// Behaviour shared by every action kind.
pub trait ActionTransition {
    fn actor(&self) -> &ParticipantId;

    fn kind(&self) -> ActionKind;

    /// Explicit target, if the kind carries one.
    fn target(&self) -> Option<&ParticipantId> {
        None
    }

    /// Action points this action costs `actor`.
    fn cost(&self, actor: &Participant, tables: &CombatTables) -> u32;

    /// Kind-specific checks. Turn, liveness and action points are already verified.
    fn validate(
        &self,
        _state: &CombatState,
        _actor: &Participant,
        _tables: &CombatTables,
    ) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Resolves the action. The cost has already been deducted from the actor.
    fn apply(&self, state: &mut CombatState, env: &CombatEnv<'_>)
    -> Result<Applied, ValidationError>;
}

/// A proposed action. Ephemeral: built by the caller, consumed by one resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum CombatAction {
    Attack(AttackAction),
    Defend(DefendAction),
    Skill(SkillAction),
    Item(ItemAction),
    Move(MoveAction),
    Flee(FleeAction),
    Wait(WaitAction),
}

macro_rules! dispatch {
    ($action:expr, $transition:ident => $body:expr) => {
        match $action {
            CombatAction::Attack($transition) => $body,
            CombatAction::Defend($transition) => $body,
            CombatAction::Skill($transition) => $body,
            CombatAction::Item($transition) => $body,
            CombatAction::Move($transition) => $body,
            CombatAction::Flee($transition) => $body,
            CombatAction::Wait($transition) => $body,
        }
    };
}

impl CombatAction {
    pub fn attack(actor: impl Into<ParticipantId>, target: impl Into<ParticipantId>) -> Self {
        Self::Attack(AttackAction::new(actor.into(), target.into()))
    }

    pub fn defend(actor: impl Into<ParticipantId>) -> Self {
        Self::Defend(DefendAction::new(actor.into()))
    }

    pub fn skill(
        actor: impl Into<ParticipantId>,
        skill: impl Into<SkillId>,
        target: Option<ParticipantId>,
    ) -> Self {
        Self::Skill(SkillAction::new(actor.into(), skill.into(), target))
    }

    pub fn item(
        actor: impl Into<ParticipantId>,
        item: impl Into<ItemId>,
        target: Option<ParticipantId>,
    ) -> Self {
        Self::Item(ItemAction::new(actor.into(), item.into(), target))
    }

    pub fn movement(actor: impl Into<ParticipantId>, destination: Position) -> Self {
        Self::Move(MoveAction::new(actor.into(), destination))
    }

    pub fn flee(actor: impl Into<ParticipantId>) -> Self {
        Self::Flee(FleeAction::new(actor.into()))
    }

    pub fn wait(actor: impl Into<ParticipantId>) -> Self {
        Self::Wait(WaitAction::new(actor.into()))
    }

    pub fn as_transition(&self) -> &dyn ActionTransition {
        dispatch!(self, transition => transition)
    }

    pub fn actor(&self) -> &ParticipantId {
        dispatch!(self, transition => transition.actor())
    }

    pub fn kind(&self) -> ActionKind {
        dispatch!(self, transition => transition.kind())
    }

    pub fn target(&self) -> Option<&ParticipantId> {
        dispatch!(self, transition => transition.target())
    }

    pub fn cost(&self, actor: &Participant, tables: &CombatTables) -> u32 {
        dispatch!(self, transition => transition.cost(actor, tables))
    }
}
