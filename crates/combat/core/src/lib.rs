//! Deterministic rules for turn-based tactical encounters.
//!
//! `combat-core` defines the canonical combat rules (participants, actions,
//! initiative, status effects, termination) and exposes pure APIs that hosts
//! and offline tools can share. All state changes flow through
//! [`engine::CombatEngine`], which takes the current [`CombatState`] by
//! reference and returns an updated copy. Randomness, balance tables and the
//! clock enter through [`CombatEnv`]; the crate itself performs no I/O and
//! does not log.
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;

#[cfg(test)]
pub(crate) mod test_utils;

pub use action::{
    ActionKind, ActionResult, ActionTransition, AppliedValue, AttackAction, AvailableAction,
    CombatAction, DefendAction, Effect, EffectFlags, EffectResult, FleeAction, ItemAction,
    MoveAction, ResourceKind, SkillAction, StateError, TargetClass, ValidationError, WaitAction,
    available_actions, valid_targets,
};
pub use config::{CombatConfig, CombatTables};
pub use engine::{CombatEngine, EncounterSetup, ExecuteError, Resolution, StatusTick};
pub use env::{CombatEnv, FixedRng, PcgRng, RngOracle};
pub use error::{CombatError, ErrorSeverity};
pub use state::{
    ActionLogEntry, CombatState, CombatStats, ConditionPayload, DefeatCondition, DefeatKind,
    EffectClassification, EffectDuration, Environment, FactionKind, InitializationError, Item,
    ItemId, Outcome, Participant, ParticipantId, Phase, Position, ResourceMeter, Skill, SkillId,
    StackPolicy, StatKind, StatModifier, StatusEffect, TerminalResult, Timestamp,
    VictoryCondition, VictoryKind,
};
