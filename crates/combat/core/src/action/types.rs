//! Result records produced by the resolver.
//!
//! - `EffectResult`: what happened to one target
//! - `ActionResult`: everything one action did, plus a log-ready summary

use crate::action::ActionKind;
use crate::state::{ParticipantId, Position};

/// Resource touched by a `ResourceChange`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ResourceKind {
    Health,
    Mana,
    ActionPoints,
}

/// The actual value applied by an effect.
///
/// Captures both the planned value and what actually happened after clamping.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AppliedValue {
    Damage { planned: u32, actual: u32 },

    /// Actual healing is capped at max health.
    Healing { planned: u32, actual: u32 },

    /// Positive = restore, negative = drain.
    ResourceChange { resource: ResourceKind, delta: i32 },

    StatusApplied { effect: String, stacks: u32 },

    StatusRemoved { effect: String },

    Movement { from: Option<Position>, to: Position },

    Flee { chance: u32, roll: u32, success: bool },

    /// Action points granted at the start of the actor's next turn.
    ApRegenQueued { amount: u32 },

    /// Nothing applied (a missed attack, a dropped status).
    None,
}

bitflags::bitflags! {
    /// Flags qualifying an [`EffectResult`].
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct EffectFlags: u8 {
        /// The hit check failed.
        const MISSED = 1 << 0;
        /// The target was guarding when hit.
        const BLOCKED = 1 << 1;
        /// The effect brought the target to zero health.
        const KILLED = 1 << 2;
        /// The planned value was clamped to keep the target's resources in range.
        const CLAMPED = 1 << 3;
    }
}

/// Result of an individual effect application.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectResult {
    pub target: ParticipantId,
    pub value: AppliedValue,
    pub flags: EffectFlags,
}

impl EffectResult {
    pub fn new(target: ParticipantId, value: AppliedValue) -> Self {
        Self {
            target,
            value,
            flags: EffectFlags::empty(),
        }
    }

    pub fn with_flags(mut self, flags: EffectFlags) -> Self {
        self.flags |= flags;
        self
    }
}

/// Result of resolving one action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionResult {
    pub actor: ParticipantId,
    pub kind: ActionKind,
    pub target: Option<ParticipantId>,
    /// Action points spent.
    pub cost: u32,
    /// Individual effect results, in execution order.
    pub effects: Vec<EffectResult>,
    /// Human-readable line for the action log.
    pub summary: String,
}

impl ActionResult {
    pub fn total_damage(&self) -> u32 {
        self.effects
            .iter()
            .map(|e| match e.value {
                AppliedValue::Damage { actual, .. } => actual,
                _ => 0,
            })
            .sum()
    }

    pub fn total_healing(&self) -> u32 {
        self.effects
            .iter()
            .map(|e| match e.value {
                AppliedValue::Healing { actual, .. } => actual,
                _ => 0,
            })
            .sum()
    }

    /// True when this action was a successful flee.
    pub fn fled(&self) -> bool {
        self.effects
            .iter()
            .any(|e| matches!(e.value, AppliedValue::Flee { success: true, .. }))
    }

    pub fn missed(&self) -> bool {
        self.effects
            .iter()
            .any(|e| e.flags.contains(EffectFlags::MISSED))
    }
}
