//! Status effect system for participants.
//!
//! Status effects are timed or permanent modifiers attached to a participant.
//! They are created by the resolver, counted down by the status processor at
//! round boundaries, and removed when their duration runs out or when they
//! are dispelled.
//!
//! # Duration
//!
//! - `Turns(n)` loses one turn per round boundary and is removed at zero
//! - `Permanent` never expires on its own
//! - `UntilOwnerTurn` is removed when its owner's next turn begins

use arrayvec::ArrayVec;

use crate::config::CombatConfig;
use crate::state::ParticipantId;

/// Active status effects on a participant, keyed by effect id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { CombatConfig::MAX_STATUS_EFFECTS }>,
}

/// A single status effect instance.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub id: String,
    pub name: String,
    pub classification: EffectClassification,
    /// Free-form grouping such as "poison" or "guard".
    pub category: String,
    pub duration: EffectDuration,
    pub stacks: u32,
    pub max_stacks: u32,
    pub stacking: StackPolicy,
    pub modifiers: Vec<StatModifier>,
    pub periodic: Option<PeriodicEffect>,
    pub source: Option<ParticipantId>,
    pub dispellable: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EffectClassification {
    Buff,
    Debuff,
    Neutral,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EffectDuration {
    /// Remaining round boundaries before removal. Always positive while active.
    Turns(u32),
    Permanent,
    UntilOwnerTurn,
}

/// What happens when an effect with the same id is applied again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StackPolicy {
    /// Keep a single stack; the longer of the two durations wins.
    #[default]
    Refresh,
    /// Add a stack up to `max_stacks` and refresh the duration.
    Stack,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StatKind {
    Attack,
    Defense,
    Speed,
    Accuracy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ModifierMode {
    /// Added to the base value.
    Additive,
    /// Percentage applied after all additive modifiers (50 = x1.5, -25 = x0.75).
    Multiplicative,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatModifier {
    pub stat: StatKind,
    pub magnitude: i32,
    pub mode: ModifierMode,
}

impl StatModifier {
    pub fn additive(stat: StatKind, magnitude: i32) -> Self {
        Self {
            stat,
            magnitude,
            mode: ModifierMode::Additive,
        }
    }

    pub fn multiplicative(stat: StatKind, percent: i32) -> Self {
        Self {
            stat,
            magnitude: percent,
            mode: ModifierMode::Multiplicative,
        }
    }
}

/// Effect applied once per stack at every round boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PeriodicEffect {
    Damage(u32),
    Heal(u32),
}

impl StatusEffect {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        classification: EffectClassification,
        duration: EffectDuration,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            classification,
            category: String::new(),
            duration,
            stacks: 1,
            max_stacks: 1,
            stacking: StackPolicy::Refresh,
            modifiers: Vec::new(),
            periodic: None,
            source: None,
            dispellable: true,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_modifier(mut self, modifier: StatModifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    pub fn with_periodic(mut self, periodic: PeriodicEffect) -> Self {
        self.periodic = Some(periodic);
        self
    }

    pub fn with_stacking(mut self, stacking: StackPolicy, max_stacks: u32) -> Self {
        self.stacking = stacking;
        self.max_stacks = max_stacks.max(1);
        self
    }

    pub fn with_source(mut self, source: ParticipantId) -> Self {
        self.source = Some(source);
        self
    }

    pub fn non_dispellable(mut self) -> Self {
        self.dispellable = false;
        self
    }

    pub fn is_permanent(&self) -> bool {
        matches!(self.duration, EffectDuration::Permanent)
    }

    /// Sum of this effect's modifiers for `stat`, scaled by stacks.
    ///
    /// Returns `(additive, multiplicative_percent)`.
    fn contribution(&self, stat: StatKind) -> (i64, i64) {
        let stacks = i64::from(self.stacks);
        self.modifiers
            .iter()
            .filter(|m| m.stat == stat)
            .fold((0, 0), |(add, mul), m| {
                let scaled = i64::from(m.magnitude).saturating_mul(stacks);
                match m.mode {
                    ModifierMode::Additive => (add.saturating_add(scaled), mul),
                    ModifierMode::Multiplicative => (add, mul.saturating_add(scaled)),
                }
            })
    }
}

/// Outcome of [`StatusEffects::apply`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Application {
    Added { stacks: u32 },
    Refreshed { stacks: u32 },
    Stacked { stacks: u32 },
    /// The set is full; the effect was dropped.
    Rejected,
}

impl Application {
    /// Stacks held after the application; zero when rejected.
    pub fn stacks(self) -> u32 {
        match self {
            Application::Added { stacks }
            | Application::Refreshed { stacks }
            | Application::Stacked { stacks } => stacks,
            Application::Rejected => 0,
        }
    }
}

impl StatusEffects {
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.id == id)
    }

    pub fn has(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Applies an effect, honouring the stacking policy of the incoming effect.
    pub fn apply(&mut self, mut incoming: StatusEffect) -> Application {
        incoming.max_stacks = incoming.max_stacks.max(1);
        incoming.stacks = incoming.stacks.clamp(1, incoming.max_stacks);

        if let Some(existing) = self.effects.iter_mut().find(|e| e.id == incoming.id) {
            existing.duration = longer(existing.duration, incoming.duration);
            existing.max_stacks = incoming.max_stacks;
            existing.source = incoming.source.or(existing.source.take());
            return match incoming.stacking {
                StackPolicy::Refresh => {
                    existing.stacks = existing.stacks.min(existing.max_stacks);
                    Application::Refreshed {
                        stacks: existing.stacks,
                    }
                }
                StackPolicy::Stack => {
                    existing.stacks = existing.stacks.saturating_add(1).min(existing.max_stacks);
                    Application::Stacked {
                        stacks: existing.stacks,
                    }
                }
            };
        }

        if self.effects.is_full() {
            return Application::Rejected;
        }
        let stacks = incoming.stacks;
        self.effects.push(incoming);
        Application::Added { stacks }
    }

    /// Removes an effect by id, returning it if present.
    pub fn remove(&mut self, id: &str) -> Option<StatusEffect> {
        let index = self.effects.iter().position(|e| e.id == id)?;
        Some(self.effects.remove(index))
    }

    /// Removes every dispellable effect of the given classification.
    ///
    /// Returns the ids of the removed effects in their original order.
    pub fn dispel(&mut self, classification: EffectClassification) -> Vec<String> {
        let removed = self
            .effects
            .iter()
            .filter(|e| e.dispellable && e.classification == classification)
            .map(|e| e.id.clone())
            .collect();
        self.effects
            .retain(|e| !(e.dispellable && e.classification == classification));
        removed
    }

    /// Removes effects that last until their owner's next turn.
    pub fn clear_until_owner_turn(&mut self) -> Vec<String> {
        let removed = self
            .effects
            .iter()
            .filter(|e| e.duration == EffectDuration::UntilOwnerTurn)
            .map(|e| e.id.clone())
            .collect();
        self.effects
            .retain(|e| e.duration != EffectDuration::UntilOwnerTurn);
        removed
    }

    /// Counts every `Turns(n)` effect down by one and drops those reaching zero.
    ///
    /// Returns the ids of the expired effects.
    pub fn count_down(&mut self) -> Vec<String> {
        let mut expired = Vec::new();
        for effect in self.effects.iter_mut() {
            if let EffectDuration::Turns(remaining) = effect.duration {
                let remaining = remaining.saturating_sub(1);
                effect.duration = EffectDuration::Turns(remaining);
                if remaining == 0 {
                    expired.push(effect.id.clone());
                }
            }
        }
        self.effects
            .retain(|e| e.duration != EffectDuration::Turns(0));
        expired
    }

    /// Aggregated `(additive, multiplicative_percent)` for one stat.
    pub fn modifier_totals(&self, stat: StatKind) -> (i64, i64) {
        self.effects
            .iter()
            .map(|e| e.contribution(stat))
            .fold((0, 0), |(a, m), (da, dm)| {
                (a.saturating_add(da), m.saturating_add(dm))
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

fn longer(current: EffectDuration, incoming: EffectDuration) -> EffectDuration {
    use EffectDuration::*;
    match (current, incoming) {
        (Permanent, _) | (_, Permanent) => Permanent,
        (Turns(a), Turns(b)) => Turns(a.max(b)),
        (Turns(n), UntilOwnerTurn) | (UntilOwnerTurn, Turns(n)) => Turns(n),
        (UntilOwnerTurn, UntilOwnerTurn) => UntilOwnerTurn,
    }
}
