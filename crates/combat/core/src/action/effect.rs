//! Declarative effects carried by skills and items.
//!
//! An [`Effect`] describes *what* happens to one target; the skill or item
//! that carries it decides *who* is targeted. Effects never raise errors: a
//! target that died earlier in the same action is skipped, and every resource
//! change is clamped into range.

use crate::action::combat::GUARD_EFFECT_ID;
use crate::action::{AppliedValue, EffectFlags, EffectResult, ResourceKind};
use crate::combat::calculate_damage;
use crate::config::CombatTables;
use crate::state::{Application, CombatState, EffectClassification, ParticipantId, StatusEffect};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Effect {
    /// `max(minimum, power + attack - defense)` damage. Always hits.
    Damage { power: u32 },
    Heal { amount: u32 },
    RestoreMana { amount: u32 },
    RestoreActionPoints { amount: u32 },
    ApplyStatus(StatusEffect),
    /// Removes every dispellable effect of the classification.
    Dispel {
        classification: EffectClassification,
    },
}

/// Applies every effect to every target, in declaration order per target.
pub(crate) fn apply_effects(
    state: &mut CombatState,
    source: &ParticipantId,
    targets: &[ParticipantId],
    effects: &[Effect],
    tables: &CombatTables,
) -> Vec<EffectResult> {
    let mut results = Vec::with_capacity(targets.len() * effects.len());
    for target in targets {
        for effect in effects {
            results.push(apply_effect(state, source, target, effect, tables));
        }
    }
    results
}

fn apply_effect(
    state: &mut CombatState,
    source: &ParticipantId,
    target_id: &ParticipantId,
    effect: &Effect,
    tables: &CombatTables,
) -> EffectResult {
    let attack = state
        .participant(source)
        .map_or(0, |p| p.effective_stats().attack);

    let Some(target) = state.participant_mut(target_id) else {
        return EffectResult::new(target_id.clone(), AppliedValue::None);
    };
    if !target.is_alive() {
        return EffectResult::new(target_id.clone(), AppliedValue::None);
    }

    match effect {
        Effect::Damage { power } => {
            let defense = target.effective_stats().defense;
            let planned = calculate_damage(attack, defense, *power, &tables.damage);
            let actual = target.health.drain(planned);

            let mut flags = EffectFlags::empty();
            if actual < planned {
                flags |= EffectFlags::CLAMPED;
            }
            if target.status_effects.has(GUARD_EFFECT_ID) {
                flags |= EffectFlags::BLOCKED;
            }
            if !target.is_alive() {
                flags |= EffectFlags::KILLED;
            }
            EffectResult::new(target_id.clone(), AppliedValue::Damage { planned, actual })
                .with_flags(flags)
        }
        Effect::Heal { amount } => {
            let actual = target.health.restore(*amount);
            let result = EffectResult::new(
                target_id.clone(),
                AppliedValue::Healing {
                    planned: *amount,
                    actual,
                },
            );
            if actual < *amount {
                result.with_flags(EffectFlags::CLAMPED)
            } else {
                result
            }
        }
        Effect::RestoreMana { amount } => {
            let delta = target.mana.as_mut().map_or(0, |mana| mana.restore(*amount));
            EffectResult::new(
                target_id.clone(),
                AppliedValue::ResourceChange {
                    resource: ResourceKind::Mana,
                    delta: i32::try_from(delta).unwrap_or(i32::MAX),
                },
            )
        }
        Effect::RestoreActionPoints { amount } => {
            let delta = target.action_points.restore(*amount);
            EffectResult::new(
                target_id.clone(),
                AppliedValue::ResourceChange {
                    resource: ResourceKind::ActionPoints,
                    delta: i32::try_from(delta).unwrap_or(i32::MAX),
                },
            )
        }
        Effect::ApplyStatus(template) => {
            let status = template.clone().with_source(source.clone());
            let effect_id = status.id.clone();
            match target.status_effects.apply(status) {
                Application::Rejected => {
                    EffectResult::new(target_id.clone(), AppliedValue::None)
                }
                Application::Added { stacks }
                | Application::Refreshed { stacks }
                | Application::Stacked { stacks } => EffectResult::new(
                    target_id.clone(),
                    AppliedValue::StatusApplied {
                        effect: effect_id,
                        stacks,
                    },
                ),
            }
        }
        Effect::Dispel { classification } => {
            let removed = target.status_effects.dispel(*classification);
            let value = match removed.len() {
                0 => AppliedValue::None,
                _ => AppliedValue::StatusRemoved {
                    effect: removed.join(", "),
                },
            };
            EffectResult::new(target_id.clone(), value)
        }
    }
}

/// Short phrase describing an effect result, used in log summaries.
pub(crate) fn describe(result: &EffectResult) -> Option<String> {
    let target = &result.target;
    let text = match &result.value {
        AppliedValue::Damage { actual, .. } => {
            if result.flags.contains(EffectFlags::KILLED) {
                format!("{target} takes {actual} damage and falls")
            } else {
                format!("{target} takes {actual} damage")
            }
        }
        AppliedValue::Healing { actual, .. } => format!("{target} recovers {actual} health"),
        AppliedValue::ResourceChange { resource, delta } => {
            format!("{target} gains {delta} {resource}")
        }
        AppliedValue::StatusApplied { effect, stacks } => {
            if *stacks > 1 {
                format!("{target} is affected by {effect} (x{stacks})")
            } else {
                format!("{target} is affected by {effect}")
            }
        }
        AppliedValue::StatusRemoved { effect } => format!("{target} is cleansed of {effect}"),
        AppliedValue::Movement { to, .. } => format!("{target} moves to {to}"),
        AppliedValue::Flee { success: true, .. } => format!("{target} escapes"),
        AppliedValue::Flee { success: false, .. } => format!("{target} fails to escape"),
        AppliedValue::ApRegenQueued { amount } => {
            format!("{target} will recover {amount} extra action point(s)")
        }
        AppliedValue::None => return None,
    };
    Some(text)
}

/// Joins effect descriptions into one sentence fragment.
pub(crate) fn describe_all(results: &[EffectResult]) -> String {
    let parts: Vec<String> = results.iter().filter_map(describe).collect();
    if parts.is_empty() {
        "no effect".to_string()
    } else {
        parts.join("; ")
    }
}
