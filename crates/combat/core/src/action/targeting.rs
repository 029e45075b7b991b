//! Targeting system for actions.
//!
//! Only living participants are ever valid targets. Friend and foe are
//! decided by faction kind: the same kind is friendly, any other kind is
//! hostile.

use crate::action::ValidationError;
use crate::state::{CombatState, Participant, ParticipantId};

/// Which participants a skill or item may affect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TargetClass {
    /// The actor only.
    SelfOnly,
    /// One living participant of the actor's faction kind.
    SingleAlly,
    /// One living participant of another faction kind.
    SingleEnemy,
    /// Any one living participant.
    Any,
    /// Every living participant of the actor's faction kind.
    AllAllies,
    /// Every living participant of another faction kind.
    AllEnemies,
}

impl TargetClass {
    /// True when the caller must name exactly one target.
    pub fn requires_target(self) -> bool {
        matches!(
            self,
            TargetClass::SingleAlly | TargetClass::SingleEnemy | TargetClass::Any
        )
    }

    /// True when the effect lands on the whole candidate set.
    pub fn is_area(self) -> bool {
        matches!(self, TargetClass::AllAllies | TargetClass::AllEnemies)
    }
}

/// Living participants an attack may target: every hostile, never the actor.
pub fn attack_targets(state: &CombatState, actor: &Participant) -> Vec<ParticipantId> {
    state
        .living()
        .filter(|p| p.id != actor.id && p.is_hostile_to(actor))
        .map(|p| p.id.clone())
        .collect()
}

/// Candidate set for a skill or item of the given class.
pub fn class_targets(
    state: &CombatState,
    actor: &Participant,
    class: TargetClass,
) -> Vec<ParticipantId> {
    match class {
        TargetClass::SelfOnly => {
            if actor.is_alive() {
                vec![actor.id.clone()]
            } else {
                Vec::new()
            }
        }
        TargetClass::SingleAlly | TargetClass::AllAllies => state
            .living()
            .filter(|p| !p.is_hostile_to(actor))
            .map(|p| p.id.clone())
            .collect(),
        TargetClass::SingleEnemy | TargetClass::AllEnemies => state
            .living()
            .filter(|p| p.is_hostile_to(actor))
            .map(|p| p.id.clone())
            .collect(),
        TargetClass::Any => state.living().map(|p| p.id.clone()).collect(),
    }
}

/// Resolves the participants a skill or item will actually affect.
///
/// - Single-target classes require `target` to be in the candidate set.
/// - Self-only and area classes accept no target, or a member of the set.
pub fn resolve_class_targets(
    state: &CombatState,
    actor: &Participant,
    class: TargetClass,
    target: Option<&ParticipantId>,
) -> Result<Vec<ParticipantId>, ValidationError> {
    let candidates = class_targets(state, actor, class);

    if class.requires_target() {
        let target = target.ok_or(ValidationError::MissingTarget)?;
        return if candidates.contains(target) {
            Ok(vec![target.clone()])
        } else {
            Err(ValidationError::InvalidTarget(target.clone()))
        };
    }

    match target {
        Some(target) if !candidates.contains(target) => {
            Err(ValidationError::InvalidTarget(target.clone()))
        }
        _ => Ok(candidates),
    }
}
