use crate::action::{
    ActionKind, ActionTransition, Applied, ValidationError, apply_effects, describe_all,
    resolve_class_targets,
};
use crate::config::CombatTables;
use crate::env::CombatEnv;
use crate::state::{CombatState, Participant, ParticipantId, SkillId};

/// Uses one of the actor's skills.
///
/// Costs the skill's action points and mana, then puts the skill on cooldown.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillAction {
    pub actor: ParticipantId,
    pub skill: SkillId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: Option<ParticipantId>,
}

impl SkillAction {
    pub fn new(actor: ParticipantId, skill: SkillId, target: Option<ParticipantId>) -> Self {
        Self {
            actor,
            skill,
            target,
        }
    }
}

impl ActionTransition for SkillAction {
    fn actor(&self) -> &ParticipantId {
        &self.actor
    }

    fn kind(&self) -> ActionKind {
        ActionKind::Skill
    }

    fn target(&self) -> Option<&ParticipantId> {
        self.target.as_ref()
    }

    fn cost(&self, actor: &Participant, _tables: &CombatTables) -> u32 {
        actor.skill(&self.skill).map_or(0, |skill| skill.ap_cost)
    }

    fn validate(
        &self,
        state: &CombatState,
        actor: &Participant,
        _tables: &CombatTables,
    ) -> Result<(), ValidationError> {
        let skill = actor
            .skill(&self.skill)
            .ok_or_else(|| ValidationError::UnknownSkill(self.skill.clone()))?;

        if !skill.is_ready() {
            return Err(ValidationError::SkillOnCooldown {
                skill: self.skill.clone(),
                remaining: skill.cooldown,
            });
        }

        if let Some(required) = skill.mana_cost {
            let available = actor.mana_available();
            if available < required {
                return Err(ValidationError::InsufficientMana {
                    required,
                    available,
                });
            }
        }

        resolve_class_targets(state, actor, skill.target, self.target.as_ref())?;
        Ok(())
    }

    fn apply(
        &self,
        state: &mut CombatState,
        env: &CombatEnv<'_>,
    ) -> Result<Applied, ValidationError> {
        let actor = state
            .participant(&self.actor)
            .ok_or_else(|| ValidationError::ActorNotFound(self.actor.clone()))?;
        let skill = actor
            .skill(&self.skill)
            .ok_or_else(|| ValidationError::UnknownSkill(self.skill.clone()))?;
        let targets = resolve_class_targets(state, actor, skill.target, self.target.as_ref())?;
        let effects = skill.effects.clone();
        let skill_name = skill.name.clone();

        let actor = state
            .participant_mut(&self.actor)
            .ok_or_else(|| ValidationError::ActorNotFound(self.actor.clone()))?;
        let skill = actor
            .skill(&self.skill)
            .ok_or_else(|| ValidationError::UnknownSkill(self.skill.clone()))?;
        let (mana_cost, base_cooldown) = (skill.mana_cost, skill.base_cooldown);
        if let (Some(cost), Some(mana)) = (mana_cost, actor.mana.as_mut()) {
            mana.drain(cost);
        }
        if let Some(skill) = actor.skill_mut(&self.skill) {
            skill.cooldown = base_cooldown;
        }

        let results = apply_effects(state, &self.actor, &targets, &effects, env.tables);
        let summary = format!(
            "{} uses {}: {}",
            self.actor,
            skill_name,
            describe_all(&results)
        );
        Ok(Applied {
            effects: results,
            summary,
        })
    }
}
