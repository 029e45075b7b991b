use crate::action::{
    ActionKind, ActionTransition, Applied, AppliedValue, EffectFlags, EffectResult,
    ValidationError, attack_targets, describe_all,
};
use crate::combat::{
    apply_variance, calculate_damage, calculate_evasion, calculate_hit_chance, check_hit,
    variance_spread,
};
use crate::config::CombatTables;
use crate::env::{CombatEnv, RollContext, compute_seed};
use crate::state::{
    CombatState, EffectClassification, EffectDuration, Participant, ParticipantId, StatKind,
    StatModifier, StatusEffect,
};

/// Status id of the defense bonus granted by [`DefendAction`].
pub const GUARD_EFFECT_ID: &str = "guard";

/// Basic weapon attack against one hostile participant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackAction {
    pub actor: ParticipantId,
    pub target: ParticipantId,
}

impl AttackAction {
    pub fn new(actor: ParticipantId, target: ParticipantId) -> Self {
        Self { actor, target }
    }
}

impl ActionTransition for AttackAction {
    fn actor(&self) -> &ParticipantId {
        &self.actor
    }

    fn kind(&self) -> ActionKind {
        ActionKind::Attack
    }

    fn target(&self) -> Option<&ParticipantId> {
        Some(&self.target)
    }

    fn cost(&self, _actor: &Participant, tables: &CombatTables) -> u32 {
        tables.costs.attack
    }

    fn validate(
        &self,
        state: &CombatState,
        actor: &Participant,
        _tables: &CombatTables,
    ) -> Result<(), ValidationError> {
        if attack_targets(state, actor).contains(&self.target) {
            Ok(())
        } else {
            Err(ValidationError::InvalidTarget(self.target.clone()))
        }
    }

    fn apply(
        &self,
        state: &mut CombatState,
        env: &CombatEnv<'_>,
    ) -> Result<Applied, ValidationError> {
        let slot = state
            .slot_of(&self.actor)
            .ok_or_else(|| ValidationError::ActorNotFound(self.actor.clone()))?
            as u32;
        let attacker = state
            .participant(&self.actor)
            .ok_or_else(|| ValidationError::ActorNotFound(self.actor.clone()))?
            .effective_stats();
        let defender = state
            .participant(&self.target)
            .ok_or_else(|| ValidationError::InvalidTarget(self.target.clone()))?
            .effective_stats();

        let params = &env.tables.hit_chance;
        let evasion = calculate_evasion(defender.defense, params);
        let chance = calculate_hit_chance(attacker.accuracy, evasion, params);
        let roll = env.rng.roll_d100(compute_seed(
            state.seed,
            state.nonce,
            slot,
            RollContext::Hit,
        ));

        if !check_hit(chance, roll) {
            let missed = EffectResult::new(self.target.clone(), AppliedValue::None)
                .with_flags(EffectFlags::MISSED);
            return Ok(Applied {
                effects: vec![missed],
                summary: format!("{} attacks {} and misses", self.actor, self.target),
            });
        }

        let damage = &env.tables.damage;
        let base = calculate_damage(attacker.attack, defender.defense, 0, damage);
        let spread = variance_spread(base, damage);
        let planned = if spread == 0 {
            base
        } else {
            let variance_roll = env.rng.range(
                compute_seed(state.seed, state.nonce, slot, RollContext::Variance),
                0,
                spread.saturating_mul(2),
            );
            apply_variance(base, spread, variance_roll, damage)
        };

        let target = state
            .participant_mut(&self.target)
            .ok_or_else(|| ValidationError::InvalidTarget(self.target.clone()))?;
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

        let effects = vec![
            EffectResult::new(self.target.clone(), AppliedValue::Damage { planned, actual })
                .with_flags(flags),
        ];
        let summary = format!(
            "{} attacks {}: {}",
            self.actor,
            self.target,
            describe_all(&effects)
        );
        Ok(Applied { effects, summary })
    }
}

/// Raises the actor's defense until the start of their next turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefendAction {
    pub actor: ParticipantId,
}

impl DefendAction {
    pub fn new(actor: ParticipantId) -> Self {
        Self { actor }
    }
}

pub(crate) fn guard_effect(defense_bonus: i32, source: ParticipantId) -> StatusEffect {
    StatusEffect::new(
        GUARD_EFFECT_ID,
        "Guard",
        EffectClassification::Buff,
        EffectDuration::UntilOwnerTurn,
    )
    .with_category("stance")
    .with_modifier(StatModifier::additive(StatKind::Defense, defense_bonus))
    .with_source(source)
    .non_dispellable()
}

impl ActionTransition for DefendAction {
    fn actor(&self) -> &ParticipantId {
        &self.actor
    }

    fn kind(&self) -> ActionKind {
        ActionKind::Defend
    }

    fn cost(&self, _actor: &Participant, tables: &CombatTables) -> u32 {
        tables.costs.defend
    }

    fn apply(
        &self,
        state: &mut CombatState,
        env: &CombatEnv<'_>,
    ) -> Result<Applied, ValidationError> {
        let actor = state
            .participant_mut(&self.actor)
            .ok_or_else(|| ValidationError::ActorNotFound(self.actor.clone()))?;

        let guard = guard_effect(env.tables.defend.defense_bonus, self.actor.clone());
        let stacks = actor.status_effects.apply(guard).stacks();

        let effects = vec![EffectResult::new(
            self.actor.clone(),
            AppliedValue::StatusApplied {
                effect: GUARD_EFFECT_ID.to_string(),
                stacks,
            },
        )];
        Ok(Applied {
            effects,
            summary: format!("{} takes a defensive stance", self.actor),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::FixedRng;
    use crate::state::{CombatStats, FactionKind, ResourceMeter};

    fn state_with(hero_accuracy: i32, goblin_health: u32) -> CombatState {
        let hero = Participant::new(
            "hero",
            "Hero",
            FactionKind::Player,
            ResourceMeter::full(50),
            ResourceMeter::full(6),
            CombatStats::new(10, 2, 5, hero_accuracy),
        );
        let goblin = Participant::new(
            "goblin",
            "Goblin",
            FactionKind::Enemy,
            ResourceMeter::full(goblin_health),
            ResourceMeter::full(3),
            CombatStats::new(4, 2, 3, 0),
        );
        crate::test_utils::state_of(vec![hero, goblin])
    }

    fn flat_tables() -> CombatTables {
        let mut tables = CombatTables::default();
        tables.damage.variance_percent = 0;
        tables
    }

    #[test]
    fn hit_deals_attack_minus_defense() {
        let mut state = state_with(0, 30);
        let tables = flat_tables();
        let rng = FixedRng(0);
        let env = CombatEnv::new(&rng, &tables, Default::default());

        let applied = AttackAction::new("hero".into(), "goblin".into())
            .apply(&mut state, &env)
            .unwrap();

        assert_eq!(
            applied.effects[0].value,
            AppliedValue::Damage {
                planned: 8,
                actual: 8
            }
        );
        let goblin = state.participant(&"goblin".into()).unwrap();
        assert_eq!(goblin.health.current, 22);
    }

    #[test]
    fn miss_leaves_target_untouched() {
        let mut state = state_with(0, 30);
        let tables = flat_tables();
        // roll 100 is above the 95% ceiling
        let rng = FixedRng(99);
        let env = CombatEnv::new(&rng, &tables, Default::default());

        let applied = AttackAction::new("hero".into(), "goblin".into())
            .apply(&mut state, &env)
            .unwrap();

        assert!(applied.effects[0].flags.contains(EffectFlags::MISSED));
        assert_eq!(state.participant(&"goblin".into()).unwrap().health.current, 30);
        assert!(applied.summary.contains("misses"));
    }

    #[test]
    fn overkill_is_clamped_and_kills() {
        let mut state = state_with(0, 5);
        let tables = flat_tables();
        let rng = FixedRng(0);
        let env = CombatEnv::new(&rng, &tables, Default::default());

        let applied = AttackAction::new("hero".into(), "goblin".into())
            .apply(&mut state, &env)
            .unwrap();

        let flags = applied.effects[0].flags;
        assert!(flags.contains(EffectFlags::CLAMPED | EffectFlags::KILLED));
        assert_eq!(state.participant(&"goblin".into()).unwrap().health.current, 0);
    }

    #[test]
    fn cannot_attack_self_or_allies() {
        let state = state_with(0, 30);
        let tables = flat_tables();
        let hero = state.participant(&"hero".into()).unwrap();

        let err = AttackAction::new("hero".into(), "hero".into())
            .validate(&state, hero, &tables)
            .unwrap_err();
        assert_eq!(err, ValidationError::InvalidTarget("hero".into()));
    }

    #[test]
    fn defend_grants_guard_until_next_turn() {
        let mut state = state_with(0, 30);
        let tables = flat_tables();
        let rng = FixedRng(0);
        let env = CombatEnv::new(&rng, &tables, Default::default());

        DefendAction::new("hero".into())
            .apply(&mut state, &env)
            .unwrap();

        let hero = state.participant(&"hero".into()).unwrap();
        let guard = hero.status_effects.get(GUARD_EFFECT_ID).unwrap();
        assert_eq!(guard.duration, EffectDuration::UntilOwnerTurn);
        assert_eq!(hero.effective_stats().defense, 2 + tables.defend.defense_bonus);
    }
}
