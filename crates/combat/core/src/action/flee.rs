use crate::action::{
    ActionKind, ActionTransition, Applied, AppliedValue, EffectResult, ValidationError,
};
use crate::combat::calculate_flee_chance;
use crate::config::CombatTables;
use crate::env::{CombatEnv, RollContext, compute_seed};
use crate::state::{CombatState, Participant, ParticipantId};

/// Attempts to leave the encounter. Success ends it with a fled outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleeAction {
    pub actor: ParticipantId,
}

impl FleeAction {
    pub fn new(actor: ParticipantId) -> Self {
        Self { actor }
    }
}

/// Escape chance for `actor` against the fastest living hostile.
pub(crate) fn flee_chance(state: &CombatState, actor: &Participant, tables: &CombatTables) -> u32 {
    let fastest = state
        .living()
        .filter(|p| p.is_hostile_to(actor))
        .map(|p| p.effective_stats().speed)
        .max();
    calculate_flee_chance(actor.effective_stats().speed, fastest, &tables.flee)
}

impl ActionTransition for FleeAction {
    fn actor(&self) -> &ParticipantId {
        &self.actor
    }

    fn kind(&self) -> ActionKind {
        ActionKind::Flee
    }

    fn cost(&self, _actor: &Participant, tables: &CombatTables) -> u32 {
        tables.costs.flee
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
        let actor = state
            .participant(&self.actor)
            .ok_or_else(|| ValidationError::ActorNotFound(self.actor.clone()))?;

        let chance = flee_chance(state, actor, env.tables);
        let roll = env.rng.roll_d100(compute_seed(
            state.seed,
            state.nonce,
            slot,
            RollContext::Flee,
        ));
        let success = roll <= chance;

        let summary = if success {
            format!("{} flees the encounter", self.actor)
        } else {
            format!("{} tries to flee but fails", self.actor)
        };
        Ok(Applied {
            effects: vec![EffectResult::new(
                self.actor.clone(),
                AppliedValue::Flee {
                    chance,
                    roll,
                    success,
                },
            )],
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::FixedRng;
    use crate::state::{CombatStats, FactionKind, ResourceMeter};

    fn runner(id: &str, faction: FactionKind, speed: i32) -> Participant {
        Participant::new(
            id,
            id,
            faction,
            ResourceMeter::full(10),
            ResourceMeter::full(3),
            CombatStats::new(1, 1, speed, 0),
        )
    }

    #[test]
    fn chance_tracks_the_fastest_hostile() {
        let state = crate::test_utils::state_of(vec![
            runner("hero", FactionKind::Player, 6),
            runner("slow", FactionKind::Enemy, 2),
            runner("quick", FactionKind::Enemy, 8),
        ]);
        let hero = state.participant(&"hero".into()).unwrap();
        // 50 + (6 - 8) * 5
        assert_eq!(flee_chance(&state, hero, &CombatTables::default()), 40);
    }

    #[test]
    fn roll_above_chance_fails() {
        let mut state = crate::test_utils::state_of(vec![
            runner("hero", FactionKind::Player, 5),
            runner("goblin", FactionKind::Enemy, 5),
        ]);
        let tables = CombatTables::default();
        let rng = FixedRng(99);
        let env = CombatEnv::new(&rng, &tables, Default::default());

        let applied = FleeAction::new("hero".into()).apply(&mut state, &env).unwrap();
        assert_eq!(
            applied.effects[0].value,
            AppliedValue::Flee {
                chance: 50,
                roll: 100,
                success: false
            }
        );
    }
}
