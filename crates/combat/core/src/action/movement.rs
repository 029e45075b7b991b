use crate::action::{
    ActionKind, ActionTransition, Applied, AppliedValue, EffectResult, ValidationError,
};
use crate::config::CombatTables;
use crate::env::CombatEnv;
use crate::state::{CombatState, Participant, ParticipantId, Position};

/// Repositions the actor on the encounter grid.
///
/// A participant without a position may enter the grid anywhere free; one with
/// a position may move at most `max_distance` tiles (Chebyshev).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub actor: ParticipantId,
    pub destination: Position,
}

impl MoveAction {
    pub fn new(actor: ParticipantId, destination: Position) -> Self {
        Self { actor, destination }
    }
}

impl ActionTransition for MoveAction {
    fn actor(&self) -> &ParticipantId {
        &self.actor
    }

    fn kind(&self) -> ActionKind {
        ActionKind::Move
    }

    fn cost(&self, _actor: &Participant, tables: &CombatTables) -> u32 {
        tables.costs.movement
    }

    fn validate(
        &self,
        state: &CombatState,
        actor: &Participant,
        tables: &CombatTables,
    ) -> Result<(), ValidationError> {
        if let Some(origin) = actor.position {
            if origin == self.destination {
                return Err(ValidationError::InvalidDestination);
            }
            let distance = origin.distance(self.destination);
            let max = tables.movement.max_distance;
            if distance > max {
                return Err(ValidationError::OutOfRange { distance, max });
            }
        }

        let occupied = state
            .living()
            .any(|p| p.id != actor.id && p.position == Some(self.destination));
        if occupied {
            return Err(ValidationError::InvalidDestination);
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut CombatState,
        _env: &CombatEnv<'_>,
    ) -> Result<Applied, ValidationError> {
        let actor = state
            .participant_mut(&self.actor)
            .ok_or_else(|| ValidationError::ActorNotFound(self.actor.clone()))?;
        let from = actor.position.replace(self.destination);

        Ok(Applied {
            effects: vec![EffectResult::new(
                self.actor.clone(),
                AppliedValue::Movement {
                    from,
                    to: self.destination,
                },
            )],
            summary: format!("{} moves to {}", self.actor, self.destination),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CombatStats, FactionKind, ResourceMeter};

    fn at(id: &str, faction: FactionKind, position: Position) -> Participant {
        Participant::new(
            id,
            id,
            faction,
            ResourceMeter::full(10),
            ResourceMeter::full(3),
            CombatStats::new(1, 1, 1, 0),
        )
        .with_position(position)
    }

    fn board() -> CombatState {
        crate::test_utils::state_of(vec![
            at("hero", FactionKind::Player, Position::ORIGIN),
            at("goblin", FactionKind::Enemy, Position::new(2, 0)),
        ])
    }

    #[test]
    fn range_is_chebyshev() {
        let state = board();
        let hero = state.participant(&"hero".into()).unwrap();
        let tables = CombatTables::default();

        let diagonal = MoveAction::new("hero".into(), Position::new(3, 3));
        assert!(diagonal.validate(&state, hero, &tables).is_ok());

        let far = MoveAction::new("hero".into(), Position::new(4, 1));
        assert_eq!(
            far.validate(&state, hero, &tables),
            Err(ValidationError::OutOfRange { distance: 4, max: 3 })
        );
    }

    #[test]
    fn occupied_and_unchanged_destinations_are_rejected() {
        let state = board();
        let hero = state.participant(&"hero".into()).unwrap();
        let tables = CombatTables::default();

        for destination in [Position::ORIGIN, Position::new(2, 0)] {
            assert_eq!(
                MoveAction::new("hero".into(), destination).validate(&state, hero, &tables),
                Err(ValidationError::InvalidDestination)
            );
        }
    }

    #[test]
    fn dead_participants_do_not_block() {
        let mut state = board();
        state
            .participant_mut(&"goblin".into())
            .unwrap()
            .health
            .set_current(0);
        let hero = state.participant(&"hero".into()).unwrap();

        let onto_corpse = MoveAction::new("hero".into(), Position::new(2, 0));
        assert!(
            onto_corpse
                .validate(&state, hero, &CombatTables::default())
                .is_ok()
        );
    }
}
