use crate::action::{
    ActionKind, ActionTransition, Applied, ValidationError, apply_effects, describe_all,
    resolve_class_targets,
};
use crate::config::CombatTables;
use crate::env::CombatEnv;
use crate::state::{CombatState, ItemId, Participant, ParticipantId};

/// Consumes one unit of an item from the actor's inventory.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemAction {
    pub actor: ParticipantId,
    pub item: ItemId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: Option<ParticipantId>,
}

impl ItemAction {
    pub fn new(actor: ParticipantId, item: ItemId, target: Option<ParticipantId>) -> Self {
        Self {
            actor,
            item,
            target,
        }
    }
}

impl ActionTransition for ItemAction {
    fn actor(&self) -> &ParticipantId {
        &self.actor
    }

    fn kind(&self) -> ActionKind {
        ActionKind::Item
    }

    fn target(&self) -> Option<&ParticipantId> {
        self.target.as_ref()
    }

    fn cost(&self, actor: &Participant, _tables: &CombatTables) -> u32 {
        actor.item(&self.item).map_or(0, |item| item.ap_cost)
    }

    fn validate(
        &self,
        state: &CombatState,
        actor: &Participant,
        _tables: &CombatTables,
    ) -> Result<(), ValidationError> {
        let item = actor
            .item(&self.item)
            .ok_or_else(|| ValidationError::UnknownItem(self.item.clone()))?;
        if item.quantity == 0 {
            return Err(ValidationError::ItemDepleted(self.item.clone()));
        }
        resolve_class_targets(state, actor, item.target, self.target.as_ref())?;
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
        let item = actor
            .item(&self.item)
            .ok_or_else(|| ValidationError::UnknownItem(self.item.clone()))?;
        let targets = resolve_class_targets(state, actor, item.target, self.target.as_ref())?;
        let effects = item.effects.clone();
        let item_name = item.name.clone();

        let actor = state
            .participant_mut(&self.actor)
            .ok_or_else(|| ValidationError::ActorNotFound(self.actor.clone()))?;
        if let Some(index) = actor.items.iter().position(|i| i.id == self.item) {
            let stack = &mut actor.items[index];
            stack.quantity = stack.quantity.saturating_sub(1);
            if stack.quantity == 0 {
                actor.items.remove(index);
            }
        }

        let results = apply_effects(state, &self.actor, &targets, &effects, env.tables);
        let summary = format!(
            "{} uses {}: {}",
            self.actor,
            item_name,
            describe_all(&results)
        );
        Ok(Applied {
            effects: results,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{Effect, TargetClass};
    use crate::env::FixedRng;
    use crate::state::{CombatStats, FactionKind, Item, ResourceMeter};

    fn hero(potions: u32) -> Participant {
        Participant::new(
            "hero",
            "Hero",
            FactionKind::Player,
            ResourceMeter::new(10, 50),
            ResourceMeter::full(6),
            CombatStats::new(10, 2, 5, 0),
        )
        .with_item(
            Item::new("potion", "Potion", potions, 1, TargetClass::SelfOnly)
                .with_effect(Effect::Heal { amount: 20 }),
        )
    }

    fn goblin() -> Participant {
        Participant::new(
            "goblin",
            "Goblin",
            FactionKind::Enemy,
            ResourceMeter::full(30),
            ResourceMeter::full(3),
            CombatStats::new(4, 2, 3, 0),
        )
    }

    #[test]
    fn using_the_last_unit_removes_the_stack() {
        let mut state = crate::test_utils::state_of(vec![hero(1), goblin()]);
        let tables = CombatTables::default();
        let rng = FixedRng(0);
        let env = CombatEnv::new(&rng, &tables, Default::default());

        let applied = ItemAction::new("hero".into(), "potion".into(), None)
            .apply(&mut state, &env)
            .unwrap();

        let hero = state.participant(&"hero".into()).unwrap();
        assert_eq!(hero.health.current, 30);
        assert!(hero.items.is_empty());
        assert!(applied.summary.contains("recovers 20 health"));
    }

    #[test]
    fn quantity_decrements() {
        let mut state = crate::test_utils::state_of(vec![hero(3), goblin()]);
        let tables = CombatTables::default();
        let rng = FixedRng(0);
        let env = CombatEnv::new(&rng, &tables, Default::default());

        ItemAction::new("hero".into(), "potion".into(), None)
            .apply(&mut state, &env)
            .unwrap();

        let hero = state.participant(&"hero".into()).unwrap();
        assert_eq!(hero.item(&"potion".into()).unwrap().quantity, 2);
    }

    #[test]
    fn unknown_and_depleted_items_are_rejected() {
        let state = crate::test_utils::state_of(vec![hero(0), goblin()]);
        let hero = state.participant(&"hero".into()).unwrap();
        let tables = CombatTables::default();

        assert_eq!(
            ItemAction::new("hero".into(), "elixir".into(), None).validate(&state, hero, &tables),
            Err(ValidationError::UnknownItem("elixir".into()))
        );
        assert_eq!(
            ItemAction::new("hero".into(), "potion".into(), None).validate(&state, hero, &tables),
            Err(ValidationError::ItemDepleted("potion".into()))
        );
    }

    #[test]
    fn self_only_item_rejects_other_targets() {
        let state = crate::test_utils::state_of(vec![hero(2), goblin()]);
        let hero = state.participant(&"hero".into()).unwrap();

        let result = ItemAction::new("hero".into(), "potion".into(), Some("goblin".into()))
            .validate(&state, hero, &CombatTables::default());
        assert_eq!(result, Err(ValidationError::InvalidTarget("goblin".into())));
    }
}
