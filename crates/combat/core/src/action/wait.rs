use crate::action::{
    ActionKind, ActionTransition, Applied, AppliedValue, EffectResult, ValidationError,
};
use crate::config::CombatTables;
use crate::env::CombatEnv;
use crate::state::{CombatState, Participant, ParticipantId};

/// Wait action - actor passes their turn and banks bonus action points.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaitAction {
    pub actor: ParticipantId,
}

impl WaitAction {
    pub fn new(actor: ParticipantId) -> Self {
        Self { actor }
    }
}

impl ActionTransition for WaitAction {
    fn actor(&self) -> &ParticipantId {
        &self.actor
    }

    fn kind(&self) -> ActionKind {
        ActionKind::Wait
    }

    fn cost(&self, _actor: &Participant, _tables: &CombatTables) -> u32 {
        0
    }

    fn apply(
        &self,
        state: &mut CombatState,
        env: &CombatEnv<'_>,
    ) -> Result<Applied, ValidationError> {
        let actor = state
            .participant_mut(&self.actor)
            .ok_or_else(|| ValidationError::ActorNotFound(self.actor.clone()))?;
        let amount = env.tables.wait_ap_bonus;
        actor.pending_ap_bonus = actor.pending_ap_bonus.saturating_add(amount);

        Ok(Applied {
            effects: vec![EffectResult::new(
                self.actor.clone(),
                AppliedValue::ApRegenQueued { amount },
            )],
            summary: format!("{} waits", self.actor),
        })
    }
}
