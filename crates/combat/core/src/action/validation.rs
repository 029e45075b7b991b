//! Shared legality checks run before any kind-specific validation.
//!
//! Order matters and is observable through the returned error:
//!
//! 1. the actor exists
//! 2. it is the actor's turn
//! 3. the actor is alive
//! 4. the actor can pay the action point cost
//! 5. kind-specific checks (skill cooldown and mana, item quantity, targets, range)

use crate::action::{CombatAction, ValidationError};
use crate::config::CombatTables;
use crate::state::{CombatState, Participant};

/// Checks whether `action` is legal right now.
///
/// Never mutates. Returns the acting participant on success so the caller does
/// not have to look it up again.
pub fn validate_action<'s>(
    state: &'s CombatState,
    action: &CombatAction,
    tables: &CombatTables,
) -> Result<&'s Participant, ValidationError> {
    let actor_id = action.actor();
    let actor = state
        .participant(actor_id)
        .ok_or_else(|| ValidationError::ActorNotFound(actor_id.clone()))?;

    if state.current_turn.as_ref() != Some(actor_id) {
        return Err(ValidationError::NotYourTurn {
            actor: actor_id.clone(),
            current: state.current_turn.clone().unwrap_or_default(),
        });
    }

    if !actor.is_alive() {
        return Err(ValidationError::ActorDead(actor_id.clone()));
    }

    check_action_points(actor, action.cost(actor, tables))?;

    action.as_transition().validate(state, actor, tables)?;
    Ok(actor)
}

fn check_action_points(actor: &Participant, required: u32) -> Result<(), ValidationError> {
    let available = actor.action_points.current;
    if available < required {
        return Err(ValidationError::InsufficientActionPoints {
            required,
            available,
        });
    }
    Ok(())
}
