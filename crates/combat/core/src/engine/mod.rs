//! Encounter setup and the action execution pipeline.
//!
//! [`CombatEngine`] is the authoritative reducer for [`CombatState`]. It never
//! holds state of its own: [`CombatEngine::execute`] takes the current
//! aggregate by reference and returns a fully updated copy, so a rejected
//! action leaves the caller's state exactly as it was.
//!
//! One execution runs, in order:
//!
//! 1. state checks (ended or inactive encounters are refused)
//! 2. validation ([`validate_action`])
//! 3. action point deduction, cooldown countdown and resolution on a
//!    working copy
//! 4. termination evaluation (or the flee ending)
//! 5. turn advance, with round-boundary status processing on wrap

mod errors;
mod initiative;
mod status;
mod termination;
mod turns;

pub use errors::ExecuteError;
pub use initiative::turn_order;
pub use status::{StatusTick, process_round_boundary};

use std::collections::HashSet;

use crate::action::validation::validate_action;
use crate::action::{ActionResult, CombatAction, StateError};
use crate::config::CombatConfig;
use crate::env::CombatEnv;
use crate::state::{
    CombatState, DefeatCondition, Environment, FactionKind, InitializationError, Participant,
    Phase, TerminalResult, VictoryCondition,
};

/// Everything about an encounter besides its participants.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterSetup {
    #[cfg_attr(feature = "serde", serde(default))]
    pub environment: Option<Environment>,
    /// Defaults to "defeat all enemies" when empty.
    #[cfg_attr(feature = "serde", serde(default))]
    pub victory_conditions: Vec<VictoryCondition>,
    /// Defaults to "player death" when empty.
    #[cfg_attr(feature = "serde", serde(default))]
    pub defeat_conditions: Vec<DefeatCondition>,
    /// Base seed for every roll in the encounter.
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: u64,
}

impl EncounterSetup {
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    pub fn with_victory(mut self, condition: VictoryCondition) -> Self {
        self.victory_conditions.push(condition);
        self
    }

    pub fn with_defeat(mut self, condition: DefeatCondition) -> Self {
        self.defeat_conditions.push(condition);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Outcome of one successful execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// The updated aggregate.
    pub state: CombatState,
    pub action_result: ActionResult,
    /// Set when this execution ended the encounter.
    pub terminal: Option<TerminalResult>,
    /// Status ticks applied if the turn order wrapped.
    pub status_ticks: Vec<StatusTick>,
}

/// Stateless entry points of the combat pipeline.
pub struct CombatEngine;

impl CombatEngine {
    /// Builds the opening state of an encounter.
    ///
    /// Participant data is validated up front; out-of-range vitals are clamped
    /// rather than rejected. The first living participant in initiative order
    /// starts with the action points it was given.
    pub fn initiate(
        participants: Vec<Participant>,
        setup: EncounterSetup,
        env: CombatEnv<'_>,
    ) -> Result<CombatState, InitializationError> {
        validate_roster(&participants)?;

        let mut participants = participants;
        for participant in participants.iter_mut() {
            participant.clamp_resources();
        }

        let victory_conditions = if setup.victory_conditions.is_empty() {
            vec![VictoryCondition::defeat_all_enemies()]
        } else {
            setup.victory_conditions
        };
        let defeat_conditions = if setup.defeat_conditions.is_empty() {
            vec![DefeatCondition::player_death()]
        } else {
            setup.defeat_conditions
        };

        let turn_order = turn_order(&participants);
        let mut state = CombatState {
            active: true,
            phase: Phase::PlayerTurn,
            participants,
            current_turn: None,
            turn_order,
            turn_index: 0,
            round: 1,
            environment: setup.environment,
            log: Vec::new(),
            victory_conditions,
            defeat_conditions,
            terminal: None,
            seed: setup.seed,
            nonce: 0,
            started_at: env.now,
            turn_started_at: env.now,
        };

        if turns::start(&mut state, env.now).is_none() {
            termination::evaluate(&mut state);
        }
        Ok(state)
    }

    /// Validates and resolves one action.
    ///
    /// Works on a clone of `state`; on error nothing observable has changed.
    pub fn execute(
        state: &CombatState,
        action: &CombatAction,
        env: CombatEnv<'_>,
    ) -> Result<Resolution, ExecuteError> {
        if state.is_ended() {
            return Err(StateError::AlreadyEnded.into());
        }
        if !state.active || state.current_turn.is_none() {
            return Err(StateError::EncounterInactive.into());
        }

        let actor = validate_action(state, action, env.tables)?;
        let cost = action.cost(actor, env.tables);
        let actor_id = actor.id.clone();
        let kind = action.kind();
        let target = action.target().cloned();

        let mut next = state.clone();
        if let Some(actor) = next.participant_mut(&actor_id) {
            actor.action_points.drain(cost);
            // before apply, so a skill used now keeps its full cooldown
            actor.tick_cooldowns();
        }
        let applied = action.as_transition().apply(&mut next, &env)?;
        for participant in next.participants.iter_mut() {
            participant.clamp_resources();
        }

        next.push_log(
            actor_id.clone(),
            Some(kind),
            target.clone(),
            applied.summary.clone(),
            env.now,
        );
        next.nonce += 1;

        let action_result = ActionResult {
            actor: actor_id.clone(),
            kind,
            target,
            cost,
            effects: applied.effects,
            summary: applied.summary,
        };

        let mut terminal = if action_result.fled() {
            Some(termination::flee(&mut next, &actor_id))
        } else {
            termination::evaluate(&mut next)
        };

        let mut status_ticks = Vec::new();
        if terminal.is_none() {
            let advance = turns::advance(&mut next, env.tables, env.now);
            status_ticks = advance.ticks;
            terminal = advance.terminal;
        }

        Ok(Resolution {
            state: next,
            action_result,
            terminal,
            status_ticks,
        })
    }
}

fn validate_roster(participants: &[Participant]) -> Result<(), InitializationError> {
    if participants.is_empty() {
        return Err(InitializationError::NoParticipants);
    }
    if participants.len() > CombatConfig::MAX_PARTICIPANTS {
        return Err(InitializationError::TooManyParticipants {
            count: participants.len(),
            max: CombatConfig::MAX_PARTICIPANTS,
        });
    }

    let mut seen = HashSet::with_capacity(participants.len());
    for (index, participant) in participants.iter().enumerate() {
        if participant.id.is_empty() {
            return Err(InitializationError::EmptyId { index });
        }
        if !seen.insert(&participant.id) {
            return Err(InitializationError::DuplicateId(participant.id.clone()));
        }
        if participant.health.maximum == 0 {
            return Err(InitializationError::MissingVitals {
                id: participant.id.clone(),
                field: "max_health",
            });
        }
        if participant.action_points.maximum == 0 {
            return Err(InitializationError::MissingVitals {
                id: participant.id.clone(),
                field: "max_action_points",
            });
        }
        if participant.mana.is_some_and(|mana| mana.maximum == 0) {
            return Err(InitializationError::MissingVitals {
                id: participant.id.clone(),
                field: "max_mana",
            });
        }
    }

    let mut players = participants
        .iter()
        .filter(|p| p.faction == FactionKind::Player);
    match (players.next(), players.next()) {
        (None, _) => Err(InitializationError::MissingPlayer),
        (Some(first), Some(second)) => Err(InitializationError::MultiplePlayers(
            first.id.clone(),
            second.id.clone(),
        )),
        (Some(_), None) => Ok(()),
    }
}
