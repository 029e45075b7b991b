//! Host-facing owner of a single encounter.
//!
//! [`CombatSession`] holds the current [`CombatState`] and serializes action
//! execution: at most one `execute_action` (or `initiate`) runs at a time, and
//! a call that arrives while another is resolving is refused rather than
//! queued. Reads never block on the in-flight flag.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use combat_core::{
    AvailableAction, CombatAction, CombatEngine, CombatEnv, CombatState, EncounterSetup,
    FactionKind, Participant, ParticipantId, PcgRng, RngOracle, StateError, TerminalResult,
    Timestamp, available_actions, valid_targets,
};

use crate::config::SessionConfig;
use crate::error::Result;
use crate::response::{ExecuteResponse, ExecutionOutcome};

pub struct CombatSession {
    config: SessionConfig,
    rng: Arc<dyn RngOracle>,
    state: RwLock<Option<CombatState>>,
    in_flight: AtomicBool,
}

/// Holds the in-flight flag for the duration of one call.
struct FlightGuard<'a>(&'a AtomicBool);

impl<'a> FlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl CombatSession {
    pub fn new(config: SessionConfig) -> Self {
        Self::with_rng(config, Arc::new(PcgRng))
    }

    pub fn with_rng(config: SessionConfig, rng: Arc<dyn RngOracle>) -> Self {
        Self {
            config,
            rng,
            state: RwLock::new(None),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Starts a new encounter, replacing any previous one.
    ///
    /// The seed comes from the configuration when fixed there, otherwise a
    /// fresh one is drawn. A seed already set on `setup` is overridden.
    pub async fn initiate(
        &self,
        participants: Vec<Participant>,
        setup: EncounterSetup,
    ) -> Result<CombatState> {
        let Some(_guard) = FlightGuard::acquire(&self.in_flight) else {
            return Err(StateError::ExecutionInFlight.into());
        };

        let seed = self.config.seed.unwrap_or_else(rand::random);
        let setup = setup.with_seed(seed);
        let env = CombatEnv::new(self.rng.as_ref(), &self.config.tables, now());

        let state = CombatEngine::initiate(participants, setup, env)?;
        info!(
            seed,
            participants = state.participants.len(),
            first = ?state.current_turn,
            "Encounter initiated"
        );
        if let Some(terminal) = &state.terminal {
            info!(outcome = %terminal.outcome, reason = %terminal.reason, "Encounter ended at setup");
        }

        *self.state.write().await = Some(state.clone());
        Ok(state)
    }

    /// Validates and resolves one action against the current encounter.
    pub async fn execute_action(&self, action: CombatAction) -> ExecuteResponse {
        let Some(_guard) = FlightGuard::acquire(&self.in_flight) else {
            let snapshot = self.state.try_read().ok().and_then(|state| state.clone());
            warn!(actor = %action.actor(), "Rejected action: execution already in flight");
            return ExecuteResponse::rejected(snapshot, StateError::ExecutionInFlight);
        };

        let mut slot = self.state.write().await;
        let Some(current) = slot.as_ref() else {
            warn!(actor = %action.actor(), "Rejected action: no encounter");
            return ExecuteResponse::rejected(None, StateError::NoEncounter);
        };

        let env = CombatEnv::new(self.rng.as_ref(), &self.config.tables, now());
        match CombatEngine::execute(current, &action, env) {
            Ok(resolution) => {
                debug!(
                    actor = %resolution.action_result.actor,
                    kind = %resolution.action_result.kind,
                    cost = resolution.action_result.cost,
                    round = resolution.state.round,
                    nonce = resolution.state.nonce,
                    summary = %resolution.action_result.summary,
                    "Action resolved"
                );
                for tick in &resolution.status_ticks {
                    debug!(participant = %tick.participant, "{}", tick.summary());
                }
                if let Some(terminal) = &resolution.terminal {
                    info!(
                        outcome = %terminal.outcome,
                        reason = %terminal.reason,
                        round = terminal.round,
                        "Encounter ended"
                    );
                }

                *slot = Some(resolution.state.clone());
                ExecuteResponse::resolved(
                    resolution.state,
                    ExecutionOutcome {
                        action_result: resolution.action_result,
                        terminal_result: resolution.terminal,
                        status_ticks: resolution.status_ticks,
                    },
                )
            }
            Err(error) => {
                let response = ExecuteResponse::rejected(Some(current.clone()), error);
                warn!(
                    actor = %action.actor(),
                    kind = %action.kind(),
                    code = response.error_code().unwrap_or_default(),
                    "Rejected action"
                );
                response
            }
        }
    }

    /// Discards the encounter and hands back its final state.
    pub async fn end_combat(&self) -> Option<CombatState> {
        let ended = self.state.write().await.take();
        if let Some(state) = &ended {
            info!(round = state.round, log_entries = state.log.len(), "Encounter closed");
        }
        ended
    }

    /// Snapshot of the current encounter.
    pub async fn state(&self) -> Option<CombatState> {
        self.state.read().await.clone()
    }

    pub async fn current_actor(&self) -> Option<Participant> {
        self.state
            .read()
            .await
            .as_ref()
            .and_then(|state| state.current_actor().cloned())
    }

    pub async fn living_participants(&self, faction: FactionKind) -> Vec<Participant> {
        self.state.read().await.as_ref().map_or_else(Vec::new, |state| {
            state.living_by_faction(faction).cloned().collect()
        })
    }

    /// Actions the current actor can legally take right now.
    pub async fn available_actions(&self) -> Vec<AvailableAction> {
        self.state
            .read()
            .await
            .as_ref()
            .map_or_else(Vec::new, |state| {
                available_actions(state, &self.config.tables)
            })
    }

    pub async fn valid_targets(&self, action: &CombatAction) -> Vec<ParticipantId> {
        self.state
            .read()
            .await
            .as_ref()
            .map_or_else(Vec::new, |state| valid_targets(state, action))
    }

    pub async fn is_active(&self) -> bool {
        self.state
            .read()
            .await
            .as_ref()
            .is_some_and(|state| state.active)
    }

    pub async fn terminal_result(&self) -> Option<TerminalResult> {
        self.state
            .read()
            .await
            .as_ref()
            .and_then(|state| state.terminal.clone())
    }
}

impl Default for CombatSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

fn now() -> Timestamp {
    Timestamp::from_millis(u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{CombatStats, FixedRng, ResourceMeter};

    fn duel() -> Vec<Participant> {
        vec![
            Participant::new(
                "hero",
                "Hero",
                FactionKind::Player,
                ResourceMeter::full(100),
                ResourceMeter::full(3),
                CombatStats::new(10, 3, 5, 0),
            ),
            Participant::new(
                "goblin",
                "Goblin",
                FactionKind::Enemy,
                ResourceMeter::full(30),
                ResourceMeter::full(3),
                CombatStats::new(4, 2, 3, 0),
            ),
        ]
    }

    #[tokio::test]
    async fn concurrent_execution_is_refused() {
        let session = CombatSession::with_rng(SessionConfig::default(), Arc::new(FixedRng(0)));
        session
            .initiate(duel(), EncounterSetup::default())
            .await
            .unwrap();
        let before = session.state().await;

        let held = FlightGuard::acquire(&session.in_flight).unwrap();
        let response = session
            .execute_action(CombatAction::attack("hero", "goblin"))
            .await;
        assert_eq!(response.error_code(), Some("execution_in_flight"));
        assert_eq!(response.state, before);

        let err = session
            .initiate(duel(), EncounterSetup::default())
            .await
            .unwrap_err();
        assert_eq!(err.code(), "execution_in_flight");

        drop(held);
        let response = session
            .execute_action(CombatAction::attack("hero", "goblin"))
            .await;
        assert!(response.success());
    }

    #[test]
    fn guard_releases_on_drop() {
        let flag = AtomicBool::new(false);
        {
            let _guard = FlightGuard::acquire(&flag).unwrap();
            assert!(FlightGuard::acquire(&flag).is_none());
        }
        assert!(FlightGuard::acquire(&flag).is_some());
    }
}
