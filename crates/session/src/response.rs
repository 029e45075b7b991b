use combat_core::{ActionResult, CombatState, StatusTick, TerminalResult};

use crate::error::SessionError;

/// What a successful action produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionOutcome {
    pub action_result: ActionResult,
    /// Set when the action ended the encounter.
    pub terminal_result: Option<TerminalResult>,
    /// Status ticks applied at a round boundary crossed by this action.
    pub status_ticks: Vec<StatusTick>,
}

/// Result of [`CombatSession::execute_action`](crate::CombatSession::execute_action).
///
/// Always carries the state as it stands after the call: the updated state on
/// success, the unchanged one on rejection. `state` is `None` only when no
/// encounter exists.
#[derive(Debug)]
pub struct ExecuteResponse {
    pub state: Option<CombatState>,
    pub outcome: Result<ExecutionOutcome, SessionError>,
}

impl ExecuteResponse {
    pub(crate) fn resolved(state: CombatState, outcome: ExecutionOutcome) -> Self {
        Self {
            state: Some(state),
            outcome: Ok(outcome),
        }
    }

    pub(crate) fn rejected(state: Option<CombatState>, error: impl Into<SessionError>) -> Self {
        Self {
            state,
            outcome: Err(error.into()),
        }
    }

    pub fn success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn error(&self) -> Option<&SessionError> {
        self.outcome.as_ref().err()
    }

    pub fn error_code(&self) -> Option<&'static str> {
        self.error().map(SessionError::code)
    }

    pub fn action_result(&self) -> Option<&ActionResult> {
        self.outcome.as_ref().ok().map(|outcome| &outcome.action_result)
    }

    pub fn terminal_result(&self) -> Option<&TerminalResult> {
        self.outcome
            .as_ref()
            .ok()
            .and_then(|outcome| outcome.terminal_result.as_ref())
    }
}
