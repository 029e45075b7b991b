//! Unified error type surfaced by [`CombatSession`](crate::CombatSession).
//!
//! Wraps engine rejections, setup failures and roster parsing so hosts get one
//! type with a stable machine-readable code.
use combat_core::{
    CombatError, ErrorSeverity, ExecuteError, InitializationError, StateError, ValidationError,
};
use thiserror::Error;

use crate::roster::RosterError;

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Initialization(#[from] InitializationError),

    #[error(transparent)]
    Roster(#[from] RosterError),
}

impl From<ExecuteError> for SessionError {
    fn from(error: ExecuteError) -> Self {
        match error {
            ExecuteError::State(error) => Self::State(error),
            ExecuteError::Validation(error) => Self::Validation(error),
        }
    }
}

impl SessionError {
    /// Stable snake_case identifier for this failure.
    pub fn code(&self) -> &'static str {
        match self {
            Self::State(error) => error.error_code(),
            Self::Validation(error) => error.error_code(),
            Self::Initialization(error) => error.error_code(),
            Self::Roster(RosterError::Parse(_)) => "malformed_roster",
            Self::Roster(RosterError::Empty) => "empty_roster",
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::State(error) => error.severity(),
            Self::Validation(error) => error.severity(),
            Self::Initialization(error) => error.severity(),
            Self::Roster(_) => ErrorSeverity::Setup,
        }
    }
}
