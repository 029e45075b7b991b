//! Error types for the execution pipeline.

use crate::action::{StateError, ValidationError};
use crate::error::{CombatError, ErrorSeverity};

/// Why [`CombatEngine::execute`](super::CombatEngine::execute) refused an action.
///
/// Either way the input state is untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl CombatError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::State(error) => error.severity(),
            Self::Validation(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::State(error) => error.error_code(),
            Self::Validation(error) => error.error_code(),
        }
    }
}
