//! Common error infrastructure for combat-core.
//!
//! Domain-specific errors (`ValidationError`, `StateError`,
//! `InitializationError`) live next to the code that produces them. This
//! module holds the classification shared by all of them.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Validation**: the action was illegal; correct it and resubmit
/// - **State**: the encounter cannot accept actions right now
/// - **Setup**: the participant data handed to `initiate` is malformed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input, should not retry without changes.
    Validation,

    /// Encounter is inactive, ended, or busy.
    State,

    /// Encounter could not be built from the supplied definitions.
    Setup,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::State => "state",
            Self::Setup => "setup",
        }
    }

    /// Returns true if resubmitting a corrected action may succeed.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Validation)
    }
}

/// Common trait for all combat-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - `error_code` returns a stable snake_case identifier hosts can match on
pub trait CombatError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str;
}
