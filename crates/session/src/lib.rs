//! Async host facade over `combat-core`.
//!
//! A [`CombatSession`] owns one encounter at a time. It seeds the encounter,
//! stamps actions with the wall clock, guards against overlapping executions
//! and logs every resolution through `tracing`. The rules themselves live in
//! `combat-core`; nothing here changes how an action resolves.
//!
//! ```no_run
//! # async fn demo(participants: Vec<combat_core::Participant>) -> combat_session::Result<()> {
//! use combat_core::{CombatAction, EncounterSetup};
//! use combat_session::{CombatSession, SessionConfig};
//!
//! let session = CombatSession::new(SessionConfig::from_env());
//! session.initiate(participants, EncounterSetup::default()).await?;
//! let response = session
//!     .execute_action(CombatAction::attack("hero", "goblin"))
//!     .await;
//! if let Some(code) = response.error_code() {
//!     eprintln!("rejected: {code}");
//! }
//! # Ok(())
//! # }
//! ```
mod config;
mod error;
mod response;
pub mod roster;
mod session;

pub use config::SessionConfig;
pub use error::{Result, SessionError};
pub use response::{ExecuteResponse, ExecutionOutcome};
pub use roster::RosterError;
pub use session::CombatSession;
