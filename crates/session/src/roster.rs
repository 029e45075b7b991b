//! Participant definitions supplied by the content service.
//!
//! The numbers are taken as given: stats already include equipment bonuses and
//! nothing here second-guesses them. Structural problems (bad JSON, missing
//! fields, an empty list) are reported; semantic checks happen at initiate.
//!
//! Accepted shapes:
//!
//! ```json
//! [ { "id": "hero", ... }, { "id": "goblin", ... } ]
//! { "participants": [ ... ] }
//! ```

use combat_core::Participant;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("malformed roster: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("roster lists no participants")]
    Empty,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RosterDocument {
    List(Vec<Participant>),
    Wrapped { participants: Vec<Participant> },
}

/// Parses a roster document into participants, in document order.
pub fn from_json(input: &str) -> Result<Vec<Participant>, RosterError> {
    let participants = match serde_json::from_str::<RosterDocument>(input)? {
        RosterDocument::List(participants) => participants,
        RosterDocument::Wrapped { participants } => participants,
    };
    if participants.is_empty() {
        return Err(RosterError::Empty);
    }
    Ok(participants)
}
