//! Victory and defeat predicates plus the terminal result they produce.

use crate::state::ParticipantId;

/// Reward or consequence attached to a condition, handed to the host verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionPayload {
    #[cfg_attr(feature = "serde", serde(default))]
    pub experience: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub gold: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub items: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub notes: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum VictoryKind {
    /// Every enemy-kind participant has zero health.
    DefeatAllEnemies,
    /// A specific participant has zero health.
    DefeatTarget(ParticipantId),
    /// The encounter lasted past the given round.
    SurviveRounds(u32),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DefeatKind {
    /// The player-kind participant has zero health.
    PlayerDeath,
    /// Every player and ally has zero health.
    PartyWiped,
    /// The encounter ran past the given round.
    RoundLimit(u32),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VictoryCondition {
    pub kind: VictoryKind,
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub satisfied: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub reward: Option<ConditionPayload>,
}

impl VictoryCondition {
    pub fn new(kind: VictoryKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            satisfied: false,
            reward: None,
        }
    }

    pub fn defeat_all_enemies() -> Self {
        Self::new(VictoryKind::DefeatAllEnemies, "All enemies have been defeated")
    }

    pub fn with_reward(mut self, reward: ConditionPayload) -> Self {
        self.reward = Some(reward);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefeatCondition {
    pub kind: DefeatKind,
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub triggered: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub consequence: Option<ConditionPayload>,
}

impl DefeatCondition {
    pub fn new(kind: DefeatKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            triggered: false,
            consequence: None,
        }
    }

    pub fn player_death() -> Self {
        Self::new(DefeatKind::PlayerDeath, "The player has fallen")
    }

    pub fn with_consequence(mut self, consequence: ConditionPayload) -> Self {
        self.consequence = Some(consequence);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Outcome {
    Victory,
    Defeat,
    Fled,
}

/// One-time payload produced when an encounter ends.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerminalResult {
    pub outcome: Outcome,
    pub reason: String,
    pub payload: Option<ConditionPayload>,
    /// Round in which the encounter ended.
    pub round: u32,
    /// Participant whose successful flee ended the encounter.
    pub fled_by: Option<ParticipantId>,
}
