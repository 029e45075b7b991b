//! Round-boundary status effect processing.
//!
//! Runs once each time the turn order wraps, before the new round's first
//! turn. For every living participant and every effect it owns:
//!
//! 1. the periodic tick (damage or heal, scaled by stacks, clamped)
//! 2. the countdown of `Turns(n)` durations, dropping effects that reach zero
//!
//! `Permanent` effects tick but never expire. `UntilOwnerTurn` effects are
//! cleared by the turn controller instead.

use crate::state::{CombatState, ParticipantId, PeriodicEffect};

/// What a round boundary did to one participant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusTick {
    pub participant: ParticipantId,
    pub damage: u32,
    pub healing: u32,
    /// Ids of effects that ran out this boundary.
    pub expired: Vec<String>,
    /// True when periodic damage brought the participant to zero health.
    pub died: bool,
}

impl StatusTick {
    fn is_empty(&self) -> bool {
        self.damage == 0 && self.healing == 0 && self.expired.is_empty()
    }

    /// Log line for this tick.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.damage > 0 {
            parts.push(format!("{} takes {} damage from effects", self.participant, self.damage));
        }
        if self.healing > 0 {
            parts.push(format!("{} recovers {} health from effects", self.participant, self.healing));
        }
        if !self.expired.is_empty() {
            parts.push(format!("{} wears off", self.expired.join(", ")));
        }
        if self.died {
            parts.push(format!("{} succumbs", self.participant));
        }
        parts.join("; ")
    }
}

/// Applies periodic effects and counts down durations for every living participant.
///
/// Returns one record per participant that was affected, in participant order.
pub fn process_round_boundary(state: &mut CombatState) -> Vec<StatusTick> {
    let mut ticks = Vec::new();

    for participant in state.participants.iter_mut().filter(|p| p.is_alive()) {
        let mut tick = StatusTick {
            participant: participant.id.clone(),
            ..StatusTick::default()
        };

        let periodic: Vec<(PeriodicEffect, u32)> = participant
            .status_effects
            .iter()
            .filter_map(|effect| effect.periodic.map(|p| (p, effect.stacks)))
            .collect();

        for (effect, stacks) in periodic {
            if !participant.is_alive() {
                break;
            }
            match effect {
                PeriodicEffect::Damage(amount) => {
                    tick.damage += participant.health.drain(amount.saturating_mul(stacks));
                }
                PeriodicEffect::Heal(amount) => {
                    tick.healing += participant.health.restore(amount.saturating_mul(stacks));
                }
            }
        }
        tick.died = !participant.is_alive();

        tick.expired = participant.status_effects.count_down();

        if !tick.is_empty() {
            ticks.push(tick);
        }
    }

    ticks
}
