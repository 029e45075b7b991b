//! Turn controller: who acts next and what happens when a turn begins.

use crate::config::CombatTables;
use crate::engine::status::{StatusTick, process_round_boundary};
use crate::engine::termination;
use crate::state::{CombatState, Phase, TerminalResult, Timestamp};

/// Result of moving the turn pointer forward.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Advance {
    /// Status ticks applied if the order wrapped into a new round.
    pub ticks: Vec<StatusTick>,
    /// Set when a tick ended the encounter or nobody was left to act.
    pub terminal: Option<TerminalResult>,
}

/// Starts the encounter on the first living participant in turn order.
///
/// The opening turn uses the supplied action points as-is, without
/// regeneration.
pub(crate) fn start(state: &mut CombatState, now: Timestamp) -> Option<TerminalResult> {
    let first = state
        .turn_order
        .iter()
        .position(|id| state.participant(id).is_some_and(|p| p.is_alive()));

    match first {
        Some(index) => {
            point_at(state, index, now);
            None
        }
        None => Some(termination::no_survivors(state)),
    }
}

/// Moves to the next living participant, crossing a round boundary if needed.
///
/// Dead entries are skipped without consuming a turn. Wrapping past the end
/// of the order increments the round, runs the status processor and
/// re-evaluates termination before anyone acts.
pub(crate) fn advance(state: &mut CombatState, tables: &CombatTables, now: Timestamp) -> Advance {
    let mut advance = Advance::default();
    let len = state.turn_order.len();
    let mut index = state.turn_index;

    for _ in 0..len {
        index += 1;
        if index >= len {
            index = 0;
            state.round += 1;
            let ticks = process_round_boundary(state);
            for tick in &ticks {
                state.push_log(tick.participant.clone(), None, None, tick.summary(), now);
            }
            advance.ticks.extend(ticks);

            if let Some(result) = termination::evaluate(state) {
                advance.terminal = Some(result);
                return advance;
            }
        }

        let alive = state
            .participant(&state.turn_order[index])
            .is_some_and(|p| p.is_alive());
        if alive {
            begin_turn(state, index, tables, now);
            return advance;
        }
    }

    advance.terminal = Some(termination::no_survivors(state));
    advance
}

/// Turn-start upkeep for the participant at `index` in the order.
///
/// Clears effects lasting until this turn and regenerates action points (base
/// regeneration plus any banked bonus). Cooldowns are not touched here; they
/// count down when the owner's action resolves.
fn begin_turn(state: &mut CombatState, index: usize, tables: &CombatTables, now: Timestamp) {
    point_at(state, index, now);

    let id = state.turn_order[index].clone();
    let Some(actor) = state.participant_mut(&id) else {
        return;
    };

    actor.status_effects.clear_until_owner_turn();
    let regen = tables
        .ap_regen_per_turn
        .saturating_add(std::mem::take(&mut actor.pending_ap_bonus));
    actor.action_points.restore(regen);
}

fn point_at(state: &mut CombatState, index: usize, now: Timestamp) {
    let id = state.turn_order[index].clone();
    state.phase = state
        .participant(&id)
        .map_or(Phase::EnemyTurn, |p| Phase::for_faction(p.faction));
    state.turn_index = index;
    state.current_turn = Some(id);
    state.turn_started_at = now;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::TargetClass;
    use crate::state::{
        CombatStats, EffectClassification, EffectDuration, FactionKind, Outcome, Participant,
        PeriodicEffect, ResourceMeter, Skill, StatusEffect,
    };

    fn unit(id: &str, faction: FactionKind, health: u32) -> Participant {
        Participant::new(
            id,
            id,
            faction,
            ResourceMeter::new(health, 20),
            ResourceMeter::new(0, 6),
            CombatStats::new(5, 1, 1, 0),
        )
    }

    fn trio() -> CombatState {
        crate::test_utils::state_of(vec![
            unit("hero", FactionKind::Player, 20),
            unit("squire", FactionKind::Ally, 20),
            unit("orc", FactionKind::Enemy, 20),
        ])
    }

    #[test]
    fn advance_moves_to_the_next_entry() {
        let mut state = trio();
        let tables = CombatTables::default();

        advance(&mut state, &tables, Timestamp(5));
        assert_eq!(state.current_turn, Some("squire".into()));
        // allies are reported under the non-player phase
        assert_eq!(state.phase, Phase::EnemyTurn);
        assert_eq!(state.turn_started_at, Timestamp(5));
        assert_eq!(state.round, 1);
    }

    #[test]
    fn dead_entries_are_skipped() {
        let mut state = trio();
        state
            .participant_mut(&"squire".into())
            .unwrap()
            .health
            .set_current(0);

        advance(&mut state, &CombatTables::default(), Timestamp::ZERO);
        assert_eq!(state.current_turn, Some("orc".into()));
        assert_eq!(state.round, 1);
    }

    #[test]
    fn wrapping_starts_a_new_round() {
        let mut state = trio();
        let tables = CombatTables::default();
        for _ in 0..3 {
            advance(&mut state, &tables, Timestamp::ZERO);
        }
        assert_eq!(state.current_turn, Some("hero".into()));
        assert_eq!(state.phase, Phase::PlayerTurn);
        assert_eq!(state.round, 2);
    }

    #[test]
    fn turn_start_regenerates_and_spends_the_bonus() {
        let mut state = trio();
        state.participant_mut(&"squire".into()).unwrap().pending_ap_bonus = 1;

        advance(&mut state, &CombatTables::default(), Timestamp::ZERO);
        let squire = state.participant(&"squire".into()).unwrap();
        assert_eq!(squire.action_points.current, 3);
        assert_eq!(squire.pending_ap_bonus, 0);
    }

    #[test]
    fn turn_start_clears_guard_but_keeps_cooldowns() {
        let mut state = trio();
        {
            let squire = state.participant_mut(&"squire".into()).unwrap();
            squire.status_effects.apply(StatusEffect::new(
                "guard",
                "Guard",
                EffectClassification::Buff,
                EffectDuration::UntilOwnerTurn,
            ));
            let mut skill = Skill::new("bash", "Bash", 2, TargetClass::SingleEnemy).with_cooldown(2);
            skill.cooldown = 2;
            squire.skills.push(skill);
        }

        advance(&mut state, &CombatTables::default(), Timestamp::ZERO);
        let squire = state.participant(&"squire".into()).unwrap();
        assert!(!squire.status_effects.has("guard"));
        assert_eq!(squire.skill(&"bash".into()).unwrap().cooldown, 2);
    }

    #[test]
    fn lethal_round_tick_ends_the_encounter() {
        let mut state = trio();
        state.turn_index = 2;
        state
            .participant_mut(&"hero".into())
            .unwrap()
            .status_effects
            .apply(
                StatusEffect::new(
                    "bleed",
                    "Bleed",
                    EffectClassification::Debuff,
                    EffectDuration::Turns(2),
                )
                .with_periodic(PeriodicEffect::Damage(50)),
            );

        let advance = advance(&mut state, &CombatTables::default(), Timestamp::ZERO);
        assert_eq!(advance.ticks.len(), 1);
        assert_eq!(advance.terminal.unwrap().outcome, Outcome::Defeat);
        assert!(state.is_ended());
    }

    #[test]
    fn nobody_left_means_defeat() {
        let mut state = crate::test_utils::state_of(vec![
            unit("hero", FactionKind::Player, 0),
            unit("orc", FactionKind::Enemy, 0),
        ]);
        state.defeat_conditions.clear();
        state.victory_conditions.clear();

        let advance = advance(&mut state, &CombatTables::default(), Timestamp::ZERO);
        assert_eq!(advance.terminal.unwrap().outcome, Outcome::Defeat);
    }
}
