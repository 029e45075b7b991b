//! Victory and defeat evaluation.
//!
//! Defeat conditions are checked before victory conditions, so a round in
//! which both sides fall counts as a defeat. The first matching condition ends
//! the encounter and is the only one marked.

use crate::state::{
    CombatState, DefeatKind, FactionKind, Outcome, ParticipantId, Phase, TerminalResult,
    VictoryKind,
};

/// Ends the encounter if any condition holds. Returns the terminal result when
/// this call ended it.
pub fn evaluate(state: &mut CombatState) -> Option<TerminalResult> {
    if state.is_ended() {
        return None;
    }

    let defeat = state
        .defeat_conditions
        .iter()
        .position(|condition| defeat_holds(state, &condition.kind));
    if let Some(index) = defeat {
        let condition = &mut state.defeat_conditions[index];
        condition.triggered = true;
        let result = TerminalResult {
            outcome: Outcome::Defeat,
            reason: condition.description.clone(),
            payload: condition.consequence.clone(),
            round: state.round,
            fled_by: None,
        };
        return Some(finish(state, result));
    }

    let victory = state
        .victory_conditions
        .iter()
        .position(|condition| victory_holds(state, &condition.kind));
    if let Some(index) = victory {
        let condition = &mut state.victory_conditions[index];
        condition.satisfied = true;
        let result = TerminalResult {
            outcome: Outcome::Victory,
            reason: condition.description.clone(),
            payload: condition.reward.clone(),
            round: state.round,
            fled_by: None,
        };
        return Some(finish(state, result));
    }

    None
}

/// Ends the encounter after a successful flee.
pub fn flee(state: &mut CombatState, actor: &ParticipantId) -> TerminalResult {
    let result = TerminalResult {
        outcome: Outcome::Fled,
        reason: format!("{actor} fled the encounter"),
        payload: None,
        round: state.round,
        fled_by: Some(actor.clone()),
    };
    finish(state, result)
}

/// Ends the encounter when nobody is left to take a turn.
pub fn no_survivors(state: &mut CombatState) -> TerminalResult {
    let result = TerminalResult {
        outcome: Outcome::Defeat,
        reason: "No participant is left standing".to_string(),
        payload: None,
        round: state.round,
        fled_by: None,
    };
    finish(state, result)
}

fn finish(state: &mut CombatState, result: TerminalResult) -> TerminalResult {
    state.active = false;
    state.phase = Phase::Ended;
    state.terminal = Some(result.clone());
    result
}

fn defeat_holds(state: &CombatState, kind: &DefeatKind) -> bool {
    match kind {
        DefeatKind::PlayerDeath => state.player().is_none_or(|p| !p.is_alive()),
        DefeatKind::PartyWiped => !state.living().any(|p| p.faction.is_party()),
        DefeatKind::RoundLimit(limit) => state.round > *limit,
    }
}

fn victory_holds(state: &CombatState, kind: &VictoryKind) -> bool {
    match kind {
        VictoryKind::DefeatAllEnemies => state.living_by_faction(FactionKind::Enemy).next().is_none(),
        VictoryKind::DefeatTarget(id) => state.participant(id).is_some_and(|p| !p.is_alive()),
        VictoryKind::SurviveRounds(rounds) => state.round > *rounds,
    }
}
