use crate::state::{
    CombatState, DefeatCondition, Participant, Phase, Timestamp, VictoryCondition,
};

/// Active state with the default conditions, turn order in input order and
/// the first participant to act.
pub(crate) fn state_of(participants: Vec<Participant>) -> CombatState {
    let turn_order: Vec<_> = participants.iter().map(|p| p.id.clone()).collect();
    let phase = participants
        .first()
        .map_or(Phase::PlayerTurn, |p| Phase::for_faction(p.faction));

    CombatState {
        active: true,
        phase,
        current_turn: turn_order.first().cloned(),
        turn_order,
        turn_index: 0,
        participants,
        round: 1,
        environment: None,
        log: Vec::new(),
        victory_conditions: vec![VictoryCondition::defeat_all_enemies()],
        defeat_conditions: vec![DefeatCondition::player_death()],
        terminal: None,
        seed: 0,
        nonce: 0,
        started_at: Timestamp::ZERO,
        turn_started_at: Timestamp::ZERO,
    }
}
