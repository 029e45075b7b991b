//! Initiative: the fixed order in which participants take their turns.

use crate::state::{Participant, ParticipantId};

/// Orders participants by descending effective speed.
///
/// The sort is stable, so equal speeds keep their input order. The result is a
/// permutation of the input ids and depends on nothing but the input.
pub fn turn_order(participants: &[Participant]) -> Vec<ParticipantId> {
    let mut ranked: Vec<(i32, &ParticipantId)> = participants
        .iter()
        .map(|p| (p.effective_stats().speed, &p.id))
        .collect();
    ranked.sort_by(|a, b| b.0.cmp(&a.0));
    ranked.into_iter().map(|(_, id)| id.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{
        CombatStats, EffectClassification, EffectDuration, FactionKind, ResourceMeter, StatKind,
        StatModifier, StatusEffect,
    };

    fn with_speed(id: &str, speed: i32) -> Participant {
        Participant::new(
            id,
            id,
            FactionKind::Enemy,
            ResourceMeter::full(10),
            ResourceMeter::full(3),
            CombatStats::new(1, 1, speed, 0),
        )
    }

    #[test]
    fn fastest_acts_first() {
        let order = turn_order(&[with_speed("a", 3), with_speed("b", 9), with_speed("c", 5)]);
        assert_eq!(order, vec!["b".into(), "c".into(), "a".into()]);
    }

    #[test]
    fn ties_keep_input_order() {
        let order = turn_order(&[with_speed("x", 4), with_speed("y", 4), with_speed("z", 4)]);
        assert_eq!(order, vec!["x".into(), "y".into(), "z".into()]);
    }

    #[test]
    fn speed_modifiers_count() {
        let mut hasted = with_speed("hasted", 2);
        hasted.status_effects.apply(
            StatusEffect::new(
                "haste",
                "Haste",
                EffectClassification::Buff,
                EffectDuration::Turns(2),
            )
            .with_modifier(StatModifier::additive(StatKind::Speed, 10)),
        );
        let order = turn_order(&[with_speed("plain", 5), hasted]);
        assert_eq!(order[0], "hasted".into());
    }
}
