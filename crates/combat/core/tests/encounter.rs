use std::collections::VecDeque;
use std::sync::Mutex;

use combat_core::{
    ActionKind, AppliedValue, CombatAction, CombatEngine, CombatEnv, CombatState, CombatStats,
    CombatTables, Effect, EffectClassification, EffectDuration, EffectFlags, EncounterSetup,
    ExecuteError, FactionKind, FixedRng, Outcome, Participant, PcgRng, ResourceMeter, RngOracle,
    Skill, StateError, StatusEffect, TargetClass, Timestamp, ValidationError, available_actions,
    valid_targets,
};

/// Replays raw values in order, then repeats the last one.
struct ScriptedRng(Mutex<VecDeque<u32>>);

impl ScriptedRng {
    fn new(values: &[u32]) -> Self {
        Self(Mutex::new(values.iter().copied().collect()))
    }
}

impl RngOracle for ScriptedRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        let mut values = self.0.lock().unwrap();
        if values.len() > 1 {
            values.pop_front().unwrap()
        } else {
            values.front().copied().unwrap_or(0)
        }
    }
}

fn flat_tables() -> CombatTables {
    let mut tables = CombatTables::default();
    tables.damage.variance_percent = 0;
    tables
}

fn hero() -> Participant {
    Participant::new(
        "hero",
        "Hero",
        FactionKind::Player,
        ResourceMeter::full(100),
        ResourceMeter::full(3),
        CombatStats::new(10, 3, 5, 0),
    )
}

fn goblin(id: &str, speed: i32) -> Participant {
    Participant::new(
        id,
        "Goblin",
        FactionKind::Enemy,
        ResourceMeter::full(30),
        ResourceMeter::full(3),
        CombatStats::new(4, 2, speed, 0),
    )
}

fn initiate(
    participants: Vec<Participant>,
    seed: u64,
    rng: &dyn RngOracle,
    tables: &CombatTables,
) -> CombatState {
    CombatEngine::initiate(
        participants,
        EncounterSetup::default().with_seed(seed),
        CombatEnv::new(rng, tables, Timestamp::ZERO),
    )
    .expect("roster should be valid")
}

fn step(
    state: &CombatState,
    action: CombatAction,
    rng: &dyn RngOracle,
    tables: &CombatTables,
) -> combat_core::Resolution {
    CombatEngine::execute(state, &action, CombatEnv::new(rng, tables, Timestamp::ZERO))
        .expect("action should resolve")
}

fn assert_vitals_in_bounds(state: &CombatState) {
    for p in &state.participants {
        assert!(p.health.current <= p.health.maximum, "{} health", p.id);
        assert!(
            p.action_points.current <= p.action_points.maximum,
            "{} action points",
            p.id
        );
    }
}

#[test]
fn turn_order_is_a_reproducible_permutation() {
    let tables = CombatTables::default();
    let rng = FixedRng(0);
    let roster = || {
        vec![
            hero(),
            goblin("g1", 9),
            goblin("g2", 5),
            goblin("g3", 1),
            goblin("g4", 5),
        ]
    };

    let first = initiate(roster(), 1, &rng, &tables);
    let second = initiate(roster(), 1, &rng, &tables);
    assert_eq!(first.turn_order, second.turn_order);

    let mut ids: Vec<_> = first.turn_order.iter().map(|id| id.to_string()).collect();
    ids.sort();
    assert_eq!(ids, vec!["g1", "g2", "g3", "g4", "hero"]);
    // hero and g2 tie at speed 5 and keep input order
    assert_eq!(
        first.turn_order,
        vec!["g1".into(), "hero".into(), "g2".into(), "g4".into(), "g3".into()]
    );
}

#[test]
fn scripted_duel_ends_in_victory() {
    let tables = flat_tables();
    let rng = FixedRng(0);
    let mut state = initiate(vec![hero(), goblin("goblin", 3)], 0, &rng, &tables);
    assert_eq!(state.current_turn, Some("hero".into()));

    let expected = [22, 14, 6, 0];
    for (round, health) in expected.into_iter().enumerate() {
        let resolution = step(&state, CombatAction::attack("hero", "goblin"), &rng, &tables);
        state = resolution.state;

        let goblin = state.participant(&"goblin".into()).unwrap();
        assert_eq!(goblin.health.current, health, "after attack {}", round + 1);
        assert_eq!(state.player().unwrap().action_points.current, 1);

        if health == 0 {
            let terminal = resolution.terminal.expect("encounter should end");
            assert_eq!(terminal.outcome, Outcome::Victory);
            assert!(state.victory_conditions[0].satisfied);
            assert!(!state.active);
            return;
        }

        assert!(resolution.terminal.is_none());
        state = step(&state, CombatAction::wait("goblin"), &rng, &tables).state;
        assert_eq!(state.current_turn, Some("hero".into()));
        assert_eq!(state.player().unwrap().action_points.current, 3);
    }
    panic!("the goblin should have fallen");
}

#[test]
fn finished_encounter_rejects_further_actions() {
    let tables = flat_tables();
    let rng = FixedRng(0);
    let mut weak = goblin("goblin", 1);
    weak.health = ResourceMeter::full(5);
    let state = initiate(vec![hero(), weak], 0, &rng, &tables);

    let ended = step(&state, CombatAction::attack("hero", "goblin"), &rng, &tables).state;
    assert!(ended.is_ended());
    let snapshot = ended.clone();

    for action in [
        CombatAction::wait("hero"),
        CombatAction::attack("hero", "goblin"),
        CombatAction::flee("hero"),
    ] {
        let err = CombatEngine::execute(
            &ended,
            &action,
            CombatEnv::new(&rng, &tables, Timestamp::ZERO),
        )
        .unwrap_err();
        assert_eq!(err, ExecuteError::State(StateError::AlreadyEnded));
    }
    assert_eq!(ended.participants, snapshot.participants);
    assert_eq!(ended.log, snapshot.log);
    assert_eq!(ended, snapshot);
}

#[test]
fn action_points_drop_by_exactly_the_cost() {
    let tables = flat_tables();
    let rng = FixedRng(0);
    let mut rich = hero();
    rich.action_points = ResourceMeter::full(6);

    for (action, cost) in [
        (CombatAction::attack("hero", "goblin"), 2),
        (CombatAction::defend("hero"), 1),
        (CombatAction::flee("hero"), 2),
        (CombatAction::wait("hero"), 0),
    ] {
        let state = initiate(vec![rich.clone(), goblin("goblin", 1)], 0, &rng, &tables);
        let resolution = step(&state, action, &rng, &tables);
        assert_eq!(resolution.action_result.cost, cost);
        let player = resolution.state.player().unwrap();
        assert_eq!(player.action_points.current, 6 - cost);
    }
}

#[test]
fn vitals_stay_in_bounds_through_a_brawl() {
    let tables = CombatTables::default();
    let rng = PcgRng;
    let mut state = initiate(
        vec![hero(), goblin("g1", 6), goblin("g2", 4)],
        0xC0FFEE,
        &rng,
        &tables,
    );

    for _ in 0..60 {
        if state.is_ended() {
            break;
        }
        let actor = state.current_turn.clone().unwrap();
        let options = available_actions(&state, &tables);
        let action = match options.iter().find(|a| a.kind == ActionKind::Attack) {
            Some(attack) => CombatAction::attack(actor, attack.targets[0].clone()),
            None => CombatAction::wait(actor),
        };
        state = step(&state, action, &rng, &tables).state;
        assert_vitals_in_bounds(&state);
    }
    assert!(state.is_ended());
}

#[test]
fn timed_effect_expires_after_its_duration() {
    let tables = flat_tables();
    let rng = FixedRng(0);
    let slow = StatusEffect::new(
        "slow",
        "Slow",
        EffectClassification::Debuff,
        EffectDuration::Turns(2),
    );
    let mut caster = hero();
    caster = caster.with_skill(
        Skill::new("hex", "Hex", 1, TargetClass::SingleEnemy)
            .with_effect(Effect::ApplyStatus(slow)),
    );
    let mut state = initiate(vec![caster, goblin("goblin", 1)], 0, &rng, &tables);

    state = step(
        &state,
        CombatAction::skill("hero", "hex", Some("goblin".into())),
        &rng,
        &tables,
    )
    .state;
    let has_slow = |state: &CombatState| {
        state
            .participant(&"goblin".into())
            .unwrap()
            .status_effects
            .has("slow")
    };
    assert!(has_slow(&state));

    // goblin, then round 2 begins (first boundary)
    state = step(&state, CombatAction::wait("goblin"), &rng, &tables).state;
    assert_eq!(state.round, 2);
    assert!(has_slow(&state));

    state = step(&state, CombatAction::wait("hero"), &rng, &tables).state;
    state = step(&state, CombatAction::wait("goblin"), &rng, &tables).state;
    assert_eq!(state.round, 3);
    assert!(!has_slow(&state));
}

#[test]
fn targets_are_split_by_faction_kind() {
    let tables = CombatTables::default();
    let rng = FixedRng(0);
    let squire = Participant::new(
        "squire",
        "Squire",
        FactionKind::Ally,
        ResourceMeter::full(40),
        ResourceMeter::full(3),
        CombatStats::new(5, 2, 1, 0),
    );
    let medic = hero().with_skill(
        Skill::new("mend", "Mend", 1, TargetClass::SingleAlly)
            .with_effect(Effect::Heal { amount: 5 }),
    );
    let state = initiate(
        vec![medic, squire, goblin("g1", 2), goblin("g2", 3)],
        0,
        &rng,
        &tables,
    );

    // an ally is a different faction kind from the player
    let targets = valid_targets(&state, &CombatAction::attack("hero", "g1"));
    assert_eq!(targets, vec!["squire".into(), "g1".into(), "g2".into()]);

    let goblin_targets = valid_targets(&state, &CombatAction::attack("g1", "hero"));
    assert_eq!(goblin_targets, vec!["hero".into(), "squire".into()]);

    let mend = CombatAction::skill("hero", "mend", Some("hero".into()));
    assert_eq!(valid_targets(&state, &mend), vec!["hero".into()]);

    let err = CombatEngine::execute(
        &state,
        &CombatAction::attack("hero", "hero"),
        CombatEnv::new(&rng, &tables, Timestamp::ZERO),
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "hero is not a valid target for this action");

    let err = CombatEngine::execute(
        &state,
        &CombatAction::skill("hero", "mend", Some("squire".into())),
        CombatEnv::new(&rng, &tables, Timestamp::ZERO),
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "squire is not a valid target for this action");
}

#[test]
fn flee_outcome_is_reproducible_for_a_seed() {
    let tables = CombatTables::default();
    let rng = PcgRng;

    let attempt = |seed: u64| {
        let state = initiate(vec![hero(), goblin("goblin", 5)], seed, &rng, &tables);
        step(&state, CombatAction::flee("hero"), &rng, &tables)
    };

    for seed in [1, 42, 9_001] {
        let first = attempt(seed);
        let second = attempt(seed);
        assert_eq!(first.action_result, second.action_result);
        assert_eq!(first.terminal, second.terminal);

        let AppliedValue::Flee { chance, success, .. } = first.action_result.effects[0].value
        else {
            panic!("flee should record its roll");
        };
        assert_eq!(chance, 50);
        if success {
            assert_eq!(first.terminal.unwrap().outcome, Outcome::Fled);
        } else {
            assert!(first.terminal.is_none());
        }
    }
}

#[test]
fn documented_duel_drops_to_zero_on_a_high_roll() {
    // 8 base damage with a spread of 8: raw variance roll r deals r damage
    let mut tables = CombatTables::default();
    tables.damage.variance_percent = 100;
    // hit, variance per attack: 8, 8, then a maximal 16
    let rng = ScriptedRng::new(&[0, 8, 0, 8, 0, 16]);
    let mut state = initiate(vec![hero(), goblin("goblin", 3)], 0, &rng, &tables);

    let first = step(&state, CombatAction::attack("hero", "goblin"), &rng, &tables);
    state = first.state;
    assert_eq!(state.participant(&"goblin".into()).unwrap().health.current, 22);
    assert_eq!(state.player().unwrap().action_points.current, 1);

    state = step(&state, CombatAction::wait("goblin"), &rng, &tables).state;
    state = step(&state, CombatAction::attack("hero", "goblin"), &rng, &tables).state;
    assert_eq!(state.participant(&"goblin".into()).unwrap().health.current, 14);

    state = step(&state, CombatAction::wait("goblin"), &rng, &tables).state;
    let last = step(&state, CombatAction::attack("hero", "goblin"), &rng, &tables);
    let goblin = last.state.participant(&"goblin".into()).unwrap();
    assert_eq!(goblin.health.current, 0);
    assert!(last.action_result.effects[0].flags.contains(EffectFlags::CLAMPED));
    assert_eq!(last.terminal.unwrap().outcome, Outcome::Victory);
}

#[test]
fn extreme_stats_resolve_without_panicking() {
    let tables = CombatTables::default();
    let rng = FixedRng(0);

    let mut titan = hero();
    titan.stats = CombatStats::new(500_000_000, i32::MIN, 1_000_000_000, i32::MAX);
    let mut wall = goblin("goblin", -1_000_000_000);
    wall.stats.defense = i32::MAX;
    wall.stats.attack = i32::MAX;
    let state = initiate(vec![titan.clone(), goblin("goblin", 1)], 3, &rng, &tables);

    let resolution = step(&state, CombatAction::attack("hero", "goblin"), &rng, &tables);
    let goblin = resolution.state.participant(&"goblin".into()).unwrap();
    assert_eq!(goblin.health.current, 0);
    assert_eq!(resolution.terminal.unwrap().outcome, Outcome::Victory);

    let state = initiate(vec![titan, wall], 3, &rng, &tables);
    let resolution = step(&state, CombatAction::flee("hero"), &rng, &tables);
    let AppliedValue::Flee { chance, .. } = resolution.action_result.effects[0].value else {
        panic!("flee should record its roll");
    };
    assert_eq!(chance, 90);
    assert_vitals_in_bounds(&resolution.state);
}

#[test]
fn cooldown_blocks_exactly_the_next_owner_turn() {
    let tables = flat_tables();
    let rng = FixedRng(0);
    let brawler = hero().with_skill(
        Skill::new("bash", "Bash", 1, TargetClass::SingleEnemy)
            .with_cooldown(1)
            .with_effect(Effect::Damage { power: 0 }),
    );
    let bash = || CombatAction::skill("hero", "bash", Some("goblin".into()));
    let mut state = initiate(vec![brawler, goblin("goblin", 1)], 0, &rng, &tables);

    state = step(&state, bash(), &rng, &tables).state;
    state = step(&state, CombatAction::wait("goblin"), &rng, &tables).state;

    let err = CombatEngine::execute(
        &state,
        &bash(),
        CombatEnv::new(&rng, &tables, Timestamp::ZERO),
    )
    .unwrap_err();
    assert_eq!(
        err,
        ExecuteError::Validation(ValidationError::SkillOnCooldown {
            skill: "bash".into(),
            remaining: 1,
        })
    );
    let offered = available_actions(&state, &tables);
    assert!(offered.iter().all(|a| a.kind != ActionKind::Skill));

    state = step(&state, CombatAction::defend("hero"), &rng, &tables).state;
    state = step(&state, CombatAction::wait("goblin"), &rng, &tables).state;
    let resolution = step(&state, bash(), &rng, &tables);
    assert_eq!(resolution.action_result.kind, ActionKind::Skill);
}
