mod common;

use battle_core::{
    BaseStats, BattleConfig, BattleEnv, BattleStatus, CombatFlags, DrawReason, LogKind,
    MoveDefinition, MoveId, MoveSelector, MovesSnapshot, Outcome, PcgRng, Position,
    Side, TurnInput, UnlockCondition, process_turn,
};

use common::{aang, catalog, duel, run_to_end, template, zuko};

fn move_uses_on(state: &battle_core::BattleState, turn: u32) -> Vec<&battle_core::LogEntry> {
    state
        .log
        .iter()
        .filter(|entry| entry.turn == turn && entry.is_move_use())
        .collect()
}

#[test]
fn basic_strike_reduces_health() {
    let catalog = catalog();
    let config = BattleConfig::default();
    let rng = PcgRng;
    let env = BattleEnv::new(&catalog, &rng, &config);
    let brawler = template(7, "Brawler", BaseStats::new(0, 0, 10), &["basic_strike", "meditate"]);
    let state = duel(&brawler, &brawler, &catalog, &config, 0);

    let next = process_turn(&state, &env, &TurnInput::with_move("basic_strike")).unwrap();

    let target = next.character(Side::Second);
    assert_eq!(target.health, 99);
    assert_eq!(next.total_damage(), 1);
    assert_eq!(move_uses_on(&next, 1)[0].damage, Some(1));
}

#[test]
fn finisher_consumes_the_turn() {
    let catalog = catalog();
    let config = BattleConfig::default();
    let rng = PcgRng;
    let env = BattleEnv::new(&catalog, &rng, &config);
    let mut state = duel(&zuko(), &aang(), &catalog, &config, 21);
    state.character_mut(Side::Second).health = 20;

    let next = process_turn(&state, &env, &TurnInput::ai()).unwrap();

    let uses = move_uses_on(&next, 1);
    assert_eq!(uses.len(), 1);
    assert_eq!(uses[0].kind, LogKind::Finisher);
    assert_eq!(uses[0].meta.move_id, Some(MoveId::new("lightning")));
    assert_eq!(uses[0].outcome(), Some(Outcome::FinisherLanded));
    assert!(next.character(Side::First).flags.contains(CombatFlags::USED_FINISHER));
    assert_eq!(next.status, BattleStatus::Victory(Side::First));
}

#[test]
fn failed_finisher_is_spent() {
    let catalog = MovesSnapshot::new(vec![
        MoveDefinition::fallback_strike(MoveId::new("basic_strike")),
        MoveDefinition::new("searing_end", "Searing End", 5)
            .with_finisher(UnlockCondition::TargetHealthBelow(50)),
        MoveDefinition::new("meditate", "Meditate", 0)
            .with_category(battle_core::MoveCategory::DefenseBuff),
    ])
    .unwrap();
    let config = BattleConfig::default();
    let rng = PcgRng;
    let env = BattleEnv::new(&catalog, &rng, &config);
    let azula = template(3, "Azula", BaseStats::new(0, 0, 10), &["basic_strike", "searing_end"]);
    let monk = template(4, "Gyatso", BaseStats::new(0, 0, 10), &["meditate"]);
    let mut state = duel(&azula, &monk, &catalog, &config, 13);
    state.character_mut(Side::Second).health = 40;

    let state = process_turn(&state, &env, &TurnInput::ai()).unwrap();
    let uses = move_uses_on(&state, 1);
    assert_eq!(uses.len(), 1);
    assert_eq!(uses[0].outcome(), Some(Outcome::FinisherFailed));
    assert_eq!(state.character(Side::Second).health, 35);

    // second turn for Azula: the finisher is spent, a regular move is used instead
    let state = process_turn(&state, &env, &TurnInput::ai()).unwrap();
    let state = process_turn(&state, &env, &TurnInput::ai()).unwrap();
    let uses = move_uses_on(&state, 3);
    assert_eq!(uses.len(), 1);
    assert_eq!(uses[0].kind, LogKind::Move);
    assert_eq!(uses[0].meta.move_id, Some(MoveId::new("basic_strike")));
}

#[test]
fn charge_releases_amplified_damage() {
    let catalog = catalog();
    let config = BattleConfig::default();
    let rng = PcgRng;
    let env = BattleEnv::new(&catalog, &rng, &config);
    let firebender = template(5, "Iroh", BaseStats::new(0, 0, 10), &["basic_strike", "inferno"]);
    let monk = template(6, "Pathik", BaseStats::new(0, 0, 10), &["meditate"]);
    let mut state = duel(&firebender, &monk, &catalog, &config, 17);
    state.character_mut(Side::Second).position = Position::Defensive;

    let state = process_turn(&state, &env, &TurnInput::with_move("inferno")).unwrap();
    let iroh = state.character(Side::First);
    assert_eq!(iroh.position, Position::Charging);
    assert_eq!(iroh.charge.progress, 50);
    assert_eq!(iroh.chi, config.starting_chi - 4 + config.chi_regen_per_turn);

    let state = process_turn(&state, &env, &TurnInput::ai()).unwrap();
    assert_eq!(state.character(Side::Second).position, Position::Defensive);

    let state = process_turn(&state, &env, &TurnInput::ai()).unwrap();
    let uses = move_uses_on(&state, 3);
    assert_eq!(uses[0].outcome(), Some(Outcome::ChargeReleased));
    // 12 base, doubled on release
    assert_eq!(uses[0].damage, Some(24));
    assert_eq!(state.character(Side::Second).health, 76);

    let iroh = state.character(Side::First);
    assert!(!iroh.charge.is_charging());
    assert_eq!(iroh.position, Position::Neutral);
}

#[test]
fn desperation_move_unlocks_at_low_health() {
    let catalog = catalog();
    let config = BattleConfig::default();
    let rng = PcgRng;
    let env = BattleEnv::new(&catalog, &rng, &config);
    let last_stand = MoveId::new("last_stand");

    let mut state = duel(&zuko(), &aang(), &catalog, &config, 0);
    state.character_mut(Side::First).health = 8;
    let legal = MoveSelector::legal_moves(&state, Side::First, &env);
    assert!(legal.iter().any(|definition| definition.id == last_stand));

    state.character_mut(Side::First).health = 25;
    let legal = MoveSelector::legal_moves(&state, Side::First, &env);
    assert!(legal.iter().all(|definition| definition.id != last_stand));
}

#[test]
fn finishers_never_enter_tactical_selection() {
    let catalog = catalog();
    let config = BattleConfig::default();
    let rng = PcgRng;
    let env = BattleEnv::new(&catalog, &rng, &config);
    let mut state = duel(&zuko(), &aang(), &catalog, &config, 0);
    state.character_mut(Side::Second).health = 10;

    let legal = MoveSelector::legal_moves(&state, Side::First, &env);
    assert!(!legal.is_empty());
    assert!(legal.iter().all(|definition| !definition.is_finisher()));
}

#[test]
fn damageless_battle_ends_in_draw() {
    let catalog = catalog();
    let config = BattleConfig::default();
    let pacifist = template(8, "Guru", BaseStats::new(0, 0, 10), &["meditate"]);
    let mut state = duel(&pacifist, &pacifist, &catalog, &config, 31);
    state.character_mut(Side::Second).health = 70;

    let (end, calls) = run_to_end(state, &catalog, &config);

    assert_eq!(calls, config.max_turns);
    assert_eq!(end.status, BattleStatus::Draw(DrawReason::NoDamage));
    assert_eq!(end.winner(), None);
    assert!(end.sudden_death);
}

#[test]
fn reposition_either_moves_or_exposes() {
    let catalog = catalog();
    let config = BattleConfig::default();
    let rng = PcgRng;
    let env = BattleEnv::new(&catalog, &rng, &config);
    let state = duel(&aang(), &zuko(), &catalog, &config, 2);

    let next = process_turn(&state, &env, &TurnInput::with_move("sky_dive")).unwrap();
    let aang = next.character(Side::First);
    let uses = move_uses_on(&next, 1);

    assert_eq!(aang.reposition_attempts, 1);
    match uses[0].outcome() {
        Some(Outcome::RepositionSucceeded) => assert_eq!(aang.position, Position::HighGround),
        Some(Outcome::RepositionFailed) => assert_eq!(aang.position, Position::Repositioning),
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[test]
fn stunned_side_loses_its_turn() {
    let catalog = catalog();
    let config = BattleConfig::default();
    let rng = PcgRng;
    let env = BattleEnv::new(&catalog, &rng, &config);
    let state = duel(&aang(), &zuko(), &catalog, &config, 6);

    let state = process_turn(&state, &env, &TurnInput::with_move("stun_kick")).unwrap();
    assert_eq!(state.character(Side::Second).position, Position::Stunned);

    let state = process_turn(&state, &env, &TurnInput::ai()).unwrap();
    assert!(move_uses_on(&state, 2).is_empty());
    let skipped = state
        .log
        .iter()
        .find(|entry| entry.turn == 2 && entry.kind == LogKind::Fallback)
        .expect("stunned entry");
    assert_eq!(skipped.outcome(), Some(Outcome::Stunned));
    assert_eq!(state.character(Side::Second).position, Position::Stunned);
}

#[test]
fn stunned_target_takes_punish_damage_once() {
    let catalog = catalog();
    let config = BattleConfig::default();
    let rng = PcgRng;
    let env = BattleEnv::new(&catalog, &rng, &config);
    let state = duel(&aang(), &zuko(), &catalog, &config, 6);

    let state = process_turn(&state, &env, &TurnInput::with_move("stun_kick")).unwrap();
    let state = process_turn(&state, &env, &TurnInput::ai()).unwrap();
    assert_eq!(state.character(Side::Second).position, Position::Stunned);

    let state = process_turn(&state, &env, &TurnInput::with_move("fire_blast")).unwrap();
    let hit = move_uses_on(&state, 3);
    assert_eq!(hit.len(), 1);
    assert!(hit[0].meta.punish);
    assert!(hit[0].damage.unwrap_or(0) > 0);

    // The stun is spent once the stunner has struck.
    assert_eq!(state.character(Side::Second).position, Position::Neutral);
    let state = process_turn(&state, &env, &TurnInput::ai()).unwrap();
    assert!(
        state
            .log
            .iter()
            .all(|entry| entry.turn != 4 || entry.kind != LogKind::Fallback)
    );
}

#[test]
fn ai_battles_produce_winners_or_draws() {
    let catalog = catalog();
    let config = BattleConfig::default();

    let mut decided = 0;
    for seed in 0..10 {
        let (end, _) = run_to_end(duel(&zuko(), &aang(), &catalog, &config, seed), &catalog, &config);
        match end.status {
            BattleStatus::Victory(side) => {
                decided += 1;
                assert!(end.character(side.opponent()).is_defeated());
            }
            BattleStatus::Draw(_) => {}
            BattleStatus::Ongoing => panic!("seed {seed} still ongoing"),
        }
    }
    assert!(decided > 0);
}
