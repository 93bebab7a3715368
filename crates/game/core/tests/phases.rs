mod common;

use battle_core::{
    BaseStats, BattleConfig, BattleEnv, BattlePhase, BattleState, CombatFlags, DesperationTier,
    LogKind, MovesSnapshot, PcgRng, Side, TurnInput, process_turn,
};

use battle_core::combat::damage::scale_pct;
use common::{catalog, duel, template};

/// Plays `moves[i]` on turn `i + 1`, starting from `state`.
fn play(
    state: BattleState,
    catalog: &MovesSnapshot,
    config: &BattleConfig,
    moves: &[&str],
) -> BattleState {
    let rng = PcgRng;
    let env = BattleEnv::new(catalog, &rng, config);
    moves.iter().fold(state, |state, id| {
        process_turn(&state, &env, &TurnInput::with_move(*id)).expect("scripted turn")
    })
}

fn entries_of(state: &BattleState, kind: LogKind) -> Vec<(u32, Option<Side>)> {
    state
        .log
        .iter()
        .filter(|entry| entry.kind == kind)
        .map(|entry| (entry.turn, entry.actor))
        .collect()
}

fn toph_and_katara(catalog: &MovesSnapshot, config: &BattleConfig) -> BattleState {
    let toph = template(1, "Toph", BaseStats::new(10, 10, 10), &["basic_strike", "earth_spike"]);
    let katara = template(2, "Katara", BaseStats::new(10, 10, 10), &["basic_strike", "meditate"]);
    duel(&toph, &katara, catalog, config, 11)
}

#[test]
fn repeated_moves_force_escalation_once_per_side() {
    let catalog = catalog();
    let config = BattleConfig::default();
    let script: Vec<&str> = (1..=12)
        .map(|turn| if turn % 2 == 1 { "earth_spike" } else { "meditate" })
        .collect();

    let state = play(toph_and_katara(&catalog, &config), &catalog, &config, &script[..6]);
    assert_eq!(state.escalation_cycles, 0);
    assert_eq!(state.phase, BattlePhase::Positioning);

    let state = play(state, &catalog, &config, &script[6..]);

    // Katara repeats from turn 8 on but stays inside the cooldown window until turn 12.
    assert_eq!(
        entries_of(&state, LogKind::Escalation),
        [(7, Some(Side::First)), (12, Some(Side::Second))]
    );
    assert_eq!(state.escalation_cycles, 2);
    assert_eq!(state.last_escalation_turn, Some(12));
    assert_eq!(state.phase, BattlePhase::Escalation);
    for side in Side::BOTH {
        assert!(state.character(side).flags.contains(CombatFlags::FORCED_ESCALATION));
    }
}

#[test]
fn escalation_multiplies_damage() {
    let catalog = catalog();
    let config = BattleConfig::default();
    let script: Vec<&str> = (1..=7)
        .map(|turn| if turn % 2 == 1 { "earth_spike" } else { "meditate" })
        .collect();

    let state = play(toph_and_katara(&catalog, &config), &catalog, &config, &script);
    let spike = |turn: u32| {
        state
            .log
            .iter()
            .find(|entry| entry.turn == turn && entry.is_move_use())
            .expect("earth spike entry")
    };

    let before = spike(5);
    let after = spike(7);
    assert!(!before.meta.escalated);
    assert!(after.meta.escalated);
    let base = before.damage.unwrap_or(0);
    assert_eq!(
        after.damage,
        Some(scale_pct(base, config.escalation.damage_factor_pct))
    );
}

#[test]
fn low_average_damage_forces_escalation() {
    let catalog = catalog();
    let mut config = BattleConfig::default();
    config.escalation.repetition_window = 0;
    let script = ["meditate"; 16];

    let state = play(toph_and_katara_meditating(&catalog, &config), &catalog, &config, &script[..10]);
    assert!(entries_of(&state, LogKind::Escalation).is_empty());
    assert!(!state.sudden_death);

    let state = play(state, &catalog, &config, &script[10..]);
    assert_eq!(
        entries_of(&state, LogKind::Escalation),
        [(11, Some(Side::First)), (16, Some(Side::Second))]
    );
    assert!(state.sudden_death);
}

fn toph_and_katara_meditating(catalog: &MovesSnapshot, config: &BattleConfig) -> BattleState {
    let toph = template(1, "Toph", BaseStats::new(10, 10, 10), &["basic_strike", "meditate"]);
    let katara = template(2, "Katara", BaseStats::new(10, 10, 10), &["basic_strike", "meditate"]);
    duel(&toph, &katara, catalog, config, 12)
}

#[test]
fn desperation_is_logged_only_when_the_tier_rises() {
    let catalog = catalog();
    let config = BattleConfig::default();
    let mut state = toph_and_katara_meditating(&catalog, &config);
    state.character_mut(Side::First).health = 30;

    let mut state = play(state, &catalog, &config, &["meditate"]);
    assert_eq!(entries_of(&state, LogKind::Desperation), [(1, Some(Side::First))]);
    assert_eq!(state.character(Side::First).desperation, DesperationTier::Desperate);
    assert_eq!(state.phase, BattlePhase::Positioning);

    // Healing does not lower the tier, and the same tier is not logged again.
    state.character_mut(Side::First).health = 90;
    let mut state = play(state, &catalog, &config, &["meditate", "meditate", "meditate"]);
    assert_eq!(entries_of(&state, LogKind::Desperation).len(), 1);
    assert_eq!(state.character(Side::First).desperation, DesperationTier::Desperate);

    state.character_mut(Side::First).health = 15;
    let state = play(state, &catalog, &config, &["meditate"]);
    let rises: Vec<_> = state
        .log
        .iter()
        .filter(|entry| entry.kind == LogKind::Desperation)
        .map(|entry| (entry.turn, entry.action.as_str()))
        .collect();
    assert_eq!(rises, [(1, "desperate"), (5, "extreme")]);
    assert_eq!(state.character(Side::First).desperation, DesperationTier::Extreme);
    assert_eq!(state.phase, BattlePhase::Climax);
}

#[test]
fn basic_move_loop_forces_climax() {
    let catalog = catalog();
    let config = BattleConfig::default();
    let state = toph_and_katara_meditating(&catalog, &config);

    let state = play(state, &catalog, &config, &["basic_strike"; 5]);
    assert_ne!(state.phase, BattlePhase::Climax);
    assert!(entries_of(&state, LogKind::Advisory).is_empty());

    let state = play(state, &catalog, &config, &["basic_strike"; 3]);
    assert_eq!(state.phase, BattlePhase::Climax);
    let advisories: Vec<_> = state
        .log
        .iter()
        .filter(|entry| entry.kind == LogKind::Advisory)
        .map(|entry| (entry.turn, entry.actor, entry.action.as_str()))
        .collect();
    assert_eq!(advisories, [(6, None, "basic_move_loop")]);
}
