use std::fs;

use battle_content::{ContentFactory, RosterLoader, bundled};
use battle_core::{
    BattleConfig, BattleEnv, BattleState, MoveId, MoveOracle, PcgRng, Terrain, TurnInput,
    process_turn,
};

#[test]
fn bundled_content_loads_and_cross_checks() {
    let config = bundled::config().unwrap();
    let moves = bundled::moves().unwrap();
    let roster = bundled::roster(&moves).unwrap();
    let narrator = bundled::narrator().unwrap();

    assert_eq!(config, BattleConfig::default());
    assert!(moves.move_by_id(&config.basic_move).is_some());
    assert!(roster.len() >= 2);
    assert!(!narrator.is_empty());
    for template in &roster {
        assert!(template.moves.contains(&MoveId::new("basic_strike")), "{}", template.key);
    }
}

#[test]
fn bundled_duel_runs_to_completion() {
    let config = bundled::config().unwrap();
    let moves = bundled::moves().unwrap();
    let roster = bundled::roster(&moves).unwrap();
    let narrator = bundled::narrator().unwrap();
    let rng = PcgRng;
    let env = BattleEnv::new(&moves, &rng, &config).with_narrative(&narrator);

    let zuko = RosterLoader::find(&roster, "zuko").unwrap();
    let azula = RosterLoader::find(&roster, "azula").unwrap();
    let mut state = BattleState::new(
        zuko.instantiate(&moves, &config),
        azula.instantiate(&moves, &config),
        Terrain::Open,
        42,
    );

    let mut turns = 0;
    while !state.is_finished() {
        state = process_turn(&state, &env, &TurnInput::ai()).unwrap();
        turns += 1;
    }

    assert!(turns <= config.max_turns);
    assert!(state.log.iter().all(|entry| !entry.result.is_empty()));
}

#[test]
fn factory_reads_a_data_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("moves.ron"), bundled::MOVES_RON).unwrap();
    fs::write(dir.path().join("roster.ron"), bundled::ROSTER_RON).unwrap();
    fs::write(dir.path().join("narrative.ron"), bundled::NARRATIVE_RON).unwrap();
    fs::write(dir.path().join("battle.toml"), "max_turns = 20\n").unwrap();

    let factory = ContentFactory::new(dir.path());
    let config = factory.load_config().unwrap();
    let moves = factory.load_moves().unwrap();
    let roster = factory.load_roster(&moves).unwrap();
    factory.load_narrator().unwrap();

    assert_eq!(config.max_turns, 20);
    assert_eq!(moves, bundled::moves().unwrap());
    assert_eq!(roster.len(), bundled::roster(&moves).unwrap().len());
}

#[test]
fn missing_files_report_their_path() {
    let dir = tempfile::tempdir().unwrap();
    let error = ContentFactory::new(dir.path()).load_moves().unwrap_err();
    assert!(format!("{error:#}").contains("moves.ron"));
}

#[test]
fn roster_with_unknown_move_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("moves.ron"), bundled::MOVES_RON).unwrap();
    fs::write(
        dir.path().join("roster.ron"),
        r#"(characters: [(id: 9, key: "jet", name: "Jet", stats: (power: 10, defense: 8, agility: 15), moves: ["hook_swords"])])"#,
    )
    .unwrap();

    let factory = ContentFactory::new(dir.path());
    let moves = factory.load_moves().unwrap();
    let error = factory.load_roster(&moves).unwrap_err();
    assert!(error.to_string().contains("hook_swords"));
}
