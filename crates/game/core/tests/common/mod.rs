#![allow(dead_code)]

use battle_core::{
    BaseStats, BattleConfig, BattleEnv, BattleState, CharacterId, CharacterTemplate, EffectTarget,
    MoveCategory, MoveDefinition, MoveEffect, MoveId, MoveShape, MoveTag, MovesSnapshot, PcgRng,
    Position, StatusKind, Terrain, TurnInput, UnlockCondition, process_turn,
};

pub fn catalog() -> MovesSnapshot {
    MovesSnapshot::new(vec![
        MoveDefinition::fallback_strike(MoveId::new("basic_strike")),
        MoveDefinition::new("fire_blast", "Fire Blast", 8)
            .with_chi_cost(2)
            .with_cooldown(1)
            .with_crit(15, 150),
        MoveDefinition::new("fire_shield", "Fire Shield", 0)
            .with_category(MoveCategory::DefenseBuff)
            .with_chi_cost(1)
            .with_cooldown(2)
            .with_effect(MoveEffect::ApplyStatus {
                kind: StatusKind::Shield,
                target: EffectTarget::User,
                duration: 2,
                magnitude: 8,
            }),
        MoveDefinition::new("burning_palm", "Burning Palm", 5)
            .with_chi_cost(2)
            .with_cooldown(2)
            .with_effect(MoveEffect::ApplyStatus {
                kind: StatusKind::Burn,
                target: EffectTarget::Opponent,
                duration: 2,
                magnitude: 3,
            }),
        MoveDefinition::new("inferno", "Inferno", 12)
            .with_chi_cost(4)
            .with_cooldown(4)
            .with_shape(MoveShape::Charge { rate: 50 })
            .with_tag(MoveTag::HighDamage),
        MoveDefinition::new("lightning", "Lightning", 25)
            .with_chi_cost(3)
            .with_crit(20, 200)
            .with_finisher(UnlockCondition::TargetHealthBelow(25)),
        MoveDefinition::new("last_stand", "Last Stand", 14)
            .with_unlock_below_health(20)
            .with_max_uses(1)
            .with_tag(MoveTag::Desperation),
        MoveDefinition::new("sky_dive", "Sky Dive", 0)
            .with_category(MoveCategory::Evade)
            .with_chi_cost(1)
            .with_cooldown(2)
            .with_shape(MoveShape::Reposition {
                success_bonus_pct: 10,
            })
            .with_sets_position(Position::HighGround),
        MoveDefinition::new("earth_spike", "Earth Spike", 6)
            .with_chi_cost(2)
            .with_tag(MoveTag::Piercing),
        MoveDefinition::new("healing_water", "Healing Water", 0)
            .with_category(MoveCategory::DefenseBuff)
            .with_chi_cost(3)
            .with_cooldown(3)
            .with_max_uses(2)
            .with_tag(MoveTag::Healing)
            .with_effect(MoveEffect::Heal(12)),
        MoveDefinition::new("stun_kick", "Stun Kick", 4)
            .with_chi_cost(2)
            .with_cooldown(3)
            .with_effect(MoveEffect::Stun),
        MoveDefinition::new("meditate", "Meditate", 0)
            .with_category(MoveCategory::DefenseBuff)
            .with_sets_position(Position::Defensive),
    ])
    .expect("fixture catalog has unique ids")
}

pub fn ids(names: &[&str]) -> Vec<MoveId> {
    names.iter().map(|name| MoveId::new(*name)).collect()
}

pub fn template(id: u32, name: &str, stats: BaseStats, moves: &[&str]) -> CharacterTemplate {
    CharacterTemplate::new(
        CharacterId(id),
        name.to_lowercase(),
        name,
        stats,
        ids(moves),
    )
}

pub fn zuko() -> CharacterTemplate {
    template(
        1,
        "Zuko",
        BaseStats::new(14, 10, 10),
        &[
            "basic_strike",
            "fire_blast",
            "fire_shield",
            "burning_palm",
            "inferno",
            "lightning",
            "last_stand",
        ],
    )
}

pub fn aang() -> CharacterTemplate {
    template(
        2,
        "Aang",
        BaseStats::new(10, 8, 25),
        &[
            "basic_strike",
            "sky_dive",
            "earth_spike",
            "healing_water",
            "stun_kick",
            "fire_blast",
        ],
    )
}

pub fn duel(
    first: &CharacterTemplate,
    second: &CharacterTemplate,
    catalog: &MovesSnapshot,
    config: &BattleConfig,
    seed: u64,
) -> BattleState {
    BattleState::new(
        first.instantiate(catalog, config),
        second.instantiate(catalog, config),
        Terrain::Open,
        seed,
    )
}

/// Runs AI-vs-AI until the battle ends, checking bounds after every turn.
///
/// Returns the final state and the number of `process_turn` calls.
pub fn run_to_end(state: BattleState, catalog: &MovesSnapshot, config: &BattleConfig) -> (BattleState, u32) {
    let rng = PcgRng;
    let env = BattleEnv::new(catalog, &rng, config);
    let mut state = state;
    let mut calls = 0;

    while !state.is_finished() {
        state = process_turn(&state, &env, &TurnInput::ai()).expect("turn should resolve");
        calls += 1;
        for character in &state.participants {
            assert!(character.health <= BattleConfig::MAX_HEALTH);
            assert!(character.charge.progress <= BattleConfig::FULL_CHARGE);
            assert!(character.mental.stability <= 100 && character.mental.pride <= 100);
        }
        assert!(calls <= config.max_turns + 1, "battle did not terminate");
    }

    (state, calls)
}
