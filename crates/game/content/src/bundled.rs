//! Content compiled into the crate.
//!
//! Used when no data directory is supplied.

use battle_core::{BattleConfig, CharacterTemplate, MovesSnapshot};

use crate::loaders::{ConfigLoader, LoadResult, MoveCatalogLoader, RosterLoader};
use crate::narrator::TemplateNarrator;

pub const MOVES_RON: &str = include_str!("../data/moves.ron");
pub const ROSTER_RON: &str = include_str!("../data/roster.ron");
pub const NARRATIVE_RON: &str = include_str!("../data/narrative.ron");
pub const BATTLE_TOML: &str = include_str!("../data/battle.toml");

pub fn config() -> LoadResult<BattleConfig> {
    ConfigLoader::parse(BATTLE_TOML)
}

pub fn moves() -> LoadResult<MovesSnapshot> {
    MoveCatalogLoader::parse(MOVES_RON)
}

/// Bundled roster, validated against `catalog`.
pub fn roster(catalog: &MovesSnapshot) -> LoadResult<Vec<CharacterTemplate>> {
    let roster = RosterLoader::parse(ROSTER_RON)?;
    RosterLoader::validate(&roster, catalog)?;
    Ok(roster)
}

pub fn narrator() -> LoadResult<TemplateNarrator> {
    TemplateNarrator::parse(NARRATIVE_RON)
}
