//! Character templates.
//!
//! A [`CharacterTemplate`] is the roster form of a combatant: identity, base
//! stats and moveset. Instantiating it yields a fresh [`Character`].

use crate::config::BattleConfig;
use crate::moves::MoveId;
use crate::state::{BaseStats, Character, CharacterId};

use super::MoveOracle;

/// Roster entry describing a combatant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterTemplate {
    pub id: CharacterId,
    /// Lookup key used by the CLI and roster files (e.g. `"aang"`).
    pub key: String,
    pub name: String,
    pub stats: BaseStats,
    pub moves: Vec<MoveId>,
}

impl CharacterTemplate {
    pub fn new(
        id: CharacterId,
        key: impl Into<String>,
        name: impl Into<String>,
        stats: BaseStats,
        moves: Vec<MoveId>,
    ) -> Self {
        Self {
            id,
            key: key.into(),
            name: name.into(),
            stats,
            moves,
        }
    }

    /// Creates a battle-ready character.
    ///
    /// Uses-remaining counters are seeded from the catalog so capped moves
    /// start with their full allowance.
    pub fn instantiate(&self, catalog: &dyn MoveOracle, config: &BattleConfig) -> Character {
        Character::new(
            self.id,
            self.name.clone(),
            self.stats,
            self.moves.clone(),
            config,
        )
        .with_usage_from(catalog.moves_by_ids(&self.moves))
    }
}
