//! Character roster loader.

use std::path::Path;

use anyhow::Context;
use battle_core::{CharacterTemplate, MoveOracle};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Roster structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roster {
    pub characters: Vec<CharacterTemplate>,
}

/// Loader for character rosters from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load a roster from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<CharacterTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Invalid roster {}", path.display()))
    }

    /// Parse a roster from RON text. Keys and ids must be unique.
    pub fn parse(content: &str) -> LoadResult<Vec<CharacterTemplate>> {
        let roster: Roster = ron::from_str(content).context("Failed to parse roster RON")?;

        for (index, template) in roster.characters.iter().enumerate() {
            let earlier = &roster.characters[..index];
            anyhow::ensure!(
                earlier.iter().all(|other| other.key != template.key),
                "duplicate roster key '{}'",
                template.key
            );
            anyhow::ensure!(
                earlier.iter().all(|other| other.id != template.id),
                "duplicate roster id {} ('{}')",
                template.id.0,
                template.key
            );
            anyhow::ensure!(
                !template.moves.is_empty(),
                "character '{}' has an empty moveset",
                template.key
            );
        }

        Ok(roster.characters)
    }

    /// Checks that every moveset entry exists in `catalog`.
    pub fn validate(roster: &[CharacterTemplate], catalog: &dyn MoveOracle) -> LoadResult<()> {
        for template in roster {
            let missing: Vec<&str> = template
                .moves
                .iter()
                .filter(|id| catalog.move_by_id(id).is_none())
                .map(|id| id.as_str())
                .collect();
            anyhow::ensure!(
                missing.is_empty(),
                "character '{}' references unknown moves: {}",
                template.key,
                missing.join(", ")
            );
        }
        Ok(())
    }

    /// Finds a template by key.
    pub fn find<'a>(roster: &'a [CharacterTemplate], key: &str) -> LoadResult<&'a CharacterTemplate> {
        roster
            .iter()
            .find(|template| template.key == key)
            .ok_or_else(|| battle_core::OracleError::CharacterNotFound(key.to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{MoveDefinition, MoveId, MovesSnapshot};

    const ROSTER: &str = r#"(
        characters: [
            (
                id: 1,
                key: "zuko",
                name: "Zuko",
                stats: (power: 14, defense: 10, agility: 10),
                moves: ["basic_strike", "fire_blast"],
            ),
        ],
    )"#;

    #[test]
    fn parses_and_finds_by_key() {
        let roster = RosterLoader::parse(ROSTER).unwrap();
        let zuko = RosterLoader::find(&roster, "zuko").unwrap();
        assert_eq!(zuko.stats.power, 14);
        assert!(RosterLoader::find(&roster, "azula").is_err());
    }

    #[test]
    fn unknown_moves_fail_validation() {
        let roster = RosterLoader::parse(ROSTER).unwrap();
        let catalog =
            MovesSnapshot::new(vec![MoveDefinition::fallback_strike(MoveId::new("basic_strike"))])
                .unwrap();

        let error = RosterLoader::validate(&roster, &catalog).unwrap_err();
        assert!(error.to_string().contains("fire_blast"));
    }
}
