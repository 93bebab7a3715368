//! Move catalog loader.

use std::path::Path;

use anyhow::Context;
use battle_core::{MoveDefinition, MovesSnapshot};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Move catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveCatalog {
    pub moves: Vec<MoveDefinition>,
}

/// Loader for the move catalog from RON files.
pub struct MoveCatalogLoader;

impl MoveCatalogLoader {
    /// Load a move catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<MovesSnapshot> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Invalid move catalog {}", path.display()))
    }

    /// Parse a move catalog from RON text.
    ///
    /// Rejects duplicate ids and finishers without damage.
    pub fn parse(content: &str) -> LoadResult<MovesSnapshot> {
        let catalog: MoveCatalog =
            ron::from_str(content).context("Failed to parse move catalog RON")?;

        for definition in &catalog.moves {
            anyhow::ensure!(
                !definition.id.as_str().is_empty(),
                "move '{}' has an empty id",
                definition.name
            );
            anyhow::ensure!(
                !definition.is_finisher() || definition.is_damaging(),
                "finisher '{}' deals no damage",
                definition.id
            );
        }

        let snapshot = MovesSnapshot::new(catalog.moves)?;
        tracing::debug!(moves = snapshot.len(), "move catalog loaded");
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{MoveId, MoveOracle, MoveShape, UnlockCondition};

    #[test]
    fn parses_minimal_and_full_entries() {
        let snapshot = MoveCatalogLoader::parse(
            r#"(
                moves: [
                    (id: "basic_strike", name: "Basic Strike", base_damage: 1, tags: [Basic]),
                    (
                        id: "lightning",
                        name: "Lightning",
                        base_damage: 25,
                        chi_cost: 3,
                        crit: Some((chance_pct: 20, multiplier_pct: 200)),
                        finisher: Some(TargetHealthBelow(25)),
                    ),
                    (id: "inferno", name: "Inferno", base_damage: 12, shape: Charge(rate: 50)),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(snapshot.len(), 3);
        let lightning = snapshot.move_by_id(&MoveId::new("lightning")).unwrap();
        assert_eq!(lightning.finisher, Some(UnlockCondition::TargetHealthBelow(25)));
        let inferno = snapshot.move_by_id(&MoveId::new("inferno")).unwrap();
        assert_eq!(inferno.shape, MoveShape::Charge { rate: 50 });
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let error = MoveCatalogLoader::parse(
            r#"(moves: [(id: "a", name: "A", base_damage: 1), (id: "a", name: "B", base_damage: 2)])"#,
        )
        .unwrap_err();
        assert!(error.to_string().contains("duplicate"));
    }

    #[test]
    fn harmless_finishers_are_rejected() {
        assert!(
            MoveCatalogLoader::parse(
                r#"(moves: [(id: "dud", name: "Dud", finisher: Some(Escalated))])"#,
            )
            .is_err()
        );
    }
}
