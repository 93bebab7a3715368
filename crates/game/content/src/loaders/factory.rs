//! Content factory for loading a complete content set from a data directory.

use std::path::{Path, PathBuf};

use battle_core::{BattleConfig, CharacterTemplate, MovesSnapshot};

use crate::loaders::{ConfigLoader, LoadResult, MoveCatalogLoader, RosterLoader};
use crate::narrator::TemplateNarrator;

/// Content factory that loads duel content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── battle.toml
/// ├── moves.ron
/// ├── roster.ron
/// └── narrative.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load battle configuration from `battle.toml`.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        ConfigLoader::load(&self.data_dir.join("battle.toml"))
    }

    /// Load the move catalog from `moves.ron`.
    pub fn load_moves(&self) -> LoadResult<MovesSnapshot> {
        MoveCatalogLoader::load(&self.data_dir.join("moves.ron"))
    }

    /// Load the roster from `roster.ron`, validated against `catalog`.
    pub fn load_roster(&self, catalog: &MovesSnapshot) -> LoadResult<Vec<CharacterTemplate>> {
        let roster = RosterLoader::load(&self.data_dir.join("roster.ron"))?;
        RosterLoader::validate(&roster, catalog)?;
        Ok(roster)
    }

    /// Load narrative templates from `narrative.ron`.
    pub fn load_narrator(&self) -> LoadResult<TemplateNarrator> {
        TemplateNarrator::load(&self.data_dir.join("narrative.ron"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }
}
