//! Content selection shared by every command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use battle_content::{
    ConfigLoader, MoveCatalogLoader, RosterLoader, TemplateNarrator, bundled,
};
use battle_core::{BattleConfig, CharacterTemplate, MovesSnapshot};
use clap::Args;

/// Data file overrides. Bundled content is used for anything not given.
#[derive(Args, Debug, Clone, Default)]
pub struct ContentArgs {
    /// Battle configuration (TOML)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Move catalog (RON)
    #[arg(long, value_name = "PATH")]
    pub moves: Option<PathBuf>,

    /// Character roster (RON)
    #[arg(long, value_name = "PATH")]
    pub roster: Option<PathBuf>,

    /// Narrative templates (RON)
    #[arg(long, value_name = "PATH")]
    pub narrative: Option<PathBuf>,
}

/// Everything a battle needs.
pub struct Content {
    pub config: BattleConfig,
    pub moves: MovesSnapshot,
    pub roster: Vec<CharacterTemplate>,
    pub narrator: TemplateNarrator,
}

impl Content {
    pub fn find(&self, key: &str) -> Result<&CharacterTemplate> {
        RosterLoader::find(&self.roster, key).with_context(|| {
            let known: Vec<&str> = self.roster.iter().map(|t| t.key.as_str()).collect();
            format!("known characters: {}", known.join(", "))
        })
    }
}

impl ContentArgs {
    pub fn load(&self) -> Result<Content> {
        let config = match &self.config {
            Some(path) => ConfigLoader::load(path)?,
            None => bundled::config()?,
        };
        let moves = match &self.moves {
            Some(path) => MoveCatalogLoader::load(path)?,
            None => bundled::moves()?,
        };
        let roster = match &self.roster {
            Some(path) => RosterLoader::load(path)?,
            None => RosterLoader::parse(bundled::ROSTER_RON)?,
        };
        RosterLoader::validate(&roster, &moves).context("Roster does not match move catalog")?;
        let narrator = match &self.narrative {
            Some(path) => TemplateNarrator::load(path)?,
            None => bundled::narrator()?,
        };

        tracing::debug!(
            moves = moves.len(),
            characters = roster.len(),
            templates = narrator.len(),
            "content loaded"
        );

        Ok(Content {
            config,
            moves,
            roster,
            narrator,
        })
    }
}
