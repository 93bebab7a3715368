//! Battle configuration loader.

use std::path::Path;

use anyhow::Context;
use battle_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for battle configuration from TOML files.
///
/// Every table and key is optional; missing values keep their defaults.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a [`BattleConfig`] from a TOML file.
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Parse a [`BattleConfig`] from TOML text.
    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        let config: BattleConfig =
            toml::from_str(content).context("Failed to parse battle config TOML")?;

        anyhow::ensure!(config.max_turns > 0, "max_turns must be positive");
        anyhow::ensure!(
            config.combat.defense_divisor > 0 && config.combat.power_divisor > 0,
            "combat divisors must be positive"
        );
        anyhow::ensure!(
            config.reposition.min_success_pct <= config.reposition.max_success_pct,
            "reposition min_success_pct exceeds max_success_pct"
        );

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        assert_eq!(ConfigLoader::parse("").unwrap(), BattleConfig::default());
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let config = ConfigLoader::parse(
            r#"
            max_turns = 30

            [charge]
            amplification_pct = 250
            "#,
        )
        .unwrap();

        assert_eq!(config.max_turns, 30);
        assert_eq!(config.charge.amplification_pct, 250);
        assert_eq!(config.charge.interrupt_chance_pct, 25);
        assert_eq!(config.escalation, BattleConfig::default().escalation);
    }

    #[test]
    fn zero_turn_ceiling_is_rejected() {
        assert!(ConfigLoader::parse("max_turns = 0").is_err());
    }
}
