//! Roster inspection commands.

use anyhow::Result;
use battle_core::{CooldownTracker, MoveOracle};
use clap::Parser;

use crate::content::ContentArgs;

/// List the characters of the roster
#[derive(Parser, Debug)]
pub struct Roster {
    #[command(flatten)]
    pub content: ContentArgs,
}

impl Roster {
    pub fn execute(self) -> Result<()> {
        let content = self.content.load()?;

        println!("{:<10} {:<12} {:>5} {:>7} {:>7}  MOVES", "KEY", "NAME", "POWER", "DEFENSE", "AGILITY");
        for template in &content.roster {
            println!(
                "{:<10} {:<12} {:>5} {:>7} {:>7}  {}",
                template.key,
                template.name,
                template.stats.power,
                template.stats.defense,
                template.stats.agility,
                template.moves.len()
            );
        }
        Ok(())
    }
}

/// Show a character's moveset
#[derive(Parser, Debug)]
pub struct Moves {
    /// Roster key of the character
    pub character: String,

    #[command(flatten)]
    pub content: ContentArgs,
}

impl Moves {
    pub fn execute(self) -> Result<()> {
        let content = self.content.load()?;
        let template = content.find(&self.character)?;
        let character = template.instantiate(&content.moves, &content.config);

        println!("{} ({})", template.name, template.key);
        for definition in content.moves.moves_by_ids(&template.moves) {
            let mut notes = Vec::new();
            if definition.is_finisher() {
                notes.push("finisher".to_string());
            }
            if let Some(threshold) = definition.unlock_below_health {
                notes.push(format!("health <= {threshold}%"));
            }
            if let Some(uses) = CooldownTracker::uses_remaining(&character, definition) {
                notes.push(format!("{uses} uses"));
            }
            for tag in &definition.tags {
                notes.push(<&'static str>::from(*tag).to_string());
            }

            println!(
                "  {:<14} dmg {:>3}  chi {:>2}  cd {:>2}  {}",
                definition.id.as_str(),
                definition.base_damage,
                definition.chi_cost,
                definition.cooldown,
                notes.join(", ")
            );
        }
        Ok(())
    }
}
