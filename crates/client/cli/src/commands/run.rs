//! Battle command.

use std::io::{BufReader, Write};

use anyhow::{Context, Result, bail};
use battle_core::{Side, Terrain};
use clap::{Parser, ValueEnum};
use runtime::{
    AiMoveProvider, BattleRuntime, MoveProvider, RuntimeConfig, ScriptedMoveProvider, TurnEvent,
};

use crate::content::ContentArgs;
use crate::human::PromptProvider;
use crate::render;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum HumanSide {
    First,
    Second,
}

impl From<HumanSide> for Side {
    fn from(side: HumanSide) -> Self {
        match side {
            HumanSide::First => Side::First,
            HumanSide::Second => Side::Second,
        }
    }
}

/// Run a battle and print the report
#[derive(Parser, Debug)]
pub struct Run {
    /// Roster key of the side that acts first
    #[arg(long)]
    pub first: String,

    /// Roster key of the side that acts second
    #[arg(long)]
    pub second: String,

    /// Battle seed; the same seed replays the same battle
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Terrain (open, confined, elevated, aerial)
    #[arg(long, default_value = "open", value_parser = parse_terrain)]
    pub terrain: Terrain,

    /// Print the report as JSON
    #[arg(long, conflicts_with = "log")]
    pub json: bool,

    /// Print every log entry as the battle unfolds
    #[arg(long)]
    pub log: bool,

    /// Let a person choose the moves of one side
    #[arg(long, value_enum)]
    pub human: Option<HumanSide>,

    /// Comma-separated moves for the first side, AI afterwards
    #[arg(long, value_delimiter = ',', conflicts_with = "human")]
    pub script_first: Vec<String>,

    /// Comma-separated moves for the second side, AI afterwards
    #[arg(long, value_delimiter = ',', conflicts_with = "human")]
    pub script_second: Vec<String>,

    /// Override the turn ceiling
    #[arg(long)]
    pub max_turns: Option<u32>,

    #[command(flatten)]
    pub content: ContentArgs,
}

fn parse_terrain(value: &str) -> Result<Terrain, String> {
    value
        .parse()
        .map_err(|_| format!("unknown terrain '{value}'"))
}

impl Run {
    pub fn execute(self) -> Result<()> {
        let content = self.content.load()?;
        if self.first == self.second {
            bail!("a character cannot fight itself ('{}')", self.first);
        }
        let first = content.find(&self.first)?.clone();
        let second = content.find(&self.second)?.clone();

        let mut tuning = content.config.clone();
        if let Some(max_turns) = self.max_turns {
            if max_turns == 0 {
                bail!("--max-turns must be positive");
            }
            tuning = tuning.with_max_turns(max_turns);
        }

        let human = self.human.map(Side::from);
        let mut builder = BattleRuntime::builder()
            .config(RuntimeConfig {
                battle: tuning,
                ..RuntimeConfig::default()
            })
            .moves(content.moves)
            .narrator(content.narrator)
            .combatants(first, second)
            .terrain(self.terrain)
            .seed(self.seed)
            .provider_boxed(Side::First, provider_for(Side::First, human, &self.script_first))
            .provider_boxed(Side::Second, provider_for(Side::Second, human, &self.script_second));

        if self.log || human.is_some() {
            builder = builder.observer(|event: &TurnEvent| {
                let mut stdout = std::io::stdout().lock();
                for entry in &event.entries {
                    let _ = writeln!(stdout, "{}", render::entry(entry));
                }
            });
        }

        let mut battle = builder.build().context("Failed to start battle")?;

        while !battle.is_finished() {
            match battle.step() {
                Ok(_) => {}
                Err(error) if Some(battle.state().active) == human && error.is_retryable() => {
                    tracing::warn!("{error}");
                }
                Err(error) => return Err(error.into()),
            }
        }

        let report = battle.report();
        if self.json {
            println!("{}", report.to_json()?);
        } else {
            println!("{}", render::report(&report));
        }
        Ok(())
    }
}

fn provider_for(side: Side, human: Option<Side>, script: &[String]) -> Box<dyn MoveProvider> {
    if human == Some(side) {
        return Box::new(PromptProvider::new(BufReader::new(std::io::stdin())));
    }
    if script.is_empty() {
        Box::new(AiMoveProvider)
    } else {
        Box::new(ScriptedMoveProvider::new(script.iter().map(String::as_str)).then_ai())
    }
}
