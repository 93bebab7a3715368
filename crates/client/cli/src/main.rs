//! Duel command-line entry point.
//!
//! Run with: `duel run --first zuko --second azula`

mod commands;
mod content;
mod human;
mod render;

use anyhow::Result;
use clap::Parser;
use commands::{Moves, Roster, Run};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Deterministic two-combatant duels
#[derive(Parser)]
#[command(name = "duel")]
#[command(about = "Run deterministic turn-based duels", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Run a battle and print the report
    Run(Run),

    /// List the characters of the roster
    Roster(Roster),

    /// Show a character's moveset
    Moves(Moves),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for RUST_LOG and data paths)
    let _ = dotenvy::dotenv();

    setup_logging();

    let cli = Cli::parse();

    match cli.command {
        Command::Run(cmd) => cmd.execute(),
        Command::Roster(cmd) => cmd.execute(),
        Command::Moves(cmd) => cmd.execute(),
    }
}

/// Logs go to stderr so reports on stdout stay machine-readable.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}
