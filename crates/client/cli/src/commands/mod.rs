//! Subcommands.

mod roster;
mod run;

pub use roster::{Moves, Roster};
pub use run::Run;
