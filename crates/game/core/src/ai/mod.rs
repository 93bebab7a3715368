//! Move selection for AI-controlled combatants.
//!
//! Selection runs in two layers:
//!
//! 1. **Tactical priority** ([`tactics`]): what does the combatant want to do
//!    this turn (attack, defend, pierce, finish, heal, recover, gamble)?
//! 2. **Move scoring** ([`scoring`]): which legal move serves that priority best?
//!
//! [`MoveSelector`] ties both layers to a [`BattleState`](crate::BattleState),
//! filters legal moves and falls back to the basic move when nothing is legal.
//!
//! All functions here are pure: given the same state they pick the same move.
mod scoring;
mod selector;
mod tactics;

pub use scoring::{MoveScore, MoveScorer};
pub use selector::{MoveSelection, MoveSelector};
pub use tactics::{LastMoveClass, TacticalDecision, TacticalPriority, TacticalPriorityEngine};
