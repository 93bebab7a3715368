//! Abstraction for sourcing each side's move.
//!
//! Runtime users plug in [`MoveProvider`] implementations so a battle can run
//! with human input, scripted fixtures, or the built-in tactical AI.
use battle_core::{BattleEnv, BattleState, Side, TurnInput};

use super::errors::Result;

/// Trait for providing a side's input for the current turn.
///
/// Different implementations can handle:
/// - Human input (from a terminal or UI)
/// - The built-in tactical AI
/// - Scripted/replayed moves
/// - Testing fixtures
pub trait MoveProvider: Send {
    /// Provide the input for `side`, which is the active side of `state`.
    fn provide_move(
        &mut self,
        side: Side,
        state: &BattleState,
        env: &BattleEnv<'_>,
    ) -> Result<TurnInput>;

    /// Short label used in logs and reports.
    fn name(&self) -> &'static str;
}
