//! Turn pipeline.
//!
//! [`BattleEngine`] is the authoritative reducer for [`BattleState`]. One call
//! to [`BattleEngine::process_turn`] advances the battle by exactly one turn
//! through a fixed, ordered list of phases:
//!
//! ```text
//! pre-checks → validate end state → desperation → finisher → escalation
//!   → tactical move → end-of-turn effects → mental state → cleanup → advance
//! ```
//!
//! Any phase may conclude the battle, which skips the remaining phases. The
//! pipeline works on a clone of the caller's snapshot and returns the new
//! snapshot only after the invariants have been verified, so callers never
//! observe a partially-updated state.

mod errors;
mod phases;

pub use errors::{PhaseError, TurnError, TurnPhase};

use crate::env::BattleEnv;
use crate::moves::MoveId;
use crate::state::BattleState;

use phases::{PHASES, PhaseContext};

/// External input for one turn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnInput {
    /// Move chosen by a human-controlled participant. `None` lets the AI decide.
    pub chosen_move: Option<MoveId>,
}

impl TurnInput {
    /// Lets the tactical AI choose.
    pub fn ai() -> Self {
        Self::default()
    }

    pub fn with_move(id: impl Into<MoveId>) -> Self {
        Self {
            chosen_move: Some(id.into()),
        }
    }
}

/// Battle engine bound to a read-only environment.
#[derive(Clone, Copy, Debug)]
pub struct BattleEngine<'a> {
    env: BattleEnv<'a>,
}

impl<'a> BattleEngine<'a> {
    pub fn new(env: BattleEnv<'a>) -> Self {
        Self { env }
    }

    pub fn env(&self) -> &BattleEnv<'a> {
        &self.env
    }

    /// Processes one turn. See [`process_turn`].
    pub fn process_turn(
        &self,
        state: &BattleState,
        input: &TurnInput,
    ) -> Result<BattleState, TurnError> {
        process_turn(state, &self.env, input)
    }
}

/// Processes one turn and returns the derived snapshot.
///
/// # Errors
///
/// - [`TurnError::BattleConcluded`] if `state` is already finished.
/// - Validation errors for an illegal externally chosen move.
/// - Internal/fatal errors when a phase or the post-turn invariant check
///   detects a bug.
///
/// `state` is left untouched in every case.
pub fn process_turn(
    state: &BattleState,
    env: &BattleEnv<'_>,
    input: &TurnInput,
) -> Result<BattleState, TurnError> {
    if state.is_finished() {
        return Err(TurnError::BattleConcluded);
    }

    let mut ctx = PhaseContext::new(state.clone(), env, input);

    for (phase, run) in PHASES {
        if ctx.state.is_finished() {
            tracing::debug!(phase = phase.as_str(), turn = state.turn, "battle concluded, skipping");
            break;
        }
        tracing::trace!(phase = phase.as_str(), turn = ctx.state.turn, "running phase");
        run(&mut ctx)?;
    }

    let next = ctx.into_state();
    next.check_invariants(state)
        .map_err(|error| TurnError::Invariant(PhaseError::new(TurnPhase::PostValidate, error)))?;

    Ok(next)
}
