use std::collections::VecDeque;

use battle_core::{BattleEnv, BattleState, MoveId, MoveSelector, Position, Side, TurnInput};

use crate::api::{MoveProvider, Result, RuntimeError};

/// Replays a fixed list of moves.
///
/// Turns the engine plays on the side's behalf, such as a ready finisher,
/// leave the queue untouched.
///
/// Once the script runs out the provider either fails with
/// [`RuntimeError::ScriptExhausted`] or, with [`Self::then_ai`], hands over
/// to the tactical AI.
#[derive(Clone, Debug, Default)]
pub struct ScriptedMoveProvider {
    moves: VecDeque<MoveId>,
    ai_fallback: bool,
}

impl ScriptedMoveProvider {
    pub fn new<I, M>(moves: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<MoveId>,
    {
        Self {
            moves: moves.into_iter().map(Into::into).collect(),
            ai_fallback: false,
        }
    }

    /// Lets the AI decide once the script is exhausted.
    #[must_use]
    pub fn then_ai(mut self) -> Self {
        self.ai_fallback = true;
        self
    }

    /// Moves still queued.
    pub fn remaining(&self) -> usize {
        self.moves.len()
    }
}

impl MoveProvider for ScriptedMoveProvider {
    fn provide_move(
        &mut self,
        side: Side,
        state: &BattleState,
        env: &BattleEnv<'_>,
    ) -> Result<TurnInput> {
        // the queued move is kept for the next turn the side actually chooses
        let me = state.character(side);
        if me.charge.is_charging()
            || me.position == Position::Stunned
            || MoveSelector::ready_finisher(state, side, env).is_some()
        {
            return Ok(TurnInput::ai());
        }

        match self.moves.pop_front() {
            Some(id) => Ok(TurnInput::with_move(id)),
            None if self.ai_fallback => Ok(TurnInput::ai()),
            None => Err(RuntimeError::ScriptExhausted {
                side,
                turn: state.turn,
            }),
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}
