//! Traits describing read-only battle data.
//!
//! Oracles expose the move catalog, randomness and optional narration. The
//! [`BattleEnv`] aggregate bundles them with the battle configuration so the
//! engine can access everything it needs without hard coupling to concrete
//! implementations.
mod actors;
mod error;
mod moves;
mod narrative;
mod rng;

pub use actors::CharacterTemplate;
pub use error::OracleError;
pub use moves::{MoveOracle, MovesSnapshot};
pub use narrative::{NarrativeOracle, NarrativeRequest, TemplateNarrative};
pub use rng::{PcgRng, RngOracle, RollContext, compute_seed};

use crate::config::BattleConfig;
use crate::moves::{MoveDefinition, MoveId};
use crate::state::{BattleState, Side};

/// Aggregates read-only collaborators required by the turn pipeline.
#[derive(Clone, Copy)]
pub struct BattleEnv<'a> {
    pub moves: &'a dyn MoveOracle,
    pub rng: &'a dyn RngOracle,
    pub narrative: Option<&'a dyn NarrativeOracle>,
    pub config: &'a BattleConfig,
}

impl<'a> BattleEnv<'a> {
    pub fn new(moves: &'a dyn MoveOracle, rng: &'a dyn RngOracle, config: &'a BattleConfig) -> Self {
        Self {
            moves,
            rng,
            narrative: None,
            config,
        }
    }

    #[must_use]
    pub fn with_narrative(mut self, narrative: &'a dyn NarrativeOracle) -> Self {
        self.narrative = Some(narrative);
        self
    }

    /// Percentage roll for `side` on the current turn of `state`.
    pub fn roll(&self, state: &BattleState, side: Side, context: RollContext) -> u32 {
        self.rng
            .roll_percent(compute_seed(state.seed, state.turn, side, context))
    }

    /// The configured basic move, or the built-in fallback strike.
    pub fn basic_move(&self) -> MoveDefinition {
        self.moves
            .move_by_id(&self.config.basic_move)
            .cloned()
            .unwrap_or_else(|| MoveDefinition::fallback_strike(self.config.basic_move.clone()))
    }

    pub fn is_basic(&self, id: &MoveId) -> bool {
        id == &self.config.basic_move
            || self
                .moves
                .move_by_id(id)
                .is_some_and(MoveDefinition::is_basic)
    }

    /// Narration for `request`, falling back to the template.
    pub fn narrate(&self, request: &NarrativeRequest<'_>) -> String {
        TemplateNarrative::narrate_or_fallback(self.narrative, request)
    }
}

impl core::fmt::Debug for BattleEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BattleEnv")
            .field("moves", &self.moves.all_moves().len())
            .field("narrative", &self.narrative.is_some())
            .field("config", self.config)
            .finish()
    }
}
