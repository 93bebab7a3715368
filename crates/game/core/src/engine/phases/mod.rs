//! Phase handlers of the turn pipeline.
//!
//! Every handler shares the signature `fn(&mut PhaseContext) -> Result<(), TurnError>`
//! and is listed once, in execution order, in [`PHASES`].

mod cleanup;
mod desperation;
mod effects;
mod escalation;
mod finisher;
mod mental;
mod tactical;
mod validate;

use crate::env::{BattleEnv, NarrativeRequest};
use crate::state::{BattleState, LogEntry, LogKind, Outcome, Side};

use super::{TurnError, TurnInput, TurnPhase};

/// Handler signature shared by all phases.
pub(super) type PhaseFn = fn(&mut PhaseContext<'_, '_>) -> Result<(), TurnError>;

/// Pipeline phases in execution order.
pub(super) const PHASES: [(TurnPhase, PhaseFn); 10] = [
    (TurnPhase::PreChecks, validate::pre_checks),
    (TurnPhase::ValidateEndState, validate::validate_end_state),
    (TurnPhase::Desperation, desperation::run),
    (TurnPhase::Finisher, finisher::run),
    (TurnPhase::Escalation, escalation::run),
    (TurnPhase::TacticalMove, tactical::run),
    (TurnPhase::EndOfTurn, effects::run),
    (TurnPhase::MentalState, mental::run),
    (TurnPhase::Cleanup, cleanup::run),
    (TurnPhase::Advance, cleanup::advance),
];

/// Working state threaded through the phases of one turn.
pub(super) struct PhaseContext<'e, 'a> {
    /// Working copy; the caller's snapshot is never touched.
    pub state: BattleState,
    pub env: &'e BattleEnv<'a>,
    pub input: &'e TurnInput,
    /// Log length when the turn started.
    pub log_start: usize,
    /// The finisher phase consumed this turn's action.
    pub finisher_used: bool,
}

impl<'e, 'a> PhaseContext<'e, 'a> {
    pub fn new(state: BattleState, env: &'e BattleEnv<'a>, input: &'e TurnInput) -> Self {
        let log_start = state.log.len();
        Self {
            state,
            env,
            input,
            log_start,
            finisher_used: false,
        }
    }

    pub fn into_state(self) -> BattleState {
        self.state
    }

    /// Entries appended during this turn.
    pub fn turn_entries(&self) -> &[LogEntry] {
        self.state.entries_since(self.log_start)
    }

    /// Concludes the battle if either combatant is down. Returns true if concluded.
    pub fn check_knockout(&mut self) -> bool {
        match self.state.knockout() {
            Some(status) => {
                self.state.conclude(status);
                true
            }
            None => false,
        }
    }

    /// Appends a state-change entry attributed to `side`.
    pub fn log_state_change(&mut self, side: Side, kind: LogKind, action: &str, detail: &str) {
        let character = self.state.character(side);
        let result = self.env.narrate(&NarrativeRequest {
            actor_name: &character.name,
            target_name: None,
            context: detail,
            outcome: Outcome::StateChange,
            move_name: None,
            damage: None,
        });
        let entry = LogEntry::by(self.state.turn, side, character.name.clone(), kind, action)
            .with_result(result)
            .with_outcome(Outcome::StateChange);
        self.state.push_log(entry);
    }

    /// Appends a system advisory entry.
    pub fn log_advisory(&mut self, action: &str, result: String) {
        tracing::warn!(turn = self.state.turn, advisory = action, "{result}");
        let entry = LogEntry::system(self.state.turn, LogKind::Advisory, action)
            .with_result(result)
            .with_outcome(Outcome::StateChange);
        self.state.push_log(entry);
    }
}
