//! Per-turn notifications.

use battle_core::{BattleState, LogEntry, Side, TurnInput};

/// Summary of one processed turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnEvent {
    /// Turn number that was processed.
    pub turn: u32,
    pub side: Side,
    pub input: TurnInput,
    /// Log entries appended during the turn.
    pub entries: Vec<LogEntry>,
    pub finished: bool,
}

impl TurnEvent {
    pub(crate) fn between(before: &BattleState, after: &BattleState, input: TurnInput) -> Self {
        Self {
            turn: before.turn,
            side: before.active,
            input,
            entries: after.entries_since(before.log.len()).to_vec(),
            finished: after.is_finished(),
        }
    }

    /// Total damage dealt during the turn.
    pub fn damage(&self) -> u32 {
        self.entries.iter().map(LogEntry::damage_dealt).sum()
    }
}

/// Receives every processed turn.
pub trait TurnObserver: Send {
    fn on_turn(&mut self, event: &TurnEvent);
}

impl<F> TurnObserver for F
where
    F: FnMut(&TurnEvent) + Send,
{
    fn on_turn(&mut self, event: &TurnEvent) {
        self(event)
    }
}
