//! Running battle analytics folded from the log.

use super::{LogEntry, LogKind, Outcome, Side};

/// Aggregate counters for a battle.
///
/// Counters are folded from log entries through a cursor, so refreshing twice
/// never counts an entry twice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleAnalytics {
    pub total_damage: u32,
    pub chi_spent: u32,
    pub critical_hits: u32,
    pub desperation_events: u32,
    pub escalation_events: u32,
    pub finishers: u32,
    pub interrupts: u32,
    pub reposition_successes: u32,
    pub reposition_failures: u32,
    pub moves_used: u32,
    /// Damage dealt to each side, indexed by [`Side::index`].
    pub damage_taken: [u32; 2],
    /// Number of log entries already folded.
    cursor: usize,
}

impl BattleAnalytics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds every log entry not yet seen.
    pub fn refresh(&mut self, log: &[LogEntry]) {
        let start = self.cursor.min(log.len());
        for entry in &log[start..] {
            self.fold(entry);
        }
        self.cursor = log.len();
    }

    fn fold(&mut self, entry: &LogEntry) {
        let damage = entry.damage_dealt();
        self.total_damage += damage;
        if let Some(target) = entry.target {
            self.damage_taken[target.index()] += damage;
        }
        self.chi_spent += entry.meta.chi_spent;
        if entry.meta.critical {
            self.critical_hits += 1;
        }
        if entry.is_move_use() && entry.outcome() != Some(Outcome::ChargeProgress) {
            self.moves_used += 1;
        }

        match entry.kind {
            LogKind::Desperation => self.desperation_events += 1,
            LogKind::Escalation => self.escalation_events += 1,
            LogKind::Finisher => self.finishers += 1,
            _ => {}
        }

        match entry.outcome() {
            Some(Outcome::Interrupted) => self.interrupts += 1,
            Some(Outcome::RepositionSucceeded) => self.reposition_successes += 1,
            Some(Outcome::RepositionFailed) => self.reposition_failures += 1,
            _ => {}
        }
    }

    pub fn damage_taken_by(&self, side: Side) -> u32 {
        self.damage_taken[side.index()]
    }

    /// Average damage per elapsed turn.
    pub fn average_damage(&self, turns: u32) -> u32 {
        self.total_damage / turns.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::EntryMeta;

    fn hit(turn: u32, damage: u32) -> LogEntry {
        LogEntry::by(turn, Side::First, "Aang", LogKind::Move, "Air Blast")
            .with_target(Side::Second)
            .with_damage(damage)
            .with_meta(EntryMeta {
                move_id: Some("air_blast".into()),
                outcome: Some(Outcome::Hit),
                chi_spent: 2,
                ..EntryMeta::default()
            })
    }

    #[test]
    fn refresh_is_idempotent() {
        let log = vec![hit(1, 7), hit(2, 5)];
        let mut analytics = BattleAnalytics::new();

        analytics.refresh(&log);
        analytics.refresh(&log);

        assert_eq!(analytics.total_damage, 12);
        assert_eq!(analytics.chi_spent, 4);
        assert_eq!(analytics.moves_used, 2);
        assert_eq!(analytics.damage_taken_by(Side::Second), 12);
    }

    #[test]
    fn refresh_only_folds_new_entries() {
        let mut log = vec![hit(1, 7)];
        let mut analytics = BattleAnalytics::new();
        analytics.refresh(&log);

        log.push(hit(2, 3));
        analytics.refresh(&log);

        assert_eq!(analytics.total_damage, 10);
    }
}
