//! Plain-text rendering of log entries and reports.

use battle_core::LogEntry;
use runtime::BattleReport;

pub fn entry(entry: &LogEntry) -> String {
    let mut line = format!("[{:>2}] {:<10} ", entry.turn, entry.actor_name);
    if entry.result.is_empty() {
        line.push_str(&entry.action);
    } else {
        line.push_str(&entry.result);
    }
    if let Some(damage) = entry.damage.filter(|damage| *damage > 0) {
        line.push_str(&format!(" ({damage} dmg)"));
    }
    line
}

pub fn report(report: &BattleReport) -> String {
    let mut out = String::new();
    let headline = match (&report.winner, report.draw_reason) {
        (Some(winner), _) => format!("{winner} wins"),
        (None, Some(reason)) => format!("draw ({reason})"),
        (None, None) => "battle unfinished".to_string(),
    };
    out.push_str(&format!(
        "{headline} after {} turns on {} terrain (seed {})\n",
        report.turns, report.terrain, report.seed
    ));
    if report.sudden_death {
        out.push_str("sudden death was declared\n");
    }

    for combatant in &report.combatants {
        out.push_str(&format!(
            "  {:<10} hp {:>3}  chi {:>2}  moves {:>2}  desperation {}{}\n",
            combatant.name,
            combatant.health,
            combatant.chi,
            combatant.moves_used,
            combatant.desperation,
            if combatant.used_finisher { "  finisher used" } else { "" }
        ));
    }

    let analytics = &report.analytics;
    out.push_str(&format!(
        "  damage {}  crits {}  finishers {}  interrupts {}  escalations {}\n",
        analytics.total_damage,
        analytics.critical_hits,
        analytics.finishers,
        analytics.interrupts,
        report.escalations
    ));
    out.push_str(&format!("  digest {}", report.digest));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{LogKind, Side};

    #[test]
    fn entry_prefers_narrative_and_shows_damage() {
        let mut entry = LogEntry::system(3, LogKind::Move, "fire_blast");
        entry.actor = Some(Side::First);
        entry.actor_name = "Zuko".into();
        entry.result = "Zuko scorches Aang".into();
        entry.damage = Some(9);

        let line = super::entry(&entry);
        assert!(line.starts_with("[ 3] Zuko"));
        assert!(line.ends_with("Zuko scorches Aang (9 dmg)"));
    }

    #[test]
    fn entry_without_result_shows_action() {
        let entry = LogEntry::system(1, LogKind::Advisory, "stalemate");
        assert!(super::entry(&entry).ends_with("stalemate"));
    }
}
