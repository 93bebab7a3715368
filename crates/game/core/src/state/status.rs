//! Status effect system for combatants.
//!
//! Status effects are temporary conditions that deal damage over time or
//! modify a combatant's offense and defense.
//!
//! # Turn-based Duration
//!
//! Effects store the number of end-of-turn ticks they have left. Each tick
//! decrements `remaining`; effects are removed once it reaches zero.

use arrayvec::ArrayVec;

use crate::config::BattleConfig;

/// Active status effects on a combatant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { BattleConfig::MAX_STATUS_EFFECTS }>,
}

/// A single status effect with remaining duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusKind,
    /// End-of-turn ticks left before the effect expires.
    pub remaining: u32,
    /// Damage per tick (burn), defense bonus (shield) or percent (empower/weaken).
    pub magnitude: u32,
}

/// Types of status effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum StatusKind {
    /// Damage over time.
    Burn,
    /// Defense bonus.
    Shield,
    /// Outgoing damage increased by `magnitude` percent.
    Empower,
    /// Outgoing damage reduced by `magnitude` percent.
    Weaken,
}

/// Result of ticking one status effect at end of turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusTick {
    pub kind: StatusKind,
    /// Damage dealt to the holder by this tick.
    pub damage: u32,
    pub expired: bool,
}

impl StatusEffects {
    /// Creates an empty status effect set.
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Checks if a specific status effect is active.
    pub fn has(&self, kind: StatusKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind && e.remaining > 0)
    }

    /// Magnitude of an active effect, or 0 if absent.
    pub fn magnitude(&self, kind: StatusKind) -> u32 {
        self.effects
            .iter()
            .find(|e| e.kind == kind && e.remaining > 0)
            .map(|e| e.magnitude)
            .unwrap_or(0)
    }

    /// Adds a status effect.
    ///
    /// If the effect already exists, refreshes to the longer duration and keeps
    /// the larger magnitude. New effects are dropped when the list is full.
    pub fn add(&mut self, kind: StatusKind, duration: u32, magnitude: u32) {
        if duration == 0 {
            return;
        }

        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == kind) {
            existing.remaining = existing.remaining.max(duration);
            existing.magnitude = existing.magnitude.max(magnitude);
            return;
        }

        if !self.effects.is_full() {
            self.effects.push(StatusEffect {
                kind,
                remaining: duration,
                magnitude,
            });
        }
    }

    /// Removes a status effect immediately.
    pub fn remove(&mut self, kind: StatusKind) {
        self.effects.retain(|e| e.kind != kind);
    }

    /// Outgoing damage modifier in percent from empower/weaken stacks.
    pub fn outgoing_damage_pct(&self) -> u32 {
        let empower = self.magnitude(StatusKind::Empower);
        let weaken = self.magnitude(StatusKind::Weaken).min(100);
        (100 + empower).saturating_sub(weaken)
    }

    /// Ticks every effect once, returning what happened, and drops expired ones.
    pub fn tick(&mut self) -> Vec<StatusTick> {
        let mut ticks = Vec::with_capacity(self.effects.len());
        for effect in self.effects.iter_mut() {
            let damage = if effect.kind == StatusKind::Burn {
                effect.magnitude
            } else {
                0
            };
            effect.remaining = effect.remaining.saturating_sub(1);
            ticks.push(StatusTick {
                kind: effect.kind,
                damage,
                expired: effect.remaining == 0,
            });
        }
        self.effects.retain(|e| e.remaining > 0);
        ticks
    }

    /// Returns an iterator over all effects.
    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    /// Returns true if no status effects exist.
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reapplying_refreshes_duration_and_keeps_larger_magnitude() {
        let mut effects = StatusEffects::empty();
        effects.add(StatusKind::Burn, 2, 3);
        effects.add(StatusKind::Burn, 4, 1);

        assert_eq!(effects.iter().count(), 1);
        let burn = effects.iter().next().unwrap();
        assert_eq!(burn.remaining, 4);
        assert_eq!(burn.magnitude, 3);
    }

    #[test]
    fn tick_deals_burn_damage_and_expires() {
        let mut effects = StatusEffects::empty();
        effects.add(StatusKind::Burn, 1, 5);
        effects.add(StatusKind::Shield, 2, 10);

        let ticks = effects.tick();
        assert_eq!(ticks.len(), 2);
        assert_eq!(ticks[0].damage, 5);
        assert!(ticks[0].expired);
        assert!(!ticks[1].expired);

        assert!(!effects.has(StatusKind::Burn));
        assert_eq!(effects.magnitude(StatusKind::Shield), 10);
    }

    #[test]
    fn outgoing_modifier_combines_empower_and_weaken() {
        let mut effects = StatusEffects::empty();
        assert_eq!(effects.outgoing_damage_pct(), 100);

        effects.add(StatusKind::Empower, 3, 30);
        effects.add(StatusKind::Weaken, 3, 50);
        assert_eq!(effects.outgoing_damage_pct(), 80);
    }
}
