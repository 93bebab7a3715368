//! Battle participant state.

use std::collections::BTreeMap;

use crate::config::BattleConfig;
use crate::moves::{MoveDefinition, MoveId};

use super::{CombatFlags, MoodTags, StatusEffects, StatusKind, Thresholds};

/// Stable identifier of a roster character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct CharacterId(pub u32);

/// Immutable base stats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStats {
    pub power: u32,
    pub defense: u32,
    pub agility: u32,
}

impl BaseStats {
    pub const fn new(power: u32, defense: u32, agility: u32) -> Self {
        Self {
            power,
            defense,
            agility,
        }
    }
}

/// Tactical position of a combatant.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::IntoStaticStr, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Position {
    #[default]
    Neutral,
    Defensive,
    Aggressive,
    HighGround,
    Cornered,
    Flying,
    Stunned,
    Charging,
    Repositioning,
}

impl Position {
    /// Targets in these positions take punish damage.
    pub const fn is_vulnerable(&self) -> bool {
        matches!(self, Self::Charging | Self::Repositioning | Self::Stunned)
    }

    /// Outgoing damage multiplier in percent for an attacker holding this position.
    pub const fn damage_multiplier_pct(&self) -> u32 {
        match self {
            Self::Aggressive => 115,
            Self::HighGround => 120,
            Self::Flying => 110,
            Self::Defensive | Self::Cornered => 90,
            Self::Stunned => 50,
            Self::Neutral | Self::Charging | Self::Repositioning => 100,
        }
    }

    /// Chi discount granted to moves used from this position.
    pub const fn chi_discount(&self) -> u32 {
        match self {
            Self::Defensive | Self::HighGround => 1,
            _ => 0,
        }
    }

    /// Opponents in these positions may interrupt a charge.
    pub const fn threatens_charge(&self) -> bool {
        matches!(self, Self::Aggressive | Self::Neutral)
    }

    pub fn label(&self) -> &'static str {
        self.into()
    }
}

/// Progress toward releasing a charge-up move.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChargeState {
    /// Charge progress, 0-100.
    pub progress: u32,
    /// Move being charged.
    pub move_id: Option<MoveId>,
}

impl ChargeState {
    pub fn is_charging(&self) -> bool {
        self.move_id.is_some()
    }

    pub fn reset(&mut self) {
        self.progress = 0;
        self.move_id = None;
    }
}

/// One entry of a character's move history.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveRecord {
    pub id: MoveId,
    pub name: String,
    pub turn: u32,
}

/// Per-move usage bookkeeping.
///
/// Remaining cooldown is derived from `last_used_turn`, never stored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveUsage {
    pub last_used_turn: Option<u32>,
    /// `None` for moves without a use cap.
    pub uses_remaining: Option<u32>,
}

/// Stat modifiers granted by the desperation tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct StatModifiers {
    /// Flat damage added in the additive stage.
    pub attack_bonus: u32,
    /// Subtracted from base defense.
    pub defense_penalty: u32,
    /// Added to every crit chance.
    pub crit_bonus_pct: u32,
}

impl StatModifiers {
    pub const fn new(attack_bonus: u32, defense_penalty: u32, crit_bonus_pct: u32) -> Self {
        Self {
            attack_bonus,
            defense_penalty,
            crit_bonus_pct,
        }
    }
}

/// Desperation tier; only ever increases within a battle.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum DesperationTier {
    #[default]
    None,
    Desperate,
    Extreme,
    Final,
}

impl DesperationTier {
    /// Tier implied by the given health percent.
    pub fn for_health(health_percent: u32, config: &BattleConfig) -> Self {
        let breakpoints = &config.desperation;
        if health_percent <= breakpoints.final_at {
            Self::Final
        } else if health_percent <= breakpoints.extreme_at {
            Self::Extreme
        } else if health_percent <= breakpoints.desperate_at {
            Self::Desperate
        } else {
            Self::None
        }
    }

    pub fn modifiers(&self, config: &BattleConfig) -> StatModifiers {
        match self {
            Self::None => StatModifiers::default(),
            Self::Desperate => config.desperation.desperate,
            Self::Extreme => config.desperation.extreme,
            Self::Final => config.desperation.final_stand,
        }
    }
}

/// Stability, pride and moods.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MentalState {
    /// 0-100.
    pub stability: u32,
    /// 0-100.
    pub pride: u32,
    pub moods: MoodTags,
}

impl Default for MentalState {
    fn default() -> Self {
        Self {
            stability: 100,
            pride: 100,
            moods: MoodTags::CONFIDENT,
        }
    }
}

/// A battle participant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub stats: BaseStats,
    /// 0-100.
    pub health: u32,
    /// Current defense (base minus desperation penalty).
    pub defense: u32,
    pub chi: u32,
    pub position: Position,
    pub charge: ChargeState,
    /// Consecutive reposition attempts (diminishing returns).
    pub reposition_attempts: u32,
    /// Moveset in roster order. Selection walks it in catalog order.
    pub moves: Vec<MoveId>,
    /// Append-only history of moves used.
    pub history: Vec<MoveRecord>,
    pub usage: BTreeMap<MoveId, MoveUsage>,
    pub flags: CombatFlags,
    pub desperation: DesperationTier,
    pub modifiers: StatModifiers,
    pub mental: MentalState,
    pub thresholds: Thresholds,
    pub status: StatusEffects,
}

impl Character {
    /// Creates a character at full health with the configured starting chi.
    pub fn new(
        id: CharacterId,
        name: impl Into<String>,
        stats: BaseStats,
        moves: Vec<MoveId>,
        config: &BattleConfig,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            stats,
            health: BattleConfig::MAX_HEALTH,
            defense: stats.defense,
            chi: config.starting_chi,
            position: Position::Neutral,
            charge: ChargeState::default(),
            reposition_attempts: 0,
            moves,
            history: Vec::new(),
            usage: BTreeMap::new(),
            flags: CombatFlags::empty(),
            desperation: DesperationTier::None,
            modifiers: StatModifiers::default(),
            mental: MentalState::default(),
            thresholds: Thresholds::default(),
            status: StatusEffects::empty(),
        }
    }

    /// Seeds usage entries (uses remaining) from the catalog definitions.
    pub fn with_usage_from<'a>(mut self, moves: impl IntoIterator<Item = &'a MoveDefinition>) -> Self {
        for definition in moves {
            self.usage.insert(
                definition.id.clone(),
                MoveUsage {
                    last_used_turn: None,
                    uses_remaining: definition.max_uses,
                },
            );
        }
        self
    }

    #[must_use]
    pub fn with_health(mut self, health: u32) -> Self {
        self.health = health.min(BattleConfig::MAX_HEALTH);
        self
    }

    #[must_use]
    pub fn with_chi(mut self, chi: u32) -> Self {
        self.chi = chi;
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn health_percent(&self) -> u32 {
        self.health * 100 / BattleConfig::MAX_HEALTH
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    /// Current defense plus any active shield.
    pub fn effective_defense(&self) -> u32 {
        self.defense + self.status.magnitude(StatusKind::Shield)
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    pub fn knows(&self, id: &MoveId) -> bool {
        self.moves.contains(id)
    }

    /// True if the trailing `window` moves are all the same move.
    pub fn is_repeating(&self, window: usize) -> bool {
        if window == 0 || self.history.len() < window {
            return false;
        }
        let tail = &self.history[self.history.len() - window..];
        tail.iter().all(|record| record.id == tail[0].id)
    }

    pub fn take_damage(&mut self, damage: u32) {
        self.health = self.health.saturating_sub(damage);
    }

    pub fn heal(&mut self, amount: u32) {
        self.health = (self.health + amount).min(BattleConfig::MAX_HEALTH);
    }

    /// Raises the desperation tier if `tier` is higher. Returns true on increase.
    pub fn raise_desperation(&mut self, tier: DesperationTier, config: &BattleConfig) -> bool {
        if tier <= self.desperation {
            return false;
        }
        self.desperation = tier;
        self.modifiers = tier.modifiers(config);
        self.defense = self.stats.defense.saturating_sub(self.modifiers.defense_penalty);
        true
    }

    pub fn record_move(&mut self, definition: &MoveDefinition, turn: u32) {
        self.history.push(MoveRecord {
            id: definition.id.clone(),
            name: definition.name.clone(),
            turn,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fighter() -> Character {
        Character::new(
            CharacterId(1),
            "Aang",
            BaseStats::new(10, 12, 20),
            vec![MoveId::new("basic_strike")],
            &BattleConfig::default(),
        )
    }

    #[test]
    fn desperation_only_ratchets_upward() {
        let config = BattleConfig::default();
        let mut character = fighter();

        assert!(character.raise_desperation(DesperationTier::Extreme, &config));
        assert_eq!(character.defense, 12 - config.desperation.extreme.defense_penalty);

        assert!(!character.raise_desperation(DesperationTier::Desperate, &config));
        assert_eq!(character.desperation, DesperationTier::Extreme);
    }

    #[test]
    fn repetition_requires_full_window() {
        let mut character = fighter();
        let strike = MoveDefinition::new("basic_strike", "Basic Strike", 1);
        character.record_move(&strike, 1);
        character.record_move(&strike, 3);
        assert!(!character.is_repeating(3));

        character.record_move(&strike, 5);
        assert!(character.is_repeating(3));
    }

    #[test]
    fn tier_breakpoints_are_inclusive() {
        let config = BattleConfig::default();
        assert_eq!(DesperationTier::for_health(36, &config), DesperationTier::None);
        assert_eq!(DesperationTier::for_health(35, &config), DesperationTier::Desperate);
        assert_eq!(DesperationTier::for_health(20, &config), DesperationTier::Extreme);
        assert_eq!(DesperationTier::for_health(3, &config), DesperationTier::Final);
    }
}
