//! Move definitions for the catalog.
//!
//! A [`MoveDefinition`] carries damage, cost, cooldown, tags and the optional
//! finisher/desperation/position data. Definitions are loaded from RON data
//! files via the `MoveOracle`.

use core::fmt;

use crate::moves::UnlockCondition;
use crate::state::{BattlePhase, Position, StatusKind, Terrain};

/// Catalog identifier of a move (e.g. `"basic_strike"`).
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct MoveId(pub String);

impl MoveId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MoveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MoveId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Broad mechanical category of a move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum MoveCategory {
    #[default]
    Attack,
    DefenseBuff,
    Evade,
    ParryRetaliate,
}

impl MoveCategory {
    /// Defensive categories favoured when the AI wants to defend.
    pub const fn is_defensive(&self) -> bool {
        matches!(self, Self::DefenseBuff | Self::Evade | Self::ParryRetaliate)
    }
}

/// Tags for gameplay logic (AI scoring, punish rules).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum MoveTag {
    /// Large damage, preferred when finishing.
    HighDamage,
    /// Ignores defense mitigation; preferred against high-defense targets.
    Piercing,
    /// Restores the user's health.
    Healing,
    /// Counter-type move; only useful against offensive actions.
    Counter,
    /// Desperation move; preferred at low health.
    Desperation,
    /// Basic/filler move, penalized whenever an alternative exists.
    Basic,
    /// Punish-specialized move (higher punish multiplier).
    Punisher,
    /// High-variance move, rewarded when gambling.
    HighVariance,
}

/// Critical hit profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CritProfile {
    /// Chance in percent (0-100).
    pub chance_pct: u32,
    /// Damage multiplier in percent (e.g. 200 doubles damage).
    pub multiplier_pct: u32,
}

/// Flat damage bonus unlocked at low health.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DesperationBuff {
    /// Applies while the user's health percent is at or below this value.
    pub health_threshold: u32,
    pub damage_bonus: u32,
}

/// How a move plays out over time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveShape {
    /// Resolves immediately.
    #[default]
    Instant,
    /// Attempts to reach a new position; success is rolled.
    Reposition {
        /// Added to the base success chance (may be negative).
        success_bonus_pct: i32,
    },
    /// Accumulates charge progress across turns and releases at full charge.
    Charge {
        /// Charge progress gained per turn.
        rate: u32,
    },
}

/// Which combatant an effect lands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectTarget {
    User,
    Opponent,
}

/// Secondary effect applied when the move resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveEffect {
    ApplyStatus {
        kind: StatusKind,
        target: EffectTarget,
        duration: u32,
        magnitude: u32,
    },
    /// Marks the opponent as exposed; the next damaging hit consumes it.
    Expose,
    /// Stuns the opponent, cancelling any charge; they lose their next move.
    Stun,
    Heal(u32),
    RestoreChi(u32),
}

/// A catalog move: costs, gates, shape and effects.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct MoveDefinition {
    pub id: MoveId,
    pub name: String,
    pub category: MoveCategory,
    pub base_damage: u32,
    pub chi_cost: u32,
    /// Turns the move stays unavailable after use.
    pub cooldown: u32,
    pub max_uses: Option<u32>,
    pub crit: Option<CritProfile>,
    /// Present on finishers; the condition unlocks the finisher.
    pub finisher: Option<UnlockCondition>,
    /// Desperation gate: usable only while health percent is at or below this value.
    pub unlock_below_health: Option<u32>,
    pub desperation_buff: Option<DesperationBuff>,
    /// Positions the user must be in (empty = any).
    pub required_positions: Vec<Position>,
    /// Position the user moves to when the move resolves.
    pub sets_position: Option<Position>,
    pub shape: MoveShape,
    pub tags: Vec<MoveTag>,
    pub effects: Vec<MoveEffect>,
    /// Battle phases in which the move may be used (empty = any).
    pub phases: Vec<BattlePhase>,
    /// Terrains in which the move may be used (empty = any).
    pub terrain: Vec<Terrain>,
}

impl Default for MoveDefinition {
    fn default() -> Self {
        Self {
            id: MoveId::default(),
            name: String::new(),
            category: MoveCategory::Attack,
            base_damage: 0,
            chi_cost: 0,
            cooldown: 0,
            max_uses: None,
            crit: None,
            finisher: None,
            unlock_below_health: None,
            desperation_buff: None,
            required_positions: Vec::new(),
            sets_position: None,
            shape: MoveShape::Instant,
            tags: Vec::new(),
            effects: Vec::new(),
            phases: Vec::new(),
            terrain: Vec::new(),
        }
    }
}

impl MoveDefinition {
    /// Creates a bare attack with the given id and damage.
    pub fn new(id: impl Into<String>, name: impl Into<String>, base_damage: u32) -> Self {
        Self {
            id: MoveId::new(id),
            name: name.into(),
            base_damage,
            ..Self::default()
        }
    }

    /// Built-in basic strike used when the catalog cannot supply one.
    ///
    /// Costs nothing and has no cooldown, so it is always legal.
    pub fn fallback_strike(id: MoveId) -> Self {
        Self {
            id,
            name: "Basic Strike".into(),
            base_damage: 1,
            tags: vec![MoveTag::Basic],
            ..Self::default()
        }
    }

    pub fn has_tag(&self, tag: MoveTag) -> bool {
        self.tags.contains(&tag)
    }

    pub fn is_finisher(&self) -> bool {
        self.finisher.is_some()
    }

    pub fn is_basic(&self) -> bool {
        self.has_tag(MoveTag::Basic)
    }

    pub fn is_damaging(&self) -> bool {
        self.base_damage > 0
    }

    pub fn is_healing(&self) -> bool {
        self.has_tag(MoveTag::Healing)
            || self
                .effects
                .iter()
                .any(|effect| matches!(effect, MoveEffect::Heal(_)))
    }

    pub fn is_counter(&self) -> bool {
        self.category == MoveCategory::ParryRetaliate || self.has_tag(MoveTag::Counter)
    }

    pub fn is_desperation(&self) -> bool {
        self.unlock_below_health.is_some() || self.has_tag(MoveTag::Desperation)
    }

    pub fn crit_chance(&self) -> u32 {
        self.crit.map(|crit| crit.chance_pct).unwrap_or(0)
    }

    // ===== builder helpers (used by fixtures and content tooling) =====

    #[must_use]
    pub fn with_category(mut self, category: MoveCategory) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub fn with_chi_cost(mut self, chi_cost: u32) -> Self {
        self.chi_cost = chi_cost;
        self
    }

    #[must_use]
    pub fn with_cooldown(mut self, cooldown: u32) -> Self {
        self.cooldown = cooldown;
        self
    }

    #[must_use]
    pub fn with_max_uses(mut self, max_uses: u32) -> Self {
        self.max_uses = Some(max_uses);
        self
    }

    #[must_use]
    pub fn with_crit(mut self, chance_pct: u32, multiplier_pct: u32) -> Self {
        self.crit = Some(CritProfile {
            chance_pct,
            multiplier_pct,
        });
        self
    }

    #[must_use]
    pub fn with_finisher(mut self, condition: UnlockCondition) -> Self {
        self.finisher = Some(condition);
        self
    }

    #[must_use]
    pub fn with_unlock_below_health(mut self, threshold: u32) -> Self {
        self.unlock_below_health = Some(threshold);
        self
    }

    #[must_use]
    pub fn with_desperation_buff(mut self, health_threshold: u32, damage_bonus: u32) -> Self {
        self.desperation_buff = Some(DesperationBuff {
            health_threshold,
            damage_bonus,
        });
        self
    }

    #[must_use]
    pub fn with_shape(mut self, shape: MoveShape) -> Self {
        self.shape = shape;
        self
    }

    #[must_use]
    pub fn with_sets_position(mut self, position: Position) -> Self {
        self.sets_position = Some(position);
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: MoveTag) -> Self {
        self.tags.push(tag);
        self
    }

    #[must_use]
    pub fn with_effect(mut self, effect: MoveEffect) -> Self {
        self.effects.push(effect);
        self
    }

    #[must_use]
    pub fn with_phases(mut self, phases: Vec<BattlePhase>) -> Self {
        self.phases = phases;
        self
    }
}
