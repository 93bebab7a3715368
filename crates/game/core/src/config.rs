//! Battle configuration constants and tunable parameters.
//!
//! Every numeric threshold the pipeline consults lives here so balancing can be
//! supplied externally (see `battle-content::ConfigLoader`). Percentages are
//! integers where `100` means "unchanged".

use crate::moves::MoveId;
use crate::state::StatModifiers;

/// Battle configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct BattleConfig {
    /// Hard turn ceiling; the battle is declared a draw once it is exceeded.
    pub max_turns: u32,
    /// Chi pool every character starts with.
    pub starting_chi: u32,
    /// Chi restored to both characters at the end of every turn.
    pub chi_regen_per_turn: u32,
    /// Guaranteed always-available move used when nothing else is legal.
    pub basic_move: MoveId,
    pub stalemate: StalemateConfig,
    pub escalation: EscalationConfig,
    pub desperation: DesperationConfig,
    pub combat: CombatConfig,
    pub charge: ChargeConfig,
    pub reposition: RepositionConfig,
    pub mental: MentalConfig,
}

impl BattleConfig {
    // ===== compile-time constants =====
    /// Maximum health of every character.
    pub const MAX_HEALTH: u32 = 100;
    /// Charge progress needed to release a charge-up move.
    pub const FULL_CHARGE: u32 = 100;
    pub const MAX_STATUS_EFFECTS: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_TURNS: u32 = 50;
    pub const DEFAULT_STARTING_CHI: u32 = 10;
    pub const DEFAULT_BASIC_MOVE: &'static str = "basic_strike";

    pub fn new() -> Self {
        Self {
            max_turns: Self::DEFAULT_MAX_TURNS,
            starting_chi: Self::DEFAULT_STARTING_CHI,
            chi_regen_per_turn: 1,
            basic_move: MoveId::new(Self::DEFAULT_BASIC_MOVE),
            stalemate: StalemateConfig::default(),
            escalation: EscalationConfig::default(),
            desperation: DesperationConfig::default(),
            combat: CombatConfig::default(),
            charge: ChargeConfig::default(),
            reposition: RepositionConfig::default(),
            mental: MentalConfig::default(),
        }
    }

    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Stalemate heuristics evaluated while validating the end state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct StalemateConfig {
    /// Heuristics only fire after this many turns.
    pub turn_threshold: u32,
    /// Average damage per turn below which the battle counts as stalled.
    pub min_average_damage: u32,
    /// Number of trailing move entries inspected for a basic-move loop.
    pub basic_loop_window: usize,
    /// Consecutive damageless turns after which the AI gambles.
    pub gamble_after: u32,
}

impl Default for StalemateConfig {
    fn default() -> Self {
        Self {
            turn_threshold: 10,
            min_average_damage: 3,
            basic_loop_window: 5,
            gamble_after: 3,
        }
    }
}

/// Forced escalation parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct EscalationConfig {
    /// Damage multiplier while escalated (and during sudden death).
    pub damage_factor_pct: u32,
    /// Minimum number of turns between two escalations.
    pub cooldown_window: u32,
    /// Identical trailing moves that count as repetition.
    pub repetition_window: usize,
}

impl Default for EscalationConfig {
    fn default() -> Self {
        Self {
            damage_factor_pct: 150,
            cooldown_window: 5,
            repetition_window: 3,
        }
    }
}

/// Desperation tier breakpoints (health percent, inclusive) and tier modifiers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct DesperationConfig {
    pub desperate_at: u32,
    pub extreme_at: u32,
    pub final_at: u32,
    pub desperate: StatModifiers,
    pub extreme: StatModifiers,
    pub final_stand: StatModifiers,
}

impl Default for DesperationConfig {
    fn default() -> Self {
        Self {
            desperate_at: 35,
            extreme_at: 20,
            final_at: 10,
            desperate: StatModifiers::new(2, 2, 5),
            extreme: StatModifiers::new(4, 4, 10),
            final_stand: StatModifiers::new(6, 6, 15),
        }
    }
}

/// Damage pipeline multipliers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CombatConfig {
    /// Multiplier applied once when the target is exposed.
    pub exposed_multiplier_pct: u32,
    /// Multiplier against charging/repositioning/stunned targets.
    pub punish_multiplier_pct: u32,
    /// Punish multiplier for moves tagged as punishers.
    pub punisher_multiplier_pct: u32,
    /// Damage reduction is `effective_defense / defense_divisor`.
    pub defense_divisor: u32,
    /// Flat damage bonus is `power / power_divisor`.
    pub power_divisor: u32,
    /// Crit multiplier for moves without their own crit profile.
    pub default_crit_multiplier_pct: u32,
    /// Damage at or above which a hit counts as "large" for mental state.
    pub big_hit: u32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            exposed_multiplier_pct: 150,
            punish_multiplier_pct: 200,
            punisher_multiplier_pct: 300,
            defense_divisor: 4,
            power_divisor: 10,
            default_crit_multiplier_pct: 150,
            big_hit: 15,
        }
    }
}

/// Charge-up move parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ChargeConfig {
    /// Damage multiplier on release.
    pub amplification_pct: u32,
    /// Interruption chance per turn while the opponent is aggressive or neutral.
    pub interrupt_chance_pct: u32,
}

impl Default for ChargeConfig {
    fn default() -> Self {
        Self {
            amplification_pct: 200,
            interrupt_chance_pct: 25,
        }
    }
}

/// Repositioning success parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct RepositionConfig {
    pub base_success_pct: u32,
    /// Agility contributes `agility / agility_divisor` percent.
    pub agility_divisor: u32,
    /// Success lost per consecutive attempt.
    pub diminishing_step_pct: u32,
    pub min_success_pct: u32,
    pub max_success_pct: u32,
}

impl Default for RepositionConfig {
    fn default() -> Self {
        Self {
            base_success_pct: 60,
            agility_divisor: 5,
            diminishing_step_pct: 15,
            min_success_pct: 10,
            max_success_pct: 95,
        }
    }
}

/// Mental-state thresholds and per-turn deltas.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct MentalConfig {
    /// Stability below this marks the character unhinged.
    pub unhinged_below: u32,
    /// Stability below this marks the character broken.
    pub broken_below: u32,
    /// Pride lost is `damage_taken / pride_damage_divisor`.
    pub pride_damage_divisor: u32,
    /// Stability lost is `damage_taken / stability_damage_divisor`.
    pub stability_damage_divisor: u32,
    pub big_hit_pride: u32,
    pub big_hit_stability: u32,
    pub setback_pride: u32,
    pub setback_stability: u32,
}

impl Default for MentalConfig {
    fn default() -> Self {
        Self {
            unhinged_below: 50,
            broken_below: 20,
            pride_damage_divisor: 2,
            stability_damage_divisor: 3,
            big_hit_pride: 6,
            big_hit_stability: 3,
            setback_pride: 10,
            setback_stability: 8,
        }
    }
}
