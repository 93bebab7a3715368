//! Damage calculation.
//!
//! # Stacking order
//!
//! ```text
//! additive   = base + move desperation buff + power / power_divisor + tier attack bonus
//! damage     = additive
//!            × crit multiplier       (if critical)
//!            × status modifier       (empower / weaken on the attacker)
//!            × exposed multiplier    (if the target is exposed; consumed)
//!            × position multiplier   (attacker position)
//!            × punish multiplier     (target charging / repositioning / stunned)
//!            × escalation factor     (forced escalation or sudden death)
//!            × charge amplification  (charge-up release)
//! final      = max(1, damage - effective_defense / defense_divisor)
//! ```
//!
//! Every multiplier is an integer percentage rounded half up. Piercing moves
//! skip the defense mitigation. Non-damaging moves always deal 0.

use crate::config::BattleConfig;
use crate::moves::{MoveDefinition, MoveTag};
use crate::state::{Character, CombatFlags};

/// Scales `value` by `pct` percent, rounding half up.
pub fn scale_pct(value: u32, pct: u32) -> u32 {
    (value * pct + 50) / 100
}

/// Situational inputs decided before the damage calculation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DamageModifiers {
    /// The crit roll succeeded.
    pub critical: bool,
    /// Attacker is escalated or the battle is in sudden death.
    pub escalated: bool,
    /// A charge-up move is being released.
    pub charge_release: bool,
}

/// Every intermediate step of a damage calculation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageBreakdown {
    pub base: u32,
    /// Move-level desperation buff (0 when not applied).
    pub desperation_bonus: u32,
    pub power_bonus: u32,
    /// Desperation-tier attack bonus.
    pub tier_bonus: u32,
    /// Applied crit multiplier, if the hit was critical.
    pub crit_pct: Option<u32>,
    pub status_pct: u32,
    /// Target was exposed; the flag must be consumed.
    pub exposed: bool,
    pub position_pct: u32,
    pub punish_pct: Option<u32>,
    pub escalation_pct: Option<u32>,
    pub charge_pct: Option<u32>,
    /// Damage removed by the target's defense.
    pub mitigation: u32,
    pub total: u32,
}

impl DamageBreakdown {
    pub fn is_critical(&self) -> bool {
        self.crit_pct.is_some()
    }

    pub fn desperation_applied(&self) -> bool {
        self.desperation_bonus > 0
    }
}

/// Move desperation buff, if the attacker's health is at or below its threshold.
fn desperation_bonus(definition: &MoveDefinition, attacker: &Character) -> u32 {
    definition
        .desperation_buff
        .filter(|buff| attacker.health_percent() <= buff.health_threshold)
        .map(|buff| buff.damage_bonus)
        .unwrap_or(0)
}

fn crit_multiplier(definition: &MoveDefinition, config: &BattleConfig) -> u32 {
    definition
        .crit
        .map(|crit| crit.multiplier_pct)
        .unwrap_or(config.combat.default_crit_multiplier_pct)
}

/// Total crit chance for `definition`, including the attacker's tier bonus.
pub fn crit_chance(definition: &MoveDefinition, attacker: &Character) -> u32 {
    if !definition.is_damaging() {
        return 0;
    }
    (definition.crit_chance() + attacker.modifiers.crit_bonus_pct).min(100)
}

/// Full damage pipeline for a regular move.
pub fn calculate_damage(
    definition: &MoveDefinition,
    attacker: &Character,
    target: &Character,
    modifiers: DamageModifiers,
    config: &BattleConfig,
) -> DamageBreakdown {
    if !definition.is_damaging() {
        return DamageBreakdown {
            status_pct: 100,
            position_pct: 100,
            ..DamageBreakdown::default()
        };
    }

    let combat = &config.combat;
    let mut breakdown = DamageBreakdown {
        base: definition.base_damage,
        desperation_bonus: desperation_bonus(definition, attacker),
        power_bonus: attacker.stats.power / combat.power_divisor.max(1),
        tier_bonus: attacker.modifiers.attack_bonus,
        ..DamageBreakdown::default()
    };

    let mut damage = breakdown.base
        + breakdown.desperation_bonus
        + breakdown.power_bonus
        + breakdown.tier_bonus;

    if modifiers.critical {
        let pct = crit_multiplier(definition, config);
        damage = scale_pct(damage, pct);
        breakdown.crit_pct = Some(pct);
    }

    breakdown.status_pct = attacker.status.outgoing_damage_pct();
    damage = scale_pct(damage, breakdown.status_pct);

    if target.flags.contains(CombatFlags::EXPOSED) {
        damage = scale_pct(damage, combat.exposed_multiplier_pct);
        breakdown.exposed = true;
    }

    breakdown.position_pct = attacker.position.damage_multiplier_pct();
    damage = scale_pct(damage, breakdown.position_pct);

    if target.position.is_vulnerable() {
        let pct = if definition.has_tag(MoveTag::Punisher) {
            combat.punisher_multiplier_pct
        } else {
            combat.punish_multiplier_pct
        };
        damage = scale_pct(damage, pct);
        breakdown.punish_pct = Some(pct);
    }

    if modifiers.escalated {
        let pct = config.escalation.damage_factor_pct;
        damage = scale_pct(damage, pct);
        breakdown.escalation_pct = Some(pct);
    }

    if modifiers.charge_release {
        let pct = config.charge.amplification_pct;
        damage = scale_pct(damage, pct);
        breakdown.charge_pct = Some(pct);
    }

    if !definition.has_tag(MoveTag::Piercing) {
        breakdown.mitigation = target.effective_defense() / combat.defense_divisor.max(1);
    }

    breakdown.total = damage.saturating_sub(breakdown.mitigation).max(1);
    breakdown
}

/// Damage for a finisher: base, desperation buff and crit only.
pub fn calculate_finisher_damage(
    definition: &MoveDefinition,
    attacker: &Character,
    critical: bool,
    config: &BattleConfig,
) -> DamageBreakdown {
    let mut breakdown = DamageBreakdown {
        base: definition.base_damage,
        desperation_bonus: desperation_bonus(definition, attacker),
        status_pct: 100,
        position_pct: 100,
        ..DamageBreakdown::default()
    };

    let mut damage = breakdown.base + breakdown.desperation_bonus;
    if critical && definition.is_damaging() {
        let pct = crit_multiplier(definition, config);
        damage = scale_pct(damage, pct);
        breakdown.crit_pct = Some(pct);
    }

    breakdown.total = damage;
    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::MoveId;
    use crate::state::{BaseStats, CharacterId, Position, StatusKind};

    fn fighter(power: u32, defense: u32) -> Character {
        Character::new(
            CharacterId(1),
            "Sokka",
            BaseStats::new(power, defense, 10),
            vec![MoveId::new("boomerang")],
            &BattleConfig::default(),
        )
    }

    #[test]
    fn basic_strike_always_hurts() {
        let config = BattleConfig::default();
        let strike = MoveDefinition::fallback_strike(MoveId::new("basic_strike"));
        let attacker = fighter(0, 0);
        let target = fighter(0, 40);

        let breakdown =
            calculate_damage(&strike, &attacker, &target, DamageModifiers::default(), &config);
        assert_eq!(breakdown.mitigation, 10);
        assert_eq!(breakdown.total, 1);
    }

    #[test]
    fn modifiers_stack_in_order() {
        let config = BattleConfig::default();
        let blast = MoveDefinition::new("fire_blast", "Fire Blast", 10).with_crit(10, 200);
        let mut attacker = fighter(20, 0).with_position(Position::Aggressive);
        attacker.status.add(StatusKind::Empower, 2, 10);
        let mut target = fighter(0, 8).with_position(Position::Charging);
        target.flags.insert(CombatFlags::EXPOSED);

        let modifiers = DamageModifiers {
            critical: true,
            ..DamageModifiers::default()
        };
        let breakdown = calculate_damage(&blast, &attacker, &target, modifiers, &config);

        // (10 + 2) * 2.0 = 24 -> *1.1 = 26 -> *1.5 = 39 -> *1.15 = 45 -> *2 = 90 -> -2 = 88
        assert_eq!(breakdown.power_bonus, 2);
        assert!(breakdown.exposed);
        assert_eq!(breakdown.punish_pct, Some(200));
        assert_eq!(breakdown.total, 88);
    }

    #[test]
    fn piercing_ignores_defense() {
        let config = BattleConfig::default();
        let spike = MoveDefinition::new("earth_spike", "Earth Spike", 8).with_tag(MoveTag::Piercing);
        let attacker = fighter(0, 0);
        let target = fighter(0, 40);

        let breakdown =
            calculate_damage(&spike, &attacker, &target, DamageModifiers::default(), &config);
        assert_eq!(breakdown.mitigation, 0);
        assert_eq!(breakdown.total, 8);
    }

    #[test]
    fn desperation_buff_needs_low_health() {
        let config = BattleConfig::default();
        let surge = MoveDefinition::new("surge", "Surge", 6).with_desperation_buff(30, 5);
        let target = fighter(0, 0);

        let healthy = calculate_damage(
            &surge,
            &fighter(0, 0),
            &target,
            DamageModifiers::default(),
            &config,
        );
        let hurt = calculate_damage(
            &surge,
            &fighter(0, 0).with_health(30),
            &target,
            DamageModifiers::default(),
            &config,
        );
        assert_eq!(healthy.total, 6);
        assert_eq!(hurt.total, 11);
        assert!(hurt.desperation_applied());
    }

    #[test]
    fn non_damaging_moves_deal_nothing() {
        let config = BattleConfig::default();
        let glide = MoveDefinition::new("glide", "Glide", 0);
        let breakdown = calculate_damage(
            &glide,
            &fighter(30, 0),
            &fighter(0, 0),
            DamageModifiers::default(),
            &config,
        );
        assert_eq!(breakdown.total, 0);
    }
}
