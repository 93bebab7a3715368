//! Move scoring.
//!
//! Every legal move gets a signed score: its base damage, adjusted by the
//! bonuses of the current [`TacticalPriority`] and by a handful of
//! context-independent rules. Each adjustment records a reason so decisions
//! can be traced in logs.

use crate::config::BattleConfig;
use crate::moves::{MoveCategory, MoveDefinition, MoveId, MoveTag};
use crate::state::Character;

use super::{LastMoveClass, TacticalPriority, TacticalPriorityEngine};

/// Health below which desperation-tagged moves get a bonus.
const DESPERATION_BONUS_BELOW: u32 = 30;
/// Enemy defense above which piercing moves get a bonus.
const PIERCING_BONUS_ABOVE: u32 = 25;
/// Crit chance from which gambling favours a move.
const GAMBLE_CRIT_FROM: u32 = 20;

/// Score of one candidate move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveScore {
    pub move_id: MoveId,
    pub score: i32,
    pub reasons: Vec<String>,
}

impl MoveScore {
    fn new(definition: &MoveDefinition) -> Self {
        Self {
            move_id: definition.id.clone(),
            score: definition.base_damage as i32,
            reasons: vec![format!("base damage {}", definition.base_damage)],
        }
    }

    fn adjust(&mut self, delta: i32, reason: impl Into<String>) {
        self.score += delta;
        self.reasons.push(format!("{delta:+} {}", reason.into()));
    }
}

/// Move scorer.
///
/// Pure: identical inputs always produce identical scores.
pub struct MoveScorer;

impl MoveScorer {
    /// Scores `definition`, deriving the tactical priority from the situation.
    pub fn score(
        definition: &MoveDefinition,
        me: &Character,
        enemy: &Character,
        available: &[&MoveDefinition],
        stalemate_counter: u32,
        config: &BattleConfig,
    ) -> MoveScore {
        let decision =
            TacticalPriorityEngine::decide(me, enemy, available, stalemate_counter, config);
        Self::score_with_priority(definition, decision.priority, me, enemy, available)
    }

    /// Scores `definition` under an already decided priority.
    ///
    /// Finishers are scored like any other move here. [`MoveSelector`] never
    /// offers them, since the finisher phase fires them on its own, so their
    /// bonuses only matter to callers ranking a moveset directly.
    ///
    /// [`MoveSelector`]: crate::ai::MoveSelector
    pub fn score_with_priority(
        definition: &MoveDefinition,
        priority: TacticalPriority,
        me: &Character,
        enemy: &Character,
        available: &[&MoveDefinition],
    ) -> MoveScore {
        let mut score = MoveScore::new(definition);

        Self::apply_priority(&mut score, definition, priority, me);

        if me
            .last_move()
            .is_some_and(|record| record.id == definition.id)
        {
            score.adjust(-25, "repeats previous move");
        }

        if definition.is_counter() && LastMoveClass::of_last_move(enemy) != LastMoveClass::Attack
        {
            score.adjust(-40, "counter without an incoming attack");
        }

        if definition.is_desperation() && me.health < DESPERATION_BONUS_BELOW {
            score.adjust(25, "desperation move at low health");
        }

        if definition.has_tag(MoveTag::Piercing) && enemy.effective_defense() > PIERCING_BONUS_ABOVE
        {
            score.adjust(20, "piercing a high defense");
        }

        let has_alternative = available
            .iter()
            .any(|other| other.id != definition.id && !other.is_basic());
        if definition.is_basic() && has_alternative {
            score.adjust(-50, "basic move while alternatives exist");
        }

        score
    }

    fn apply_priority(
        score: &mut MoveScore,
        definition: &MoveDefinition,
        priority: TacticalPriority,
        me: &Character,
    ) {
        match priority {
            TacticalPriority::Attack => {
                if definition.category == MoveCategory::Attack && definition.is_damaging() {
                    score.adjust(10, "attack priority");
                }
                if !definition.is_damaging() {
                    score.adjust(-5, "non-damaging under attack priority");
                }
            }
            TacticalPriority::Defend => {
                if definition.category.is_defensive() {
                    score.adjust(30, "defensive move under defend priority");
                }
                if definition.is_healing() {
                    score.adjust(25, "healing under defend priority");
                }
                if definition.has_tag(MoveTag::HighDamage) {
                    score.adjust(-10, "reckless under defend priority");
                }
            }
            TacticalPriority::Pierce => {
                if definition.has_tag(MoveTag::Piercing) {
                    score.adjust(40, "piercing under pierce priority");
                }
                if !definition.is_damaging() {
                    score.adjust(-40, "non-damaging under pierce priority");
                }
            }
            TacticalPriority::Finish => {
                if definition.has_tag(MoveTag::HighDamage) {
                    score.adjust(35, "high damage under finish priority");
                }
                if definition.is_finisher() {
                    score.adjust(50, "finisher under finish priority");
                }
            }
            TacticalPriority::Heal => {
                if definition.is_healing() {
                    score.adjust(45, "healing under heal priority");
                }
            }
            TacticalPriority::Recover => {
                if definition.category == MoveCategory::DefenseBuff {
                    score.adjust(30, "defense buff under recover priority");
                }
                let cost = definition
                    .chi_cost
                    .saturating_sub(me.position.chi_discount());
                if cost > 0 {
                    score.adjust(-5 * cost as i32, "chi cost while recovering");
                }
            }
            TacticalPriority::Gamble => {
                if definition.is_finisher() {
                    score.adjust(60, "finisher gamble");
                }
                let crit = definition.crit_chance();
                if crit >= GAMBLE_CRIT_FROM {
                    score.adjust(30 + (crit / 2) as i32, "high crit gamble");
                }
                if definition.has_tag(MoveTag::HighVariance) {
                    score.adjust(20, "high variance gamble");
                }
                if definition.is_basic() {
                    score.adjust(-20, "basic move while gambling");
                }
            }
        }
    }

    /// Scores every candidate and returns the best.
    ///
    /// Ties keep the first candidate in order. Returns `None` only when
    /// `candidates` is empty.
    pub fn select_best_move(
        candidates: &[&MoveDefinition],
        priority: TacticalPriority,
        me: &Character,
        enemy: &Character,
    ) -> Option<MoveScore> {
        let mut best: Option<MoveScore> = None;

        for definition in candidates {
            let scored = Self::score_with_priority(definition, priority, me, enemy, candidates);

            tracing::debug!(
                move_id = %scored.move_id,
                score = scored.score,
                reasons = ?scored.reasons,
                "scored move"
            );

            // strict comparison keeps the first candidate on ties
            if best.as_ref().is_none_or(|current| scored.score > current.score) {
                best = Some(scored);
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{BaseStats, CharacterId};

    fn fighter(name: &str) -> Character {
        Character::new(
            CharacterId(1),
            name,
            BaseStats::new(10, 10, 10),
            Vec::new(),
            &BattleConfig::default(),
        )
    }

    #[test]
    fn scoring_is_pure() {
        let config = BattleConfig::default();
        let me = fighter("Zuko");
        let enemy = fighter("Aang");
        let blast = MoveDefinition::new("fire_blast", "Fire Blast", 9);
        let moves = [&blast];

        let first = MoveScorer::score(&blast, &me, &enemy, &moves, 0, &config);
        let second = MoveScorer::score(&blast, &me, &enemy, &moves, 0, &config);
        assert_eq!(first, second);
        assert_eq!(first.score, 19);
    }

    #[test]
    fn basic_move_is_penalized_when_alternatives_exist() {
        let me = fighter("Zuko");
        let enemy = fighter("Aang");
        let basic = MoveDefinition::fallback_strike(MoveId::new("basic_strike"));
        let jab = MoveDefinition::new("fire_jab", "Fire Jab", 2);

        let alone = MoveScorer::score_with_priority(
            &basic,
            TacticalPriority::Attack,
            &me,
            &enemy,
            &[&basic],
        );
        let crowded = MoveScorer::score_with_priority(
            &basic,
            TacticalPriority::Attack,
            &me,
            &enemy,
            &[&basic, &jab],
        );
        assert_eq!(alone.score - crowded.score, 50);
    }

    #[test]
    fn repeating_previous_move_costs_points() {
        let mut me = fighter("Zuko");
        let enemy = fighter("Aang");
        let blast = MoveDefinition::new("fire_blast", "Fire Blast", 9);
        let fresh =
            MoveScorer::score_with_priority(&blast, TacticalPriority::Attack, &me, &enemy, &[]);
        me.record_move(&blast, 1);
        let repeated =
            MoveScorer::score_with_priority(&blast, TacticalPriority::Attack, &me, &enemy, &[]);

        assert_eq!(fresh.score - repeated.score, 25);
    }

    #[test]
    fn counters_need_an_incoming_attack() {
        let me = fighter("Katara");
        let mut enemy = fighter("Zuko");
        let parry = MoveDefinition::new("water_whip", "Water Whip", 6)
            .with_category(MoveCategory::ParryRetaliate);

        let idle = MoveScorer::score_with_priority(&parry, TacticalPriority::Attack, &me, &enemy, &[]);
        enemy.record_move(&MoveDefinition::new("fire_blast", "Fire Blast", 9), 1);
        let answered =
            MoveScorer::score_with_priority(&parry, TacticalPriority::Attack, &me, &enemy, &[]);

        assert_eq!(answered.score - idle.score, 40);
    }

    #[test]
    fn ties_keep_catalog_order() {
        let me = fighter("Toph");
        let enemy = fighter("Aang");
        let first = MoveDefinition::new("rock_throw", "Rock Throw", 7);
        let second = MoveDefinition::new("earth_slam", "Earth Slam", 7);

        let best = MoveScorer::select_best_move(
            &[&first, &second],
            TacticalPriority::Attack,
            &me,
            &enemy,
        )
        .unwrap();
        assert_eq!(best.move_id, MoveId::new("rock_throw"));
    }

    #[test]
    fn gamble_rewards_crits_and_finishers() {
        let me = fighter("Azula");
        let enemy = fighter("Zuko");
        let lightning = MoveDefinition::new("lightning", "Lightning", 12).with_crit(40, 200);

        let scored =
            MoveScorer::score_with_priority(&lightning, TacticalPriority::Gamble, &me, &enemy, &[]);
        assert_eq!(scored.score, 12 + 30 + 20);
    }

    #[test]
    fn finishers_rank_first_when_scored_directly() {
        let me = fighter("Azula");
        let enemy = fighter("Zuko");
        let blast = MoveDefinition::new("fire_blast", "Fire Blast", 20);
        let lightning = MoveDefinition::new("lightning", "Lightning", 12)
            .with_finisher(crate::moves::UnlockCondition::TargetHealthBelow(25));

        for priority in [TacticalPriority::Finish, TacticalPriority::Gamble] {
            let best =
                MoveScorer::select_best_move(&[&blast, &lightning], priority, &me, &enemy).unwrap();
            assert_eq!(best.move_id, MoveId::new("lightning"), "{priority:?}");
        }
    }
}
