//! Applies the difficulty multiplier to spawns and rewards.

use super::types::{
    BossPhase, BossTemplate, DifficultyColor, Enemy, LootTable, ScaledBoss, ScaledLoot,
};
use crate::core::config::DifficultyConfig;
use crate::core::constants::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Floors a derived count, tolerating float error just below an integer.
fn floor_count(value: f64) -> f64 {
    (value + FLOOR_EPSILON).floor()
}

#[derive(Debug, Clone, Copy)]
struct EnrageTimers {
    skilled: Duration,
    default: Duration,
    novice: Duration,
    skilled_threshold: f64,
    novice_threshold: f64,
}

/// Scales enemies, bosses, loot and experience by a difficulty multiplier.
///
/// Stat rolls draw from the owned RNG so tests can seed it.
#[derive(Debug, Clone)]
pub struct ScalingApplier<R: Rng> {
    rng: R,
    enrage: EnrageTimers,
}

impl ScalingApplier<StdRng> {
    pub fn from_entropy(config: &DifficultyConfig) -> Self {
        Self::new(config, StdRng::from_entropy())
    }
}

impl<R: Rng> ScalingApplier<R> {
    pub fn new(config: &DifficultyConfig, rng: R) -> Self {
        Self {
            rng,
            enrage: EnrageTimers {
                skilled: Duration::from_secs(config.enrage_skilled_secs),
                default: Duration::from_secs(config.enrage_default_secs),
                novice: Duration::from_secs(config.enrage_novice_secs),
                skilled_threshold: config.enrage_skilled_threshold,
                novice_threshold: config.enrage_novice_threshold,
            },
        }
    }

    /// Returns a copy of `enemy` scaled for the player's level and the multiplier.
    pub fn scale_enemy(&mut self, enemy: &Enemy, player_level: u32, multiplier: f64) -> Enemy {
        let level_variance = self
            .rng
            .gen_range(ENEMY_LEVEL_VARIANCE_MIN..ENEMY_LEVEL_VARIANCE_MAX);
        let health_variance = self
            .rng
            .gen_range(ENEMY_HEALTH_VARIANCE_MIN..ENEMY_HEALTH_VARIANCE_MAX);
        let damage_variance = self
            .rng
            .gen_range(ENEMY_DAMAGE_VARIANCE_MIN..ENEMY_DAMAGE_VARIANCE_MAX);

        let level = (player_level as f64 * level_variance * multiplier)
            .floor()
            .max(1.0) as u32;
        let max_hp = (enemy.max_hp as f64 * multiplier * health_variance).max(1.0) as u32;
        let damage = (enemy.damage as f64 * multiplier * damage_variance).max(1.0) as u32;
        let speed =
            enemy.speed * (ENEMY_SPEED_BASE + (multiplier - 1.0) * ENEMY_SPEED_SENSITIVITY);

        Enemy {
            name: enemy.name.clone(),
            level,
            max_hp,
            current_hp: max_hp,
            damage,
            defense: enemy.defense,
            speed,
            difficulty_color: Some(DifficultyColor::from_multiplier(multiplier)),
        }
    }

    /// Scales every phase of a boss for the party size and multiplier.
    pub fn scale_boss(
        &self,
        boss: &BossTemplate,
        player_level: u32,
        party_size: u32,
        multiplier: f64,
        skill_level: f64,
    ) -> ScaledBoss {
        let party_size = party_size.max(1);
        let party_multiplier = 1.0 + (party_size - 1) as f64 * BOSS_PARTY_SCALING;
        let boss_scale = multiplier * party_multiplier;

        let phases = (1..=boss.phase_count.max(1))
            .map(|phase| {
                let phase_multiplier = 1.0 + (phase - 1) as f64 * BOSS_PHASE_SCALING;
                let abilities = boss
                    .phase_abilities
                    .get((phase - 1) as usize)
                    .cloned()
                    .unwrap_or_default();
                BossPhase {
                    phase,
                    health: floor_count(boss.base_health as f64 * phase_multiplier * boss_scale)
                        .max(1.0) as u32,
                    damage: floor_count(boss.base_damage as f64 * phase_multiplier * boss_scale)
                        .max(1.0) as u32,
                    abilities,
                }
            })
            .collect();

        ScaledBoss {
            name: boss.name.clone(),
            level: player_level.max(1),
            party_size,
            phases,
            enrage_timer: self.enrage_timer(skill_level),
        }
    }

    /// Short timer for skilled players, long for struggling ones, default between.
    pub fn enrage_timer(&self, skill_level: f64) -> Duration {
        if skill_level > self.enrage.skilled_threshold {
            self.enrage.skilled
        } else if skill_level < self.enrage.novice_threshold {
            self.enrage.novice
        } else {
            self.enrage.default
        }
    }

    pub fn scale_loot(&self, base: &LootTable, multiplier: f64) -> ScaledLoot {
        scale_loot(base, multiplier)
    }

    pub fn scale_experience(&self, base_exp: u64, multiplier: f64) -> u64 {
        scale_experience(base_exp, multiplier)
    }
}

/// Harder fights roll rarer, larger and better loot; past 1.3 they add bonus items.
pub fn scale_loot(base: &LootTable, multiplier: f64) -> ScaledLoot {
    let quality_bonus = (multiplier - 1.0) * LOOT_QUALITY_BONUS_FACTOR;

    let rarity_chance = (base.rarity_chance * (1.0 + quality_bonus)).clamp(0.0, 1.0);
    let quantity = floor_count(base.quantity as f64 * (1.0 + quality_bonus * 0.5)).max(0.0) as u32;
    let quality = (base.quality as f64 + floor_count(quality_bonus * 5.0))
        .clamp(0.0, LOOT_MAX_QUALITY as f64) as u32;
    let bonus_items = if multiplier > LOOT_BONUS_ITEM_THRESHOLD {
        floor_count((multiplier - LOOT_BONUS_ITEM_THRESHOLD) * LOOT_BONUS_ITEMS_PER_POINT) as u32
    } else {
        0
    };

    ScaledLoot {
        rarity_chance,
        quantity,
        quality,
        bonus_items,
    }
}

/// exp = floor(base * (0.5 + multiplier))
pub fn scale_experience(base_exp: u64, multiplier: f64) -> u64 {
    floor_count(base_exp as f64 * (EXP_BASE_FACTOR + multiplier)).max(0.0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha8Rng;

    fn create_test_applier() -> ScalingApplier<ChaCha8Rng> {
        ScalingApplier::new(&DifficultyConfig::default(), ChaCha8Rng::seed_from_u64(12345))
    }

    fn loot() -> LootTable {
        LootTable {
            rarity_chance: 0.2,
            quantity: 4,
            quality: 5,
        }
    }

    #[test]
    fn test_scale_enemy_within_rolled_ranges() {
        let mut applier = create_test_applier();
        let base = Enemy::new("Forest Wolf", 10, 1_000, 100);

        for _ in 0..200 {
            let scaled = applier.scale_enemy(&base, 20, 1.2);
            // level: floor(20 * [0.8, 1.5) * 1.2)
            assert!((19..=36).contains(&scaled.level), "level {}", scaled.level);
            // hp: 1000 * 1.2 * [0.9, 1.1)
            assert!((1_080..=1_320).contains(&scaled.max_hp), "hp {}", scaled.max_hp);
            assert_eq!(scaled.current_hp, scaled.max_hp);
            // damage: 100 * 1.2 * [0.95, 1.05)
            assert!((114..=126).contains(&scaled.damage), "damage {}", scaled.damage);
            assert!((scaled.speed - 1.0).abs() < 1e-12);
            assert_eq!(scaled.difficulty_color, Some(DifficultyColor::Hard));
        }
    }

    #[test]
    fn test_scale_enemy_level_floor_is_one() {
        let mut applier = create_test_applier();
        let base = Enemy::new("Meadow Beetle", 1, 10, 1);
        let scaled = applier.scale_enemy(&base, 0, 0.8);
        assert_eq!(scaled.level, 1);
        assert!(scaled.max_hp >= 1);
        assert!(scaled.damage >= 1);
    }

    #[test]
    fn test_scale_enemy_speed() {
        let mut applier = create_test_applier();
        let base = Enemy::new("Storm Titan", 50, 500, 50);
        let slow = applier.scale_enemy(&base, 50, 0.8);
        let fast = applier.scale_enemy(&base, 50, 1.5);
        assert!((slow.speed - 0.8).abs() < 1e-12);
        assert!((fast.speed - 1.15).abs() < 1e-12);
    }

    #[test]
    fn test_scale_enemy_is_deterministic_for_seed() {
        let base = Enemy::new("Crystal Golem", 30, 300, 30);
        let a = create_test_applier().scale_enemy(&base, 30, 1.1);
        let b = create_test_applier().scale_enemy(&base, 30, 1.1);
        assert_eq!(a, b);
    }

    #[test]
    fn test_scale_boss_phases() {
        let applier = create_test_applier();
        let boss = BossTemplate::new("Broodmother Arachne", 1_000, 100, 3).with_phase_abilities(
            vec![
                vec!["Web Spit".to_string()],
                vec!["Summon Brood".to_string()],
            ],
        );

        let scaled = applier.scale_boss(&boss, 25, 1, 1.0, 0.5);
        assert_eq!(scaled.phases.len(), 3);
        assert_eq!(scaled.phase(1).unwrap().health, 1_000);
        assert_eq!(scaled.phase(2).unwrap().health, 1_300);
        assert_eq!(scaled.phase(3).unwrap().health, 1_600);
        assert_eq!(scaled.phase(3).unwrap().damage, 160);
        assert_eq!(scaled.phase(2).unwrap().abilities, vec!["Summon Brood"]);
        assert!(scaled.phase(3).unwrap().abilities.is_empty());
        assert_eq!(scaled.level, 25);
    }

    #[test]
    fn test_scale_boss_party_size() {
        let applier = create_test_applier();
        let boss = BossTemplate::new("Ice Giant", 1_000, 100, 1);
        let scaled = applier.scale_boss(&boss, 30, 3, 1.2, 0.5);
        // 1000 * 1.2 * (1 + 2 * 0.5)
        assert_eq!(scaled.phase(1).unwrap().health, 2_400);
        assert_eq!(scaled.party_size, 3);
    }

    #[test]
    fn test_scale_boss_zero_party_and_phases() {
        let applier = create_test_applier();
        let boss = BossTemplate::new("Field Guardian", 500, 50, 0);
        let scaled = applier.scale_boss(&boss, 5, 0, 1.0, 0.5);
        assert_eq!(scaled.party_size, 1);
        assert_eq!(scaled.phases.len(), 1);
        assert_eq!(scaled.phase(1).unwrap().health, 500);
    }

    #[test]
    fn test_enrage_timer_bands() {
        let applier = create_test_applier();
        assert_eq!(applier.enrage_timer(0.9), Duration::from_secs(180));
        assert_eq!(applier.enrage_timer(0.8), Duration::from_secs(300));
        assert_eq!(applier.enrage_timer(0.5), Duration::from_secs(300));
        assert_eq!(applier.enrage_timer(0.3), Duration::from_secs(300));
        assert_eq!(applier.enrage_timer(0.1), Duration::from_secs(600));
    }

    #[test]
    fn test_scale_loot_bonus_items() {
        assert_eq!(scale_loot(&loot(), 1.3).bonus_items, 0);
        assert_eq!(scale_loot(&loot(), 1.5).bonus_items, 1);
        assert_eq!(scale_loot(&loot(), 1.0).bonus_items, 0);
    }

    #[test]
    fn test_scale_loot_neutral_multiplier() {
        let scaled = scale_loot(&loot(), 1.0);
        assert_eq!(scaled.quantity, 4);
        assert_eq!(scaled.quality, 5);
        assert!((scaled.rarity_chance - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_scale_loot_hard() {
        // quality_bonus = 1.0
        let scaled = scale_loot(&loot(), 1.5);
        assert!((scaled.rarity_chance - 0.4).abs() < 1e-12);
        assert_eq!(scaled.quantity, 6);
        assert_eq!(scaled.quality, 10);
    }

    #[test]
    fn test_scale_loot_easy_lowers_rewards() {
        // quality_bonus = -0.4
        let scaled = scale_loot(&loot(), 0.8);
        assert!((scaled.rarity_chance - 0.12).abs() < 1e-12);
        assert_eq!(scaled.quantity, 3);
        assert_eq!(scaled.quality, 3);
    }

    #[test]
    fn test_scale_loot_caps() {
        let base = LootTable {
            rarity_chance: 0.9,
            quantity: 1,
            quality: 9,
        };
        let scaled = scale_loot(&base, 1.5);
        assert_eq!(scaled.rarity_chance, 1.0);
        assert_eq!(scaled.quality, 10);

        let low = LootTable {
            rarity_chance: 0.0,
            quantity: 0,
            quality: 0,
        };
        assert_eq!(scale_loot(&low, 0.8).quality, 0);
    }

    #[test]
    fn test_scale_experience() {
        assert_eq!(scale_experience(100, 1.2), 170);
        assert_eq!(scale_experience(100, 1.0), 150);
        assert_eq!(scale_experience(100, 0.8), 130);
        assert_eq!(scale_experience(0, 1.5), 0);
        let applier = create_test_applier();
        assert_eq!(applier.scale_experience(100, 1.5), 200);
    }
}
