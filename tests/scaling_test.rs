//! Scaling integration tests
//!
//! Enemy, boss, loot and experience scaling against engine-produced
//! multipliers and the documented reference values.

use adaptive_difficulty::core::DifficultyConfig;
use adaptive_difficulty::scaling::{
    scale_experience, scale_loot, BossTemplate, DifficultyColor, Enemy, LootTable, ScalingApplier,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

fn applier(seed: u64) -> ScalingApplier<ChaCha8Rng> {
    ScalingApplier::new(&DifficultyConfig::default(), ChaCha8Rng::seed_from_u64(seed))
}

fn table() -> LootTable {
    LootTable {
        rarity_chance: 0.1,
        quantity: 2,
        quality: 3,
    }
}

// ============================================================================
// Loot and experience reference values
// ============================================================================

#[test]
fn test_bonus_items_start_above_threshold() {
    assert_eq!(scale_loot(&table(), 1.0).bonus_items, 0);
    assert_eq!(scale_loot(&table(), 1.3).bonus_items, 0);
    assert_eq!(scale_loot(&table(), 1.5).bonus_items, 1);
}

#[test]
fn test_loot_scales_with_multiplier() {
    let easy = scale_loot(&table(), 0.8);
    let hard = scale_loot(&table(), 1.5);

    assert!(easy.rarity_chance < 0.1);
    assert!(hard.rarity_chance > 0.1);
    assert!(hard.quality > easy.quality);
    assert!(hard.quantity >= easy.quantity);
    assert!(hard.quality <= 10);
}

#[test]
fn test_rarity_chance_is_capped() {
    let table = LootTable {
        rarity_chance: 0.9,
        quantity: 1,
        quality: 10,
    };
    let scaled = scale_loot(&table, 1.5);
    assert_eq!(scaled.rarity_chance, 1.0);
    assert_eq!(scaled.quality, 10);
}

#[test]
fn test_experience_reference_values() {
    assert_eq!(scale_experience(100, 1.2), 170);
    assert_eq!(scale_experience(100, 1.0), 150);
    assert_eq!(scale_experience(100, 0.8), 130);
    assert_eq!(scale_experience(0, 1.5), 0);
}

#[test]
fn test_applier_delegates_to_free_functions() {
    let applier = applier(1);
    assert_eq!(applier.scale_experience(100, 1.2), scale_experience(100, 1.2));
    assert_eq!(applier.scale_loot(&table(), 1.4), scale_loot(&table(), 1.4));
}

// ============================================================================
// Enemies
// ============================================================================

#[test]
fn test_same_seed_scales_identically() {
    let base = Enemy::new("Cave Troll", 20, 2_000, 150);
    let mut a = applier(42);
    let mut b = applier(42);
    for _ in 0..20 {
        assert_eq!(a.scale_enemy(&base, 30, 1.1), b.scale_enemy(&base, 30, 1.1));
    }
}

#[test]
fn test_harder_multiplier_means_tougher_enemies_on_average() {
    let base = Enemy::new("Cave Troll", 20, 2_000, 150);
    let mut applier = applier(7);

    let mean_hp = |applier: &mut ScalingApplier<ChaCha8Rng>, multiplier: f64| {
        (0..500)
            .map(|_| applier.scale_enemy(&base, 30, multiplier).max_hp as f64)
            .sum::<f64>()
            / 500.0
    };
    let easy = mean_hp(&mut applier, 0.8);
    let hard = mean_hp(&mut applier, 1.5);
    assert!(hard > easy * 1.6, "easy {easy} hard {hard}");
}

#[test]
fn test_scaled_enemy_is_tagged_and_fresh() {
    let mut base = Enemy::new("Frost Wraith", 50, 800, 60);
    base.current_hp = 300;
    base.defense = 12;

    let scaled = applier(3).scale_enemy(&base, 50, 1.45);
    assert_eq!(scaled.current_hp, scaled.max_hp);
    assert_eq!(scaled.defense, 12);
    assert_eq!(scaled.difficulty_color, Some(DifficultyColor::Deadly));
    // 0.9 + 0.45 * 0.5
    assert!((scaled.speed - 1.125).abs() < 1e-9);
}

#[test]
fn test_low_level_player_never_gets_level_zero_enemies() {
    let base = Enemy::new("Slime", 1, 10, 1);
    let mut applier = applier(9);
    for _ in 0..100 {
        let scaled = applier.scale_enemy(&base, 0, 0.8);
        assert!(scaled.level >= 1);
        assert!(scaled.max_hp >= 1);
        assert!(scaled.damage >= 1);
    }
}

// ============================================================================
// Bosses
// ============================================================================

#[test]
fn test_boss_party_and_phase_scaling() {
    let boss = BossTemplate::new("Storm Leviathan", 10_000, 200, 3).with_phase_abilities(vec![
        vec!["Tidal Slam".to_string()],
        vec![],
        vec!["Maelstrom".to_string(), "Lightning Crown".to_string()],
    ]);
    let scaled = applier(1).scale_boss(&boss, 60, 4, 1.2, 0.5);

    // party of 4: 1 + 3 * 0.5 = 2.5, boss scale = 1.2 * 2.5 = 3.0
    assert_eq!(scaled.party_size, 4);
    assert_eq!(scaled.phases.len(), 3);
    assert_eq!(scaled.phase(1).unwrap().health, 30_000);
    assert_eq!(scaled.phase(2).unwrap().health, 39_000);
    assert_eq!(scaled.phase(3).unwrap().health, 48_000);
    assert_eq!(scaled.phase(1).unwrap().damage, 600);
    assert_eq!(scaled.total_health(), 117_000);
    assert!(scaled.phase(2).unwrap().abilities.is_empty());
    assert_eq!(scaled.phase(3).unwrap().abilities.len(), 2);
    assert!(scaled.phase(4).is_none());
    assert_eq!(scaled.level, 60);
}

#[test]
fn test_boss_degenerate_inputs() {
    let boss = BossTemplate::new("Training Golem", 1_000, 10, 0);
    let scaled = applier(1).scale_boss(&boss, 0, 0, 1.0, 0.5);
    assert_eq!(scaled.party_size, 1);
    assert_eq!(scaled.level, 1);
    assert_eq!(scaled.phases.len(), 1);
    assert_eq!(scaled.total_health(), 1_000);
}

#[test]
fn test_enrage_timer_bands() {
    let applier = applier(1);
    let boss = BossTemplate::new("Ancient Dragon", 50_000, 500, 2);

    let skilled = applier.scale_boss(&boss, 100, 1, 1.0, 0.9);
    let middling = applier.scale_boss(&boss, 100, 1, 1.0, 0.5);
    let novice = applier.scale_boss(&boss, 100, 1, 1.0, 0.2);

    assert_eq!(skilled.enrage_timer, Duration::from_secs(180));
    assert_eq!(middling.enrage_timer, Duration::from_secs(300));
    assert_eq!(novice.enrage_timer, Duration::from_secs(600));

    // Band edges belong to the default timer
    assert_eq!(applier.enrage_timer(0.8), Duration::from_secs(300));
    assert_eq!(applier.enrage_timer(0.3), Duration::from_secs(300));
}

#[test]
fn test_enrage_timers_follow_config() {
    let config = DifficultyConfig {
        enrage_default_secs: 240,
        ..Default::default()
    };
    let applier = ScalingApplier::new(&config, ChaCha8Rng::seed_from_u64(0));
    assert_eq!(applier.enrage_timer(0.5), Duration::from_secs(240));
}

#[test]
fn test_entropy_applier_still_respects_ranges() {
    let mut applier = ScalingApplier::from_entropy(&DifficultyConfig::default());
    let base = Enemy::new("Dune Scorpion", 10, 100, 10);
    let scaled = applier.scale_enemy(&base, 10, 1.0);
    assert!((8..=15).contains(&scaled.level));
    assert!((90..=110).contains(&scaled.max_hp));
}
