//! Default balance numbers for the difficulty engine.
//!
//! `DifficultyConfig::default()` is built from these. Change once, test everywhere.

// =============================================================================
// DIFFICULTY MULTIPLIER
// =============================================================================

/// Lowest difficulty multiplier the engine will ever report.
pub const MIN_MULTIPLIER: f64 = 0.8;

/// Highest difficulty multiplier the engine will ever report.
pub const MAX_MULTIPLIER: f64 = 1.5;

/// Multiplier at the start of a session (neutral difficulty).
pub const INITIAL_MULTIPLIER: f64 = 1.0;

/// Weight of the previous multiplier in the per-tick smoothing step.
/// multiplier = multiplier * SMOOTHING + target * (1 - SMOOTHING)
pub const MULTIPLIER_SMOOTHING: f64 = 0.95;

/// Zone multiplier used when the player stands outside every zone.
pub const NEUTRAL_ZONE_MULTIPLIER: f64 = 1.0;

// =============================================================================
// SKILL TRACKING
// =============================================================================

/// Skill level at the start of a session.
pub const INITIAL_SKILL_LEVEL: f64 = 0.5;

/// Weight of the previous skill level when blending in a new estimate.
pub const SKILL_SMOOTHING: f64 = 0.8;

/// Minimum time between two accepted telemetry snapshots.
pub const SKILL_UPDATE_INTERVAL_MS: u64 = 5_000;

/// Reaction samples kept for the rolling average (oldest dropped first).
pub const REACTION_SAMPLE_CAPACITY: usize = 20;

/// Average reaction time at which the reaction score bottoms out at 0.
pub const REACTION_CEILING_MS: f64 = 1_000.0;

/// Average combo length that earns a full combo score.
pub const COMBO_CEILING: f64 = 5.0;

/// Perfect dodges per snapshot that earn a full perfect-dodge score.
pub const PERFECT_DODGE_CEILING: f64 = 10.0;

// Skill component weights (renormalized over the components actually present)
pub const DODGE_WEIGHT: f64 = 0.25;
pub const REACTION_WEIGHT: f64 = 0.2;
pub const COMBO_WEIGHT: f64 = 0.15;
pub const AVOIDANCE_WEIGHT: f64 = 0.25;
pub const PERFECT_DODGE_WEIGHT: f64 = 0.15;

// =============================================================================
// DEATH PENALTY
// =============================================================================

/// Difficulty reduction granted by the first death before per-death steps.
pub const PENALTY_BASE_REDUCTION: f64 = 0.1;

/// Extra reduction per recorded death.
pub const PENALTY_REDUCTION_PER_DEATH: f64 = 0.05;

/// Deaths beyond this count no longer deepen the reduction (0.1 + 0.05 * 5 = 0.35).
pub const PENALTY_MAX_COUNTED_DEATHS: u32 = 5;

/// How long a death penalty stays active (5 minutes).
pub const PENALTY_DURATION_MS: u64 = 300_000;

// =============================================================================
// ENEMY / BOSS / LOOT SCALING
// =============================================================================

/// Enemy level roll range, relative to the player level.
pub const ENEMY_LEVEL_VARIANCE_MIN: f64 = 0.8;
pub const ENEMY_LEVEL_VARIANCE_MAX: f64 = 1.5;

/// Enemy health roll range applied on top of the multiplier.
pub const ENEMY_HEALTH_VARIANCE_MIN: f64 = 0.9;
pub const ENEMY_HEALTH_VARIANCE_MAX: f64 = 1.1;

/// Enemy damage roll range applied on top of the multiplier.
pub const ENEMY_DAMAGE_VARIANCE_MIN: f64 = 0.95;
pub const ENEMY_DAMAGE_VARIANCE_MAX: f64 = 1.05;

/// Fraction of the multiplier's distance from 1.0 that carries into speed.
pub const ENEMY_SPEED_SENSITIVITY: f64 = 0.5;

/// Base speed factor before the multiplier adjustment.
pub const ENEMY_SPEED_BASE: f64 = 0.9;

/// Extra boss stats per additional party member.
pub const BOSS_PARTY_SCALING: f64 = 0.5;

/// Extra boss stats per phase beyond the first.
pub const BOSS_PHASE_SCALING: f64 = 0.3;

/// Enrage timers by skill band, in seconds.
pub const ENRAGE_SKILLED_SECS: u64 = 180;
pub const ENRAGE_DEFAULT_SECS: u64 = 300;
pub const ENRAGE_NOVICE_SECS: u64 = 600;

/// Skill above which the short enrage timer applies.
pub const ENRAGE_SKILLED_THRESHOLD: f64 = 0.8;

/// Skill below which the long enrage timer applies.
pub const ENRAGE_NOVICE_THRESHOLD: f64 = 0.3;

/// Loot quality bonus per point of multiplier above 1.0.
pub const LOOT_QUALITY_BONUS_FACTOR: f64 = 2.0;

/// Highest loot quality grade.
pub const LOOT_MAX_QUALITY: u32 = 10;

/// Multiplier above which bonus items start dropping.
pub const LOOT_BONUS_ITEM_THRESHOLD: f64 = 1.3;

/// Bonus items per point of multiplier above the threshold.
pub const LOOT_BONUS_ITEMS_PER_POINT: f64 = 5.0;

/// Base experience factor: exp = base * (EXP_BASE_FACTOR + multiplier).
pub const EXP_BASE_FACTOR: f64 = 0.5;

// =============================================================================
// MASTERY
// =============================================================================

pub const MASTERY_INTERMEDIATE_THRESHOLD: f64 = 0.5;
pub const MASTERY_ADVANCED_THRESHOLD: f64 = 0.7;
pub const MASTERY_EXPERT_THRESHOLD: f64 = 0.85;
pub const MASTERY_MASTER_THRESHOLD: f64 = 0.95;

/// Slack added before flooring derived counts so that values such as
/// (1.5 - 1.3) * 5 land on 1 instead of 0.9999999999999998.
pub const FLOOR_EPSILON: f64 = 1e-9;
