//! Tunable difficulty configuration.
//!
//! Every balance number the engine uses lives here so designers can retune
//! a build from a TOML or JSON file without touching code. Missing keys fall
//! back to the defaults in [`crate::core::constants`].

use super::constants::*;
use super::error::{DifficultyError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Relative importance of each skill component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillWeights {
    pub dodge: f64,
    pub reaction: f64,
    pub combo: f64,
    pub avoidance: f64,
    pub perfect_dodge: f64,
}

impl Default for SkillWeights {
    fn default() -> Self {
        Self {
            dodge: DODGE_WEIGHT,
            reaction: REACTION_WEIGHT,
            combo: COMBO_WEIGHT,
            avoidance: AVOIDANCE_WEIGHT,
            perfect_dodge: PERFECT_DODGE_WEIGHT,
        }
    }
}

impl SkillWeights {
    fn as_array(&self) -> [f64; 5] {
        [
            self.dodge,
            self.reaction,
            self.combo,
            self.avoidance,
            self.perfect_dodge,
        ]
    }
}

/// Configuration for the difficulty engine and its collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyConfig {
    // === MULTIPLIER ===
    /// Lower clamp for the difficulty multiplier.
    pub min_multiplier: f64,
    /// Upper clamp for the difficulty multiplier.
    pub max_multiplier: f64,
    /// Multiplier at session start and after `reset()`.
    pub initial_multiplier: f64,
    /// Weight of the previous multiplier in each tick's smoothing step.
    ///
    /// At 0.95 the multiplier closes 5% of the gap to its target per tick.
    pub multiplier_smoothing: f64,

    // === SKILL ===
    /// Skill level at session start and after `reset()`.
    pub initial_skill_level: f64,
    /// Weight of the previous skill level when blending a new estimate.
    pub skill_smoothing: f64,
    /// Telemetry snapshots arriving sooner than this after the last
    /// accepted one are ignored.
    pub skill_update_interval_ms: u64,
    /// Number of reaction samples kept for the rolling average.
    pub reaction_sample_capacity: usize,
    /// Average reaction time that scores zero.
    pub reaction_ceiling_ms: f64,
    /// Average combo length that scores one.
    pub combo_ceiling: f64,
    /// Perfect dodges per snapshot that score one.
    pub perfect_dodge_ceiling: f64,
    pub weights: SkillWeights,

    // === DEATH PENALTY ===
    pub penalty_base_reduction: f64,
    pub penalty_reduction_per_death: f64,
    pub penalty_max_counted_deaths: u32,
    pub penalty_duration_ms: u64,

    // === BOSS ENRAGE ===
    pub enrage_skilled_secs: u64,
    pub enrage_default_secs: u64,
    pub enrage_novice_secs: u64,
    pub enrage_skilled_threshold: f64,
    pub enrage_novice_threshold: f64,

    // === MASTERY ===
    /// Thresholds for Intermediate, Advanced, Expert and Master, ascending.
    pub mastery_thresholds: [f64; 4],
    /// When true, a tier downgrade also looks up a reward.
    pub reward_downgrades: bool,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            min_multiplier: MIN_MULTIPLIER,
            max_multiplier: MAX_MULTIPLIER,
            initial_multiplier: INITIAL_MULTIPLIER,
            multiplier_smoothing: MULTIPLIER_SMOOTHING,
            initial_skill_level: INITIAL_SKILL_LEVEL,
            skill_smoothing: SKILL_SMOOTHING,
            skill_update_interval_ms: SKILL_UPDATE_INTERVAL_MS,
            reaction_sample_capacity: REACTION_SAMPLE_CAPACITY,
            reaction_ceiling_ms: REACTION_CEILING_MS,
            combo_ceiling: COMBO_CEILING,
            perfect_dodge_ceiling: PERFECT_DODGE_CEILING,
            weights: SkillWeights::default(),
            penalty_base_reduction: PENALTY_BASE_REDUCTION,
            penalty_reduction_per_death: PENALTY_REDUCTION_PER_DEATH,
            penalty_max_counted_deaths: PENALTY_MAX_COUNTED_DEATHS,
            penalty_duration_ms: PENALTY_DURATION_MS,
            enrage_skilled_secs: ENRAGE_SKILLED_SECS,
            enrage_default_secs: ENRAGE_DEFAULT_SECS,
            enrage_novice_secs: ENRAGE_NOVICE_SECS,
            enrage_skilled_threshold: ENRAGE_SKILLED_THRESHOLD,
            enrage_novice_threshold: ENRAGE_NOVICE_THRESHOLD,
            mastery_thresholds: [
                MASTERY_INTERMEDIATE_THRESHOLD,
                MASTERY_ADVANCED_THRESHOLD,
                MASTERY_EXPERT_THRESHOLD,
                MASTERY_MASTER_THRESHOLD,
            ],
            reward_downgrades: false,
        }
    }
}

impl DifficultyConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a JSON document.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a config file. `.json` files are parsed as JSON, anything else as TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let result = if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        };

        if let Err(ref e) = result {
            tracing::warn!(path = %path.display(), error = %e, "rejected difficulty config");
        }
        result
    }

    /// Checks that every value is usable by the engine.
    pub fn validate(&self) -> Result<()> {
        let floats = [
            ("min_multiplier", self.min_multiplier),
            ("max_multiplier", self.max_multiplier),
            ("initial_multiplier", self.initial_multiplier),
            ("multiplier_smoothing", self.multiplier_smoothing),
            ("initial_skill_level", self.initial_skill_level),
            ("skill_smoothing", self.skill_smoothing),
            ("reaction_ceiling_ms", self.reaction_ceiling_ms),
            ("combo_ceiling", self.combo_ceiling),
            ("perfect_dodge_ceiling", self.perfect_dodge_ceiling),
            ("penalty_base_reduction", self.penalty_base_reduction),
            ("penalty_reduction_per_death", self.penalty_reduction_per_death),
            ("enrage_skilled_threshold", self.enrage_skilled_threshold),
            ("enrage_novice_threshold", self.enrage_novice_threshold),
        ];
        if let Some((name, _)) = floats.iter().find(|(_, v)| !v.is_finite()) {
            return Err(invalid(format!("{name} must be finite")));
        }

        if self.min_multiplier <= 0.0 {
            return Err(invalid("min_multiplier must be positive"));
        }
        if self.min_multiplier > self.max_multiplier {
            return Err(invalid(format!(
                "min_multiplier {} exceeds max_multiplier {}",
                self.min_multiplier, self.max_multiplier
            )));
        }
        if !(self.min_multiplier..=self.max_multiplier).contains(&self.initial_multiplier) {
            return Err(invalid("initial_multiplier must lie within the multiplier bounds"));
        }
        if !(0.0..=1.0).contains(&self.initial_skill_level) {
            return Err(invalid("initial_skill_level must lie within [0, 1]"));
        }
        for (name, value) in [
            ("multiplier_smoothing", self.multiplier_smoothing),
            ("skill_smoothing", self.skill_smoothing),
        ] {
            if !(0.0..1.0).contains(&value) {
                return Err(invalid(format!("{name} must lie within [0, 1)")));
            }
        }

        if self.reaction_sample_capacity == 0 {
            return Err(invalid("reaction_sample_capacity must be at least 1"));
        }
        if self.reaction_ceiling_ms <= 0.0
            || self.combo_ceiling <= 0.0
            || self.perfect_dodge_ceiling <= 0.0
        {
            return Err(invalid("skill ceilings must be positive"));
        }
        let weights = self.weights.as_array();
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(invalid("skill weights must be finite and non-negative"));
        }
        if weights.iter().sum::<f64>() <= 0.0 {
            return Err(invalid("at least one skill weight must be positive"));
        }

        if self.penalty_duration_ms == 0 {
            return Err(invalid("penalty_duration_ms must be positive"));
        }
        let max_reduction = self.penalty_base_reduction
            + self.penalty_reduction_per_death * self.penalty_max_counted_deaths as f64;
        if self.penalty_base_reduction < 0.0
            || self.penalty_reduction_per_death < 0.0
            || max_reduction > 1.0
        {
            return Err(invalid("death penalty reduction must stay within [0, 1]"));
        }

        if self.enrage_novice_threshold > self.enrage_skilled_threshold {
            return Err(invalid(
                "enrage_novice_threshold must not exceed enrage_skilled_threshold",
            ));
        }

        let mut previous = 0.0;
        for threshold in self.mastery_thresholds {
            if !threshold.is_finite() || threshold <= previous || threshold > 1.0 {
                return Err(invalid(
                    "mastery thresholds must be strictly ascending within (0, 1]",
                ));
            }
            previous = threshold;
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> DifficultyError {
    DifficultyError::InvalidConfig(message.into())
}
