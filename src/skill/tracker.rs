//! Converts combat telemetry into a smoothed skill level in [0, 1].

use super::types::{CombatStats, SkillMetrics};
use crate::core::config::{DifficultyConfig, SkillWeights};

/// Owns the session's [`SkillMetrics`] and the only code that mutates them.
#[derive(Debug, Clone)]
pub struct SkillTracker {
    metrics: SkillMetrics,
    update_interval_ms: u64,
    smoothing: f64,
    initial_skill_level: f64,
    reaction_ceiling_ms: f64,
    combo_ceiling: f64,
    perfect_dodge_ceiling: f64,
    weights: SkillWeights,
}

impl SkillTracker {
    pub fn new(config: &DifficultyConfig) -> Self {
        Self {
            metrics: SkillMetrics::new(
                config.initial_skill_level,
                config.reaction_sample_capacity,
            ),
            update_interval_ms: config.skill_update_interval_ms,
            smoothing: config.skill_smoothing,
            initial_skill_level: config.initial_skill_level,
            reaction_ceiling_ms: config.reaction_ceiling_ms,
            combo_ceiling: config.combo_ceiling,
            perfect_dodge_ceiling: config.perfect_dodge_ceiling,
            weights: config.weights,
        }
    }

    pub fn metrics(&self) -> &SkillMetrics {
        &self.metrics
    }

    pub fn skill_level(&self) -> f64 {
        self.metrics.skill_level
    }

    /// True once `update_interval_ms` has passed since the last accepted snapshot.
    /// The very first snapshot of a session is always accepted.
    pub fn is_due(&self, now_ms: u64) -> bool {
        match self.metrics.last_update_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.update_interval_ms,
        }
    }

    /// Folds a telemetry snapshot into the metrics.
    ///
    /// Returns false without touching anything when the throttle window has
    /// not elapsed. Zero denominators and missing fields leave their metric
    /// unchanged.
    pub fn record_combat_stats(&mut self, stats: &CombatStats, now_ms: u64) -> bool {
        if !self.is_due(now_ms) {
            return false;
        }

        let metrics = &mut self.metrics;

        if stats.dodge_attempts > 0 {
            let rate = stats.successful_dodges as f64 / stats.dodge_attempts as f64;
            metrics.dodge_success_rate = Some(rate.clamp(0.0, 1.0));
        }

        if let Some(reaction) = stats.last_reaction_time_ms.filter(|ms| ms.is_finite() && *ms >= 0.0) {
            metrics.reaction_times_ms.push(reaction);
        }

        if let Some(combo) = stats.average_combo_length.filter(|c| c.is_finite()) {
            metrics.combo_usage = Some(combo);
        }

        if stats.potential_damage > 0.0 && stats.damage_taken.is_finite() {
            metrics.damage_avoidance = Some(1.0 - stats.damage_taken / stats.potential_damage);
        }

        if let Some(perfect) = stats.perfect_dodges {
            metrics.perfect_dodges = Some(perfect);
        }

        if let Some(duration) = stats.average_combat_duration_ms.filter(|d| d.is_finite()) {
            metrics.average_combat_duration_ms = Some(duration);
        }

        metrics.last_update_ms = Some(now_ms);
        true
    }

    /// Weighted blend of the available metrics, renormalized over the weights
    /// actually used. `None` when no metric has been observed yet.
    pub fn calculate_skill_level(&self) -> Option<f64> {
        let m = &self.metrics;
        let w = &self.weights;

        let components = [
            (w.dodge, m.dodge_success_rate),
            (
                w.reaction,
                m.reaction_times_ms
                    .average()
                    .map(|avg| (1.0 - avg / self.reaction_ceiling_ms).max(0.0)),
            ),
            (
                w.combo,
                m.combo_usage.map(|c| (c / self.combo_ceiling).min(1.0)),
            ),
            (w.avoidance, m.damage_avoidance),
            (
                w.perfect_dodge,
                m.perfect_dodges
                    .map(|p| (p as f64 / self.perfect_dodge_ceiling).min(1.0)),
            ),
        ];

        let (score, weight) = components
            .iter()
            .filter_map(|(weight, value)| value.map(|v| (weight * v, *weight)))
            .fold((0.0, 0.0), |(s, tw), (ws, w)| (s + ws, tw + w));

        if weight <= 0.0 {
            return None;
        }
        Some((score / weight).clamp(0.0, 1.0))
    }

    /// Records a snapshot and, when accepted, blends the fresh estimate into
    /// the stored skill level. Returns the new skill level if it was recomputed.
    pub fn update(&mut self, stats: &CombatStats, now_ms: u64) -> Option<f64> {
        if !self.record_combat_stats(stats, now_ms) {
            return None;
        }

        let computed = self.calculate_skill_level()?;
        let previous = self.metrics.skill_level;
        let blended = previous * self.smoothing + computed * (1.0 - self.smoothing);
        self.metrics.skill_level = blended.clamp(0.0, 1.0);

        tracing::debug!(
            computed,
            previous,
            skill_level = self.metrics.skill_level,
            "skill level updated"
        );
        Some(self.metrics.skill_level)
    }

    /// Restores the session-start metrics.
    pub fn reset(&mut self) {
        self.metrics = SkillMetrics::new(
            self.initial_skill_level,
            self.metrics.reaction_times_ms.capacity(),
        );
    }
}
