use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Telemetry snapshot reported by the combat subsystem.
///
/// Counters describe the window since the combat subsystem's last report.
/// Optional fields that are `None` leave the matching metric untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatStats {
    pub dodge_attempts: u32,
    pub successful_dodges: u32,
    pub last_reaction_time_ms: Option<f64>,
    pub average_combo_length: Option<f64>,
    pub average_combat_duration_ms: Option<f64>,
    pub damage_taken: f64,
    pub potential_damage: f64,
    pub perfect_dodges: Option<u32>,
}

/// Fixed-capacity FIFO of reaction times. Pushing past capacity drops the oldest sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionSamples {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl ReactionSamples {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, reaction_ms: f64) {
        self.samples.push_back(reaction_ms);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Mean of the stored samples, `None` when empty.
    pub fn average(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        Some(self.samples.iter().sum::<f64>() / self.samples.len() as f64)
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.samples.iter()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

/// Smoothed skill metrics for one player session.
///
/// A metric is `None` until the first snapshot that can produce it arrives,
/// and is excluded from the skill blend until then.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMetrics {
    pub dodge_success_rate: Option<f64>,
    pub reaction_times_ms: ReactionSamples,
    pub combo_usage: Option<f64>,
    /// Not clamped: goes negative when damage taken exceeds the potential damage.
    pub damage_avoidance: Option<f64>,
    /// Last reported value, not a running total.
    pub perfect_dodges: Option<u32>,
    pub average_combat_duration_ms: Option<f64>,
    pub skill_level: f64,
    pub last_update_ms: Option<u64>,
}

impl SkillMetrics {
    pub fn new(initial_skill_level: f64, reaction_capacity: usize) -> Self {
        Self {
            dodge_success_rate: None,
            reaction_times_ms: ReactionSamples::new(reaction_capacity),
            combo_usage: None,
            damage_avoidance: None,
            perfect_dodges: None,
            average_combat_duration_ms: None,
            skill_level: initial_skill_level.clamp(0.0, 1.0),
            last_update_ms: None,
        }
    }
}
