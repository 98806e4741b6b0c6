use super::penalty::DeathPenalty;
use crate::mastery::{MasteryTier, TierChange};
use crate::skill::SkillMetrics;
use serde::{Deserialize, Serialize};

/// Smoothed multiplier and the target it is converging toward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyState {
    pub multiplier: f64,
    pub target: f64,
}

/// A single event produced by an engine update.
///
/// The host maps these to notifications and reward grants; the engine never
/// calls into UI code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DifficultyEvent {
    /// A telemetry snapshot was accepted and the skill level recomputed.
    SkillUpdated { previous: f64, skill_level: f64 },

    /// The player died and a penalty window started.
    PenaltyApplied { death_count: u32, reduction: f64 },

    /// The penalty window ran out.
    PenaltyExpired { death_count: u32 },

    /// The mastery tier changed, in either direction.
    MasteryChanged(TierChange),

    /// The player crossed a zone boundary. `None` means outside every zone.
    ZoneChanged { from: Option<u32>, to: Option<u32> },
}

/// Read-only view of an engine for debug overlays and telemetry export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultySnapshot {
    pub multiplier: f64,
    pub target: f64,
    pub skill_level: f64,
    pub mastery_tier: MasteryTier,
    pub death_count: u32,
    pub penalty: DeathPenalty,
    pub zone_id: Option<u32>,
    pub zone_multiplier: f64,
    pub metrics: SkillMetrics,
}
