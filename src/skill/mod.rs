//! Skill tracking: turns combat telemetry into a single skill level.

pub mod tracker;
pub mod types;

pub use tracker::SkillTracker;
pub use types::{CombatStats, ReactionSamples, SkillMetrics};
