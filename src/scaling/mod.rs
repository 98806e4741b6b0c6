//! Difficulty scaling for spawns and rewards.

pub mod applier;
pub mod types;

pub use applier::{scale_experience, scale_loot, ScalingApplier};
pub use types::{
    BossPhase, BossTemplate, DifficultyColor, Enemy, LootTable, ScaledBoss, ScaledLoot,
};
