//! Mastery tiers derived from the skill level.

pub mod classifier;
pub mod types;

pub use classifier::MasteryClassifier;
pub use types::{
    MasteryReward, MasteryRewards, MasteryTier, NoMasteryRewards, StandardMasteryRewards,
    TierChange, TierDirection,
};
