use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete skill bucket used to gate rewards and messaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MasteryTier {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
    Master,
}

impl MasteryTier {
    /// All tiers from lowest to highest.
    pub const ALL: [MasteryTier; 5] = [
        MasteryTier::Beginner,
        MasteryTier::Intermediate,
        MasteryTier::Advanced,
        MasteryTier::Expert,
        MasteryTier::Master,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MasteryTier::Beginner => "Beginner",
            MasteryTier::Intermediate => "Intermediate",
            MasteryTier::Advanced => "Advanced",
            MasteryTier::Expert => "Expert",
            MasteryTier::Master => "Master",
        }
    }
}

impl fmt::Display for MasteryTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TierDirection {
    Upgrade,
    Downgrade,
}

/// Reward granted on reaching a tier. Content is supplied by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasteryReward {
    pub title: String,
    pub bonus_xp_percent: u32,
}

/// Raised whenever the classified tier differs from the recorded one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierChange {
    pub from: MasteryTier,
    pub to: MasteryTier,
    pub direction: TierDirection,
    pub skill_level: f64,
    /// Present only when a reward lookup happened and found something.
    pub reward: Option<MasteryReward>,
}

impl TierChange {
    pub fn message(&self) -> String {
        match self.direction {
            TierDirection::Upgrade => format!("Combat mastery rose to {}!", self.to),
            TierDirection::Downgrade => format!("Combat mastery fell to {}", self.to),
        }
    }
}

/// Reward lookup for tier changes.
pub trait MasteryRewards: Send {
    fn reward_for(&self, tier: MasteryTier) -> Option<MasteryReward>;
}

/// Stock reward table: a title and an XP bonus for every tier above Beginner.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardMasteryRewards;

impl MasteryRewards for StandardMasteryRewards {
    fn reward_for(&self, tier: MasteryTier) -> Option<MasteryReward> {
        let (title, bonus_xp_percent) = match tier {
            MasteryTier::Beginner => return None,
            MasteryTier::Intermediate => ("Seasoned Fighter", 5),
            MasteryTier::Advanced => ("Veteran Duelist", 10),
            MasteryTier::Expert => ("Blade Dancer", 15),
            MasteryTier::Master => ("Untouchable", 25),
        };
        Some(MasteryReward {
            title: title.to_string(),
            bonus_xp_percent,
        })
    }
}

/// Reward table that never grants anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMasteryRewards;

impl MasteryRewards for NoMasteryRewards {
    fn reward_for(&self, _tier: MasteryTier) -> Option<MasteryReward> {
        None
    }
}
