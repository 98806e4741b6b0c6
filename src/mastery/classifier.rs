//! Maps skill level to a [`MasteryTier`] and detects tier changes.

use super::types::{MasteryRewards, MasteryTier, TierChange, TierDirection};
use crate::core::config::DifficultyConfig;

#[derive(Debug, Clone)]
pub struct MasteryClassifier {
    /// Intermediate, Advanced, Expert, Master.
    thresholds: [f64; 4],
    reward_downgrades: bool,
    current: MasteryTier,
}

impl MasteryClassifier {
    /// Starts at the tier matching the configured initial skill level.
    pub fn new(config: &DifficultyConfig) -> Self {
        let mut classifier = Self {
            thresholds: config.mastery_thresholds,
            reward_downgrades: config.reward_downgrades,
            current: MasteryTier::Beginner,
        };
        classifier.current = classifier.classify(config.initial_skill_level);
        classifier
    }

    pub fn current_tier(&self) -> MasteryTier {
        self.current
    }

    /// Evaluated from Master downward; each threshold is inclusive.
    pub fn classify(&self, skill_level: f64) -> MasteryTier {
        let [intermediate, advanced, expert, master] = self.thresholds;
        if skill_level >= master {
            MasteryTier::Master
        } else if skill_level >= expert {
            MasteryTier::Expert
        } else if skill_level >= advanced {
            MasteryTier::Advanced
        } else if skill_level >= intermediate {
            MasteryTier::Intermediate
        } else {
            MasteryTier::Beginner
        }
    }

    /// Re-classifies after the skill level moved from `old_level` to `new_level`.
    ///
    /// Every tier change is reported, downgrades included. The reward table
    /// is only consulted on upgrades unless `reward_downgrades` is set.
    pub fn on_level_change(
        &mut self,
        old_level: f64,
        new_level: f64,
        rewards: &dyn MasteryRewards,
    ) -> Option<TierChange> {
        let tier = self.classify(new_level);
        if tier == self.current {
            return None;
        }

        let from = self.current;
        self.current = tier;
        let direction = if tier > from {
            TierDirection::Upgrade
        } else {
            TierDirection::Downgrade
        };
        let reward = match direction {
            TierDirection::Upgrade => rewards.reward_for(tier),
            TierDirection::Downgrade if self.reward_downgrades => rewards.reward_for(tier),
            TierDirection::Downgrade => None,
        };

        tracing::info!(
            from = %from,
            to = %tier,
            old_level,
            new_level,
            rewarded = reward.is_some(),
            "mastery tier changed"
        );

        Some(TierChange {
            from,
            to: tier,
            direction,
            skill_level: new_level,
            reward,
        })
    }

    /// Re-seeds the recorded tier without raising a change.
    pub fn reset(&mut self, skill_level: f64) {
        self.current = self.classify(skill_level);
    }
}
