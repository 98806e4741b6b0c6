//! Temporary difficulty relief after the player dies.

use crate::core::config::DifficultyConfig;
use serde::{Deserialize, Serialize};

/// Current death-penalty window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DeathPenalty {
    pub active: bool,
    /// Fraction removed from the difficulty target while active.
    pub reduction_amount: f64,
    pub start_time_ms: u64,
    pub duration_ms: u64,
}

impl DeathPenalty {
    /// Milliseconds left before expiry at `now_ms` (0 when inactive).
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        if !self.active {
            return 0;
        }
        let elapsed = now_ms.saturating_sub(self.start_time_ms);
        self.duration_ms.saturating_sub(elapsed)
    }
}

/// Counts deaths and manages the penalty window.
#[derive(Debug, Clone)]
pub struct DeathPenaltyController {
    death_count: u32,
    penalty: DeathPenalty,
    base_reduction: f64,
    reduction_per_death: f64,
    max_counted_deaths: u32,
    duration_ms: u64,
}

impl DeathPenaltyController {
    pub fn new(config: &DifficultyConfig) -> Self {
        Self {
            death_count: 0,
            penalty: DeathPenalty::default(),
            base_reduction: config.penalty_base_reduction,
            reduction_per_death: config.penalty_reduction_per_death,
            max_counted_deaths: config.penalty_max_counted_deaths,
            duration_ms: config.penalty_duration_ms,
        }
    }

    pub fn death_count(&self) -> u32 {
        self.death_count
    }

    pub fn penalty(&self) -> &DeathPenalty {
        &self.penalty
    }

    pub fn is_active(&self) -> bool {
        self.penalty.active
    }

    /// Reduction currently applied, 0 when no penalty is active.
    pub fn active_reduction(&self) -> f64 {
        if self.penalty.active {
            self.penalty.reduction_amount
        } else {
            0.0
        }
    }

    /// Records a death and (re)starts the penalty window at `now_ms`.
    /// A death during an active window restarts it with the deeper reduction.
    pub fn on_player_death(&mut self, now_ms: u64) -> DeathPenalty {
        self.death_count = self.death_count.saturating_add(1);
        let counted = self.death_count.min(self.max_counted_deaths);
        let reduction = self.base_reduction + self.reduction_per_death * counted as f64;

        self.penalty = DeathPenalty {
            active: true,
            reduction_amount: reduction.clamp(0.0, 1.0),
            start_time_ms: now_ms,
            duration_ms: self.duration_ms,
        };

        tracing::info!(
            death_count = self.death_count,
            reduction = self.penalty.reduction_amount,
            "death penalty applied"
        );
        self.penalty
    }

    /// Expires the penalty once more than `duration_ms` has elapsed.
    /// Returns true only on the tick that deactivates it.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if !self.penalty.active {
            return false;
        }
        if now_ms.saturating_sub(self.penalty.start_time_ms) > self.penalty.duration_ms {
            self.penalty.active = false;
            tracing::info!(death_count = self.death_count, "death penalty expired");
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.death_count = 0;
        self.penalty = DeathPenalty::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> DeathPenaltyController {
        DeathPenaltyController::new(&DifficultyConfig::default())
    }

    #[test]
    fn test_inactive_by_default() {
        let c = controller();
        assert!(!c.is_active());
        assert_eq!(c.death_count(), 0);
        assert_eq!(c.active_reduction(), 0.0);
    }

    #[test]
    fn test_reduction_grows_then_caps() {
        let mut c = controller();
        let mut previous = 0.0;
        for death in 1..=5 {
            let penalty = c.on_player_death(0);
            assert!(
                penalty.reduction_amount > previous,
                "death {death} should deepen the reduction"
            );
            previous = penalty.reduction_amount;
        }
        assert!((previous - 0.35).abs() < 1e-12);

        for _ in 0..10 {
            let penalty = c.on_player_death(0);
            assert!((penalty.reduction_amount - 0.35).abs() < 1e-12);
        }
        assert_eq!(c.death_count(), 15);
    }

    #[test]
    fn test_first_death_reduction() {
        let mut c = controller();
        let penalty = c.on_player_death(1_000);
        assert!((penalty.reduction_amount - 0.15).abs() < 1e-12);
        assert_eq!(penalty.start_time_ms, 1_000);
        assert_eq!(penalty.duration_ms, 300_000);
    }

    #[test]
    fn test_expires_exactly_once_after_duration() {
        let mut c = controller();
        c.on_player_death(0);

        assert!(!c.tick(299_999));
        assert!(!c.tick(300_000), "not expired at exactly the duration");
        assert!(c.is_active());

        assert!(c.tick(300_001));
        assert!(!c.is_active());
        assert!(!c.tick(300_002));
        assert!(!c.tick(900_000));
    }

    #[test]
    fn test_death_restarts_window() {
        let mut c = controller();
        c.on_player_death(0);
        c.on_player_death(200_000);
        assert!(!c.tick(300_001));
        assert!(c.tick(500_001));
    }

    #[test]
    fn test_remaining_time() {
        let mut c = controller();
        assert_eq!(c.penalty().remaining_ms(0), 0);
        c.on_player_death(10_000);
        assert_eq!(c.penalty().remaining_ms(110_000), 200_000);
        assert_eq!(c.penalty().remaining_ms(900_000), 0);
    }

    #[test]
    fn test_reset_clears_deaths() {
        let mut c = controller();
        c.on_player_death(0);
        c.on_player_death(0);
        c.reset();
        assert_eq!(c.death_count(), 0);
        assert!(!c.is_active());
        let penalty = c.on_player_death(0);
        assert!((penalty.reduction_amount - 0.15).abs() < 1e-12);
    }
}
