//! The per-player difficulty engine.
//!
//! One engine is created per play session and owned by whatever drives that
//! player's tick. [`DifficultyEngine::update`] is the single per-tick entry
//! point: it advances time, expires the death penalty, folds in telemetry,
//! re-checks the mastery tier and moves the multiplier a step toward its
//! target. Spawn and reward code reads [`DifficultyEngine::multiplier`].

use super::penalty::DeathPenaltyController;
use super::types::{DifficultyEvent, DifficultySnapshot, DifficultyState};
use crate::core::clock::{Clock, SystemClock};
use crate::core::config::DifficultyConfig;
use crate::core::constants::NEUTRAL_ZONE_MULTIPLIER;
use crate::core::error::Result;
use crate::mastery::{MasteryClassifier, MasteryRewards, MasteryTier, StandardMasteryRewards};
use crate::skill::{CombatStats, SkillMetrics, SkillTracker};
use crate::zones::{Position, StaticZoneRegistry, ZoneRegistry};

pub struct DifficultyEngine {
    config: DifficultyConfig,
    clock: Box<dyn Clock>,
    zones: Box<dyn ZoneRegistry>,
    rewards: Box<dyn MasteryRewards>,
    tracker: SkillTracker,
    penalty: DeathPenaltyController,
    mastery: MasteryClassifier,
    state: DifficultyState,
    player_position: Option<Position>,
    zone_id: Option<u32>,
    zone_multiplier: f64,
}

impl DifficultyEngine {
    /// Engine on the wall clock with no zones and the stock reward table.
    pub fn new(config: DifficultyConfig) -> Result<Self> {
        Self::with_clock(config, SystemClock)
    }

    pub fn with_clock(config: DifficultyConfig, clock: impl Clock + 'static) -> Result<Self> {
        config.validate()?;
        let initial = DifficultyState {
            multiplier: config.initial_multiplier,
            target: config.initial_multiplier,
        };
        Ok(Self {
            tracker: SkillTracker::new(&config),
            penalty: DeathPenaltyController::new(&config),
            mastery: MasteryClassifier::new(&config),
            clock: Box::new(clock),
            zones: Box::new(StaticZoneRegistry::new()),
            rewards: Box::new(StandardMasteryRewards),
            state: initial,
            player_position: None,
            zone_id: None,
            zone_multiplier: NEUTRAL_ZONE_MULTIPLIER,
            config,
        })
    }

    pub fn with_zones(mut self, zones: impl ZoneRegistry + 'static) -> Self {
        self.zones = Box::new(zones);
        self
    }

    pub fn with_rewards(mut self, rewards: impl MasteryRewards + 'static) -> Self {
        self.rewards = Box::new(rewards);
        self
    }

    pub fn config(&self) -> &DifficultyConfig {
        &self.config
    }

    pub fn multiplier(&self) -> f64 {
        self.state.multiplier
    }

    pub fn target_multiplier(&self) -> f64 {
        self.state.target
    }

    pub fn skill_level(&self) -> f64 {
        self.tracker.skill_level()
    }

    pub fn metrics(&self) -> &SkillMetrics {
        self.tracker.metrics()
    }

    pub fn mastery_tier(&self) -> MasteryTier {
        self.mastery.current_tier()
    }

    pub fn death_count(&self) -> u32 {
        self.penalty.death_count()
    }

    pub fn penalty_active(&self) -> bool {
        self.penalty.is_active()
    }

    /// Zone the player was in at the last update.
    pub fn current_zone_id(&self) -> Option<u32> {
        self.zone_id
    }

    pub fn zone_multiplier(&self) -> f64 {
        self.zone_multiplier
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Sets where the player is. Takes effect on the next update.
    pub fn set_player_position(&mut self, position: Option<Position>) {
        self.player_position = position;
    }

    /// Records a death and starts (or restarts) the penalty window.
    pub fn on_player_death(&mut self) -> DifficultyEvent {
        let now = self.clock.now_ms();
        let penalty = self.penalty.on_player_death(now);
        DifficultyEvent::PenaltyApplied {
            death_count: self.penalty.death_count(),
            reduction: penalty.reduction_amount,
        }
    }

    /// Runs one engine tick.
    ///
    /// `delta_ms` is the host frame time; only game-time clocks use it.
    /// `combat_stats` is the latest telemetry snapshot, if the combat system
    /// produced one this tick. Snapshots inside the throttle window are ignored.
    pub fn update(&mut self, delta_ms: u64, combat_stats: Option<&CombatStats>) -> Vec<DifficultyEvent> {
        let mut events = Vec::new();

        self.clock.advance(delta_ms);
        let now = self.clock.now_ms();

        if self.penalty.tick(now) {
            events.push(DifficultyEvent::PenaltyExpired {
                death_count: self.penalty.death_count(),
            });
        }

        if let Some(stats) = combat_stats {
            let previous = self.tracker.skill_level();
            if let Some(skill_level) = self.tracker.update(stats, now) {
                events.push(DifficultyEvent::SkillUpdated {
                    previous,
                    skill_level,
                });
                if let Some(change) =
                    self.mastery
                        .on_level_change(previous, skill_level, self.rewards.as_ref())
                {
                    events.push(DifficultyEvent::MasteryChanged(change));
                }
            }
        }

        if let Some(event) = self.refresh_zone() {
            events.push(event);
        }

        self.step_multiplier();
        events
    }

    /// Target multiplier for the current skill, zone and penalty state.
    ///
    /// The skill maps linearly onto [min, max] (0.8 + 0.7 * skill with the
    /// defaults), then the zone and penalty factors apply, then the result
    /// is clamped back into [min, max].
    pub fn calculate_target(&self) -> f64 {
        let min = self.config.min_multiplier;
        let max = self.config.max_multiplier;

        let skill_target = (min + self.tracker.skill_level() * (max - min)).clamp(min, max);
        let mut target = skill_target * self.zone_multiplier;
        if self.penalty.is_active() {
            target *= 1.0 - self.penalty.active_reduction();
        }
        target.clamp(min, max)
    }

    fn step_multiplier(&mut self) {
        let target = self.calculate_target();
        let smoothing = self.config.multiplier_smoothing;
        let next = self.state.multiplier * smoothing + target * (1.0 - smoothing);

        self.state = DifficultyState {
            multiplier: next.clamp(self.config.min_multiplier, self.config.max_multiplier),
            target,
        };
        tracing::trace!(
            multiplier = self.state.multiplier,
            target,
            "difficulty multiplier stepped"
        );
    }

    /// Re-resolves the player's zone. Returns an event when it changed.
    fn refresh_zone(&mut self) -> Option<DifficultyEvent> {
        let zone = self
            .player_position
            .as_ref()
            .and_then(|position| self.zones.zone_at(position));

        // The third field carries a rejected multiplier, reported once per entry.
        let (zone_id, multiplier, unusable) = match zone {
            Some(zone) if zone.difficulty_multiplier.is_finite() && zone.difficulty_multiplier > 0.0 => {
                (Some(zone.id), zone.difficulty_multiplier, None)
            }
            Some(zone) => (
                Some(zone.id),
                NEUTRAL_ZONE_MULTIPLIER,
                Some(zone.difficulty_multiplier),
            ),
            None => (None, NEUTRAL_ZONE_MULTIPLIER, None),
        };

        self.zone_multiplier = multiplier;
        if zone_id == self.zone_id {
            return None;
        }

        if let Some(rejected) = unusable {
            tracing::warn!(
                zone_id = ?zone_id,
                multiplier = rejected,
                "ignoring unusable zone multiplier"
            );
        }

        let from = self.zone_id;
        self.zone_id = zone_id;
        tracing::debug!(?from, to = ?zone_id, zone_multiplier = multiplier, "zone changed");
        Some(DifficultyEvent::ZoneChanged { from, to: zone_id })
    }

    /// Restores every piece of session state to its starting value.
    pub fn reset(&mut self) {
        self.tracker.reset();
        self.penalty.reset();
        self.mastery.reset(self.config.initial_skill_level);
        self.state = DifficultyState {
            multiplier: self.config.initial_multiplier,
            target: self.config.initial_multiplier,
        };
        self.player_position = None;
        self.zone_id = None;
        self.zone_multiplier = NEUTRAL_ZONE_MULTIPLIER;
        tracing::info!("difficulty engine reset");
    }

    pub fn snapshot(&self) -> DifficultySnapshot {
        DifficultySnapshot {
            multiplier: self.state.multiplier,
            target: self.state.target,
            skill_level: self.tracker.skill_level(),
            mastery_tier: self.mastery.current_tier(),
            death_count: self.penalty.death_count(),
            penalty: *self.penalty.penalty(),
            zone_id: self.zone_id,
            zone_multiplier: self.zone_multiplier,
            metrics: self.tracker.metrics().clone(),
        }
    }
}

impl std::fmt::Debug for DifficultyEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DifficultyEngine")
            .field("state", &self.state)
            .field("skill_level", &self.tracker.skill_level())
            .field("mastery", &self.mastery.current_tier())
            .field("penalty", self.penalty.penalty())
            .field("zone_id", &self.zone_id)
            .finish_non_exhaustive()
    }
}
