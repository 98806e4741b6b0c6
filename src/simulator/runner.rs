//! Main simulation runner.
//!
//! Each run drives a real [`DifficultyEngine`] on a game-time clock. A
//! synthetic player walks through the stock zones, reports telemetry once per
//! skill window and occasionally dies. Statistics are gathered from the
//! engine's events, the same way a host would consume them.

use super::config::SimConfig;
use super::profile::PlayerProfile;
use super::report::{RunStats, SimReport, TimeSample};
use crate::core::clock::TickClock;
use crate::core::error::Result;
use crate::difficulty::{DifficultyEngine, DifficultyEvent};
use crate::mastery::MasteryTier;
use crate::scaling::{scale_experience, Enemy, ScalingApplier};
use crate::zones::{get_zone, stock_registry, Position};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Experience an unscaled enemy is worth.
const BASE_ENEMY_EXP: u64 = 100;

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> Result<SimReport> {
    config.difficulty.validate()?;
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let run_stats = simulate_single_run(config, run_idx, &mut rng)?;
        tracing::info!(
            run = run_idx + 1,
            of = config.num_runs,
            skill = run_stats.final_skill,
            multiplier = run_stats.final_multiplier,
            tier = %run_stats.final_tier,
            deaths = run_stats.deaths,
            "run finished"
        );
        all_runs.push(run_stats);
    }

    Ok(SimReport::from_runs(all_runs, config))
}

/// Runs `base` once per player profile, in [`PlayerProfile::ALL`] order.
pub fn compare_profiles(base: &SimConfig) -> Result<Vec<SimReport>> {
    PlayerProfile::ALL
        .into_iter()
        .map(|profile| {
            run_simulation(&SimConfig {
                profile,
                ..base.clone()
            })
        })
        .collect()
}

/// Accumulates statistics from engine events during one run.
struct SimStats {
    deaths: u32,
    penalties_expired: u32,
    skill_updates: u32,
    tier_changes: u32,
    zone_changes: u32,
    ticks_per_tier: [u64; 5],
    ticks_in_penalty: u64,
    multiplier_sum: f64,
    min_multiplier: f64,
    max_multiplier: f64,
    encounters: u64,
    enemy_hp_sum: u64,
    total_exp: u64,
    samples: Vec<TimeSample>,
}

impl SimStats {
    fn new(initial_multiplier: f64) -> Self {
        Self {
            deaths: 0,
            penalties_expired: 0,
            skill_updates: 0,
            tier_changes: 0,
            zone_changes: 0,
            ticks_per_tier: [0; 5],
            ticks_in_penalty: 0,
            multiplier_sum: 0.0,
            min_multiplier: initial_multiplier,
            max_multiplier: initial_multiplier,
            encounters: 0,
            enemy_hp_sum: 0,
            total_exp: 0,
            samples: Vec::new(),
        }
    }

    fn process_event(&mut self, event: &DifficultyEvent, tick: u64) {
        match event {
            DifficultyEvent::SkillUpdated { .. } => self.skill_updates += 1,
            DifficultyEvent::PenaltyApplied { .. } => self.deaths += 1,
            DifficultyEvent::PenaltyExpired { .. } => self.penalties_expired += 1,
            DifficultyEvent::MasteryChanged(change) => {
                self.tier_changes += 1;
                tracing::debug!(tick, "{}", change.message());
            }
            DifficultyEvent::ZoneChanged { .. } => self.zone_changes += 1,
        }
    }

    fn record_tick(&mut self, engine: &DifficultyEngine) {
        let multiplier = engine.multiplier();
        self.multiplier_sum += multiplier;
        self.min_multiplier = self.min_multiplier.min(multiplier);
        self.max_multiplier = self.max_multiplier.max(multiplier);
        self.ticks_per_tier[tier_index(engine.mastery_tier())] += 1;
        if engine.penalty_active() {
            self.ticks_in_penalty += 1;
        }
    }
}

fn tier_index(tier: MasteryTier) -> usize {
    MasteryTier::ALL
        .iter()
        .position(|&t| t == tier)
        .unwrap_or_default()
}

/// Player level implied by the zone the engine last resolved.
fn player_level(engine: &DifficultyEngine) -> u32 {
    engine
        .current_zone_id()
        .and_then(get_zone)
        .map(|zone| zone.level_hint)
        .unwrap_or(1)
}

/// Simulate a single run of `ticks_per_run` engine ticks.
fn simulate_single_run(config: &SimConfig, run_idx: u32, rng: &mut ChaCha8Rng) -> Result<RunStats> {
    let mut engine = DifficultyEngine::with_clock(config.difficulty.clone(), TickClock::new())?
        .with_zones(stock_registry());
    let mut applier = ScalingApplier::new(&config.difficulty, ChaCha8Rng::seed_from_u64(rng.gen()));
    let reference_enemy = Enemy::new("Training Dummy", 1, 100, 10);

    let mut stats = SimStats::new(engine.multiplier());
    let report_interval = config.difficulty.skill_update_interval_ms.max(config.tick_ms);
    let mut since_report_ms = 0u64;

    for tick in 0..config.ticks_per_run {
        let progress = tick as f64 / config.ticks_per_run.max(1) as f64;
        let elapsed_secs = tick.saturating_mul(config.tick_ms) as f64 / 1_000.0;
        engine.set_player_position(Some(Position::new(
            elapsed_secs * config.travel_speed,
            0.0,
            0.0,
        )));

        since_report_ms = since_report_ms.saturating_add(config.tick_ms);
        let telemetry = if since_report_ms >= report_interval {
            since_report_ms = 0;

            let multiplier = engine.multiplier();
            let enemy = applier.scale_enemy(&reference_enemy, player_level(&engine), multiplier);
            stats.encounters += 1;
            stats.enemy_hp_sum += enemy.max_hp as u64;

            if rng.gen_bool(config.profile.death_chance(progress, multiplier)) {
                let event = engine.on_player_death();
                stats.process_event(&event, tick);
            } else {
                stats.total_exp += scale_experience(BASE_ENEMY_EXP, multiplier);
            }
            Some(config.profile.sample_stats(progress, rng))
        } else {
            None
        };

        for event in engine.update(config.tick_ms, telemetry.as_ref()) {
            stats.process_event(&event, tick);
        }
        stats.record_tick(&engine);

        if config.sample_every_ticks > 0 && tick % config.sample_every_ticks == 0 {
            stats.samples.push(TimeSample {
                run: run_idx,
                tick,
                game_time_s: elapsed_secs,
                skill_level: engine.skill_level(),
                multiplier: engine.multiplier(),
                target: engine.target_multiplier(),
                zone_id: engine.current_zone_id(),
                tier: engine.mastery_tier(),
                deaths: stats.deaths,
            });
        }
    }

    let ticks = config.ticks_per_run.max(1) as f64;
    Ok(RunStats {
        final_skill: engine.skill_level(),
        final_multiplier: engine.multiplier(),
        final_tier: engine.mastery_tier(),
        avg_multiplier: stats.multiplier_sum / ticks,
        min_multiplier: stats.min_multiplier,
        max_multiplier: stats.max_multiplier,
        deaths: stats.deaths,
        penalties_expired: stats.penalties_expired,
        skill_updates: stats.skill_updates,
        tier_changes: stats.tier_changes,
        zone_changes: stats.zone_changes,
        penalty_uptime: stats.ticks_in_penalty as f64 / ticks,
        ticks_per_tier: stats.ticks_per_tier,
        avg_enemy_hp: stats.enemy_hp_sum as f64 / stats.encounters.max(1) as f64,
        total_exp: stats.total_exp,
        enrage_secs: applier.enrage_timer(engine.skill_level()).as_secs(),
        samples: stats.samples,
    })
}
