//! Simulation configuration.

use super::profile::PlayerProfile;
use crate::core::config::DifficultyConfig;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulation runs to perform
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Engine ticks per run
    pub ticks_per_run: u64,

    /// Game time per tick in milliseconds
    pub tick_ms: u64,

    /// Synthetic player driving the telemetry
    pub profile: PlayerProfile,

    /// Player walking speed along the stock zone line, world units per second
    pub travel_speed: f64,

    /// Record a time-series sample every N ticks (0 = no time series)
    pub sample_every_ticks: u64,

    /// Engine configuration under test
    pub difficulty: DifficultyConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 100,
            seed: None,
            ticks_per_run: 36_000, // 1 hour at 100ms ticks
            tick_ms: 100,
            profile: PlayerProfile::Average,
            travel_speed: 2.5,
            sample_every_ticks: 0,
            difficulty: DifficultyConfig::default(),
        }
    }
}

impl SimConfig {
    /// Game time covered by one run, in seconds.
    pub fn run_duration_secs(&self) -> f64 {
        self.ticks_per_run.saturating_mul(self.tick_ms) as f64 / 1_000.0
    }
}
