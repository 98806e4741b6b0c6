//! Headless difficulty simulator for Monte Carlo tuning.
//!
//! Runs synthetic players against a real engine to see where the multiplier
//! settles, how often mastery tiers flip and how much time is spent under a
//! death penalty. Useful when tuning weights and smoothing factors.

mod config;
mod profile;
mod report;
mod runner;

pub use config::SimConfig;
pub use profile::PlayerProfile;
pub use report::{RunStats, SimReport, TimeSample};
pub use runner::{compare_profiles, run_simulation};
