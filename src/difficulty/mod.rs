//! Difficulty multiplier: death penalty, smoothing and the engine facade.

pub mod engine;
pub mod penalty;
pub mod types;

pub use engine::DifficultyEngine;
pub use penalty::{DeathPenalty, DeathPenaltyController};
pub use types::{DifficultyEvent, DifficultySnapshot, DifficultyState};
