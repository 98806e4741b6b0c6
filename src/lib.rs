//! Adaptive Difficulty - skill-driven difficulty scaling for action RPG combat
//!
//! The engine watches combat telemetry, boils it down to a skill level in
//! [0, 1] and turns that into a smoothed difficulty multiplier. Hosts read
//! the multiplier when spawning enemies and granting rewards.
//!
//! ```no_run
//! use adaptive_difficulty::{CombatStats, DifficultyConfig, DifficultyEngine};
//!
//! let mut engine = DifficultyEngine::new(DifficultyConfig::default())?;
//! let stats = CombatStats {
//!     dodge_attempts: 8,
//!     successful_dodges: 6,
//!     ..Default::default()
//! };
//! for event in engine.update(16, Some(&stats)) {
//!     println!("{event:?}");
//! }
//! println!("multiplier = {:.3}", engine.multiplier());
//! # Ok::<(), adaptive_difficulty::DifficultyError>(())
//! ```

pub mod core;
pub mod difficulty;
pub mod mastery;
pub mod scaling;
pub mod simulator;
pub mod skill;
pub mod zones;

pub use crate::core::{DifficultyConfig, DifficultyError, Result};
pub use difficulty::{DifficultyEngine, DifficultyEvent, DifficultySnapshot};
pub use skill::CombatStats;
