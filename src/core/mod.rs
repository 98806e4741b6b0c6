//! Shared constants, configuration, time sources and errors.

pub mod clock;
pub mod config;
pub mod constants;
pub mod error;

pub use clock::{Clock, ManualClock, PausableClock, SystemClock, TickClock};
pub use config::{DifficultyConfig, SkillWeights};
pub use error::{DifficultyError, Result};
