//! Synthetic players that generate combat telemetry.

use crate::skill::CombatStats;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerProfile {
    Novice,
    Average,
    Skilled,
    Expert,
    /// Starts as a novice and ends the run as an expert.
    Improving,
}

impl PlayerProfile {
    pub const ALL: [PlayerProfile; 5] = [
        PlayerProfile::Novice,
        PlayerProfile::Average,
        PlayerProfile::Skilled,
        PlayerProfile::Expert,
        PlayerProfile::Improving,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PlayerProfile::Novice => "novice",
            PlayerProfile::Average => "average",
            PlayerProfile::Skilled => "skilled",
            PlayerProfile::Expert => "expert",
            PlayerProfile::Improving => "improving",
        }
    }

    /// Underlying proficiency in [0, 1] at `progress` (0 = run start, 1 = run end).
    pub fn proficiency(&self, progress: f64) -> f64 {
        match self {
            PlayerProfile::Novice => 0.15,
            PlayerProfile::Average => 0.5,
            PlayerProfile::Skilled => 0.75,
            PlayerProfile::Expert => 0.95,
            PlayerProfile::Improving => 0.15 + 0.8 * progress.clamp(0.0, 1.0),
        }
    }

    /// Telemetry for one reporting window.
    pub fn sample_stats(&self, progress: f64, rng: &mut impl Rng) -> CombatStats {
        let p = self.proficiency(progress);

        let dodge_attempts = rng.gen_range(4..12u32);
        let successful_dodges = (dodge_attempts as f64 * jitter(p, 0.1, rng)).round() as u32;
        let potential_damage = rng.gen_range(200.0..400.0);

        CombatStats {
            dodge_attempts,
            successful_dodges,
            last_reaction_time_ms: Some(150.0 + (1.0 - jitter(p, 0.1, rng)) * 850.0),
            average_combo_length: Some(1.0 + jitter(p, 0.15, rng) * 5.0),
            average_combat_duration_ms: Some(rng.gen_range(10_000.0..60_000.0)),
            damage_taken: potential_damage * (1.0 - jitter(p, 0.1, rng)),
            potential_damage,
            perfect_dodges: Some((jitter(p, 0.2, rng) * 10.0).round() as u32),
        }
    }

    /// Chance of dying during one reporting window at the given difficulty.
    pub fn death_chance(&self, progress: f64, multiplier: f64) -> f64 {
        ((1.0 - self.proficiency(progress)) * multiplier * 0.03).clamp(0.0, 1.0)
    }
}

/// Proficiency plus uniform noise, kept in [0, 1].
fn jitter(proficiency: f64, spread: f64, rng: &mut impl Rng) -> f64 {
    (proficiency + rng.gen_range(-spread..spread)).clamp(0.0, 1.0)
}

impl fmt::Display for PlayerProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlayerProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlayerProfile::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown profile '{s}'"))
    }
}
