use crate::core::error::{DifficultyError, Result};
use serde::{Deserialize, Serialize};

/// World-space position of the player or a zone center.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// A spherical region of the world with its own difficulty modifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: u32,
    pub name: String,
    pub center: Position,
    pub radius: f64,
    pub difficulty_multiplier: f64,
    /// Suggested player level for the zone.
    pub level_hint: u32,
}

impl Zone {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        center: Position,
        radius: f64,
        difficulty_multiplier: f64,
        level_hint: u32,
    ) -> Result<Self> {
        let zone = Self {
            id,
            name: name.into(),
            center,
            radius,
            difficulty_multiplier,
            level_hint,
        };
        zone.validate()?;
        Ok(zone)
    }

    /// Rejects zones that could never match or would poison the multiplier.
    pub fn validate(&self) -> Result<()> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(DifficultyError::InvalidZone(format!(
                "zone {} ({}) has radius {}",
                self.id, self.name, self.radius
            )));
        }
        if !self.difficulty_multiplier.is_finite() || self.difficulty_multiplier <= 0.0 {
            return Err(DifficultyError::InvalidZone(format!(
                "zone {} ({}) has multiplier {}",
                self.id, self.name, self.difficulty_multiplier
            )));
        }
        let c = self.center;
        if !(c.x.is_finite() && c.y.is_finite() && c.z.is_finite()) {
            return Err(DifficultyError::InvalidZone(format!(
                "zone {} ({}) has a non-finite center",
                self.id, self.name
            )));
        }
        Ok(())
    }

    /// Strictly inside: a position exactly on the boundary is outside.
    pub fn contains(&self, position: &Position) -> bool {
        self.center.distance_to(position) < self.radius
    }
}
