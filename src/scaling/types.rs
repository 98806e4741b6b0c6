use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Difficulty tag shown on enemy nameplates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DifficultyColor {
    Trivial,
    Easy,
    Normal,
    Hard,
    Deadly,
}

impl DifficultyColor {
    pub fn from_multiplier(multiplier: f64) -> Self {
        if multiplier < 0.9 {
            DifficultyColor::Trivial
        } else if multiplier < 1.0 {
            DifficultyColor::Easy
        } else if multiplier < 1.2 {
            DifficultyColor::Normal
        } else if multiplier < 1.4 {
            DifficultyColor::Hard
        } else {
            DifficultyColor::Deadly
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub name: String,
    pub level: u32,
    pub max_hp: u32,
    pub current_hp: u32,
    pub damage: u32,
    #[serde(default)]
    pub defense: u32,
    /// Movement/attack speed factor, 1.0 = normal.
    pub speed: f64,
    #[serde(default)]
    pub difficulty_color: Option<DifficultyColor>,
}

impl Enemy {
    pub fn new(name: impl Into<String>, level: u32, max_hp: u32, damage: u32) -> Self {
        Self {
            name: name.into(),
            level,
            max_hp,
            current_hp: max_hp,
            damage,
            defense: 0,
            speed: 1.0,
            difficulty_color: None,
        }
    }
}

/// Unscaled boss definition from the content database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossTemplate {
    pub name: String,
    pub base_health: u32,
    pub base_damage: u32,
    pub phase_count: u32,
    /// Abilities unlocked in each phase; index 0 is phase 1. Phases without
    /// an entry unlock nothing new.
    #[serde(default)]
    pub phase_abilities: Vec<Vec<String>>,
}

impl BossTemplate {
    pub fn new(name: impl Into<String>, base_health: u32, base_damage: u32, phase_count: u32) -> Self {
        Self {
            name: name.into(),
            base_health,
            base_damage,
            phase_count,
            phase_abilities: Vec::new(),
        }
    }

    pub fn with_phase_abilities(mut self, phase_abilities: Vec<Vec<String>>) -> Self {
        self.phase_abilities = phase_abilities;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossPhase {
    /// 1-based phase number.
    pub phase: u32,
    pub health: u32,
    pub damage: u32,
    pub abilities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaledBoss {
    pub name: String,
    pub level: u32,
    pub party_size: u32,
    pub phases: Vec<BossPhase>,
    pub enrage_timer: Duration,
}

impl ScaledBoss {
    /// Looks up a 1-based phase.
    pub fn phase(&self, phase: u32) -> Option<&BossPhase> {
        self.phases.iter().find(|p| p.phase == phase)
    }

    pub fn total_health(&self) -> u64 {
        self.phases.iter().map(|p| p.health as u64).sum()
    }
}

/// Loot roll parameters before difficulty scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LootTable {
    /// Chance in [0, 1] that a drop is upgraded to a rarer grade.
    pub rarity_chance: f64,
    pub quantity: u32,
    /// Quality grade, 0 to 10.
    pub quality: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaledLoot {
    pub rarity_chance: f64,
    pub quantity: u32,
    pub quality: u32,
    pub bonus_items: u32,
}
