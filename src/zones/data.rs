//! Stock world layout used by the simulator and as a starting point for hosts
//! that have no zone authoring of their own.

use super::registry::StaticZoneRegistry;
use super::types::{Position, Zone};

/// Extra difficulty per zone tier past the first.
pub const ZONE_MULTIPLIER_PER_TIER: f64 = 0.05;

/// Distance between neighbouring zone centers along the world's x axis.
pub const ZONE_SPACING: f64 = 1_000.0;

/// Radius of every stock zone. Smaller than half the spacing so zones never overlap.
pub const ZONE_RADIUS: f64 = 450.0;

/// (name, level hint) for each stock zone, in travel order.
const STOCK_ZONES: [(&str, u32); 10] = [
    ("Meadow", 1),
    ("Dark Forest", 10),
    ("Mountain Pass", 25),
    ("Ancient Ruins", 40),
    ("Volcanic Wastes", 55),
    ("Frozen Tundra", 70),
    ("Crystal Caverns", 85),
    ("Sunken Kingdom", 100),
    ("Floating Isles", 115),
    ("Storm Citadel", 130),
];

/// Difficulty multiplier for a 1-based zone tier.
pub fn zone_tier_multiplier(tier: u32) -> f64 {
    1.0 + tier.saturating_sub(1) as f64 * ZONE_MULTIPLIER_PER_TIER
}

/// Returns the stock zones, laid out left to right starting at the origin.
pub fn get_all_zones() -> Vec<Zone> {
    STOCK_ZONES
        .iter()
        .zip(1u32..)
        .map(|(&(name, level_hint), id)| Zone {
            id,
            name: name.to_string(),
            center: Position::new((id - 1) as f64 * ZONE_SPACING, 0.0, 0.0),
            radius: ZONE_RADIUS,
            difficulty_multiplier: zone_tier_multiplier(id),
            level_hint,
        })
        .collect()
}

/// Gets a stock zone by its ID.
pub fn get_zone(zone_id: u32) -> Option<Zone> {
    get_all_zones().into_iter().find(|z| z.id == zone_id)
}

/// Registry holding every stock zone.
pub fn stock_registry() -> StaticZoneRegistry {
    StaticZoneRegistry::from_zones(get_all_zones()).unwrap_or_default()
}
