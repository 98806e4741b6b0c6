//! Zone lookup contract and the in-memory registry.

use super::types::{Position, Zone};
use crate::core::error::Result;
use std::sync::Arc;

/// Supplies the zone a world position belongs to.
///
/// Implementations must return the zone whose center is nearest among all
/// zones that strictly contain the position, or `None` outside every zone.
pub trait ZoneRegistry: Send + Sync {
    fn zone_at(&self, position: &Position) -> Option<&Zone>;
}

impl<T: ZoneRegistry + ?Sized> ZoneRegistry for Arc<T> {
    fn zone_at(&self, position: &Position) -> Option<&Zone> {
        (**self).zone_at(position)
    }
}

impl<T: ZoneRegistry + ?Sized> ZoneRegistry for Box<T> {
    fn zone_at(&self, position: &Position) -> Option<&Zone> {
        (**self).zone_at(position)
    }
}

/// Registry over a fixed list of zones. Lookups are a linear scan.
#[derive(Debug, Clone, Default)]
pub struct StaticZoneRegistry {
    zones: Vec<Zone>,
}

impl StaticZoneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry, rejecting the first invalid zone. A later zone
    /// with an already-seen id replaces the earlier one.
    pub fn from_zones(zones: Vec<Zone>) -> Result<Self> {
        let mut registry = Self::new();
        for zone in zones {
            registry.insert(zone)?;
        }
        Ok(registry)
    }

    pub fn insert(&mut self, zone: Zone) -> Result<()> {
        zone.validate()?;
        if let Some(existing) = self.zones.iter_mut().find(|z| z.id == zone.id) {
            tracing::warn!(zone_id = zone.id, "replacing zone with duplicate id");
            *existing = zone;
        } else {
            self.zones.push(zone);
        }
        Ok(())
    }

    pub fn get(&self, zone_id: u32) -> Option<&Zone> {
        self.zones.iter().find(|z| z.id == zone_id)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

impl ZoneRegistry for StaticZoneRegistry {
    fn zone_at(&self, position: &Position) -> Option<&Zone> {
        self.zones
            .iter()
            .map(|zone| (zone, zone.center.distance_to(position)))
            .filter(|(zone, distance)| *distance < zone.radius)
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(zone, _)| zone)
    }
}
