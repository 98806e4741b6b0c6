//! Zone lookup for position-dependent difficulty.
//!
//! Zone authoring lives outside this crate; the engine only needs the
//! [`ZoneRegistry`] contract. A stock layout is provided for simulations.

mod data;
mod registry;
mod types;

pub use data::*;
pub use registry::{StaticZoneRegistry, ZoneRegistry};
pub use types::{Position, Zone};
