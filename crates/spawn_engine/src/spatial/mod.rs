//! Spatial regions
//!
//! Named, axis-aligned areas that entities can be placed into.

mod region;

pub use region::{Aabb, BoundsProvider, RegionError, RegionId, SpatialRegion};
