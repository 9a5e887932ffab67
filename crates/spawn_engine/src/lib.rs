//! # Spawn Engine
//!
//! Pooling, template selection and placement for spawnable game objects.
//!
//! ## Features
//!
//! - **Entity Pooling**: deactivated entities are reactivated before new ones are created
//! - **Template Selection**: uniform or rarity-weighted choice between templates
//! - **Region Placement**: region center or anti-repeat random points inside a region
//! - **Engine Agnostic**: instantiation and activation go through backend ports
//!
//! ## Quick Start
//!
//! ```rust
//! use spawn_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let regions = vec![SpatialRegion::new(
//!         RegionId(0),
//!         "quarry",
//!         Aabb::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(10.0, 0.0, 10.0))?,
//!     )];
//!
//!     let mut coordinator =
//!         SpawnCoordinator::new(&regions, HeadlessBackend::new(), seeded_rng(7))?;
//!     let rock = coordinator.register_template("Rock")?;
//!
//!     let report = coordinator.spawn_in_region(&rock, RegionId(0), RegionPlacement::Random, 3)?;
//!     assert_eq!(report.len(), 3);
//!
//!     // Deactivated entities are reused by the next request for the same template
//!     coordinator.deactivate_all();
//!     coordinator.spawn_in_region(&rock, RegionId(0), RegionPlacement::Center, 1)?;
//!     assert_eq!(coordinator.pool().len(), 3);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod spatial;
pub mod pool;
pub mod spawning;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, SpawnerConfig},
        foundation::{
            math::Vec3,
            random::{seeded_rng, RandomSource, SeededRng},
        },
        pool::{
            ActivationService, EntityBackend, EntityPool, HeadlessBackend, InstantiationError,
            InstantiationService, PoolEntry, TemplateId, TemplateRef, TemplateRegistry,
            WeightedTemplate,
        },
        spatial::{Aabb, BoundsProvider, RegionId, SpatialRegion},
        spawning::{
            Placement, PositionSampler, RegionPlacement, SpawnCoordinator, SpawnError,
            SpawnReport, SpawnRequest, TemplateSource, ZeroWeightPolicy,
        },
    };
}
