//! Spawning
//!
//! High-level API for placing pooled entities into regions.
//!
//! # Architecture
//!
//! ```text
//! Application → SpawnCoordinator ──> TemplateSource::resolve   (uniform / weighted)
//!                     |          ──> PositionSampler::sample   (random placement)
//!                     |
//!                 EntityPool::spawn ──> reuse inactive entity or create a new one
//! ```
//!
//! Every request is validated in full before the first entity is touched, so a
//! rejected request never leaves partially spawned entities behind.

mod error;
mod request;
mod sampler;
mod selection;
mod coordinator;

#[cfg(test)]
mod tests;

pub use error::SpawnError;
pub use request::{Placement, RegionPlacement, SpawnRequest, TemplateSource};
pub use sampler::{PositionSampler, DEFAULT_MAX_SAMPLE_ATTEMPTS};
pub use selection::{select_uniform, select_weighted, total_weight, SelectionError, ZeroWeightPolicy};
pub use coordinator::{SpawnCoordinator, SpawnReport, SpawnedEntity, SpawnerStats};
