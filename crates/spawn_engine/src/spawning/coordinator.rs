//! Spawn coordinator
//!
//! Resolves a [`SpawnRequest`] into concrete `(template, position)` pairs and
//! feeds them to the [`EntityPool`].

use crate::config::SpawnerConfig;
use crate::foundation::math::{self, Vec3};
use crate::foundation::random::{entropy_rng, seeded_rng, RandomSource, SeededRng};
use crate::pool::{EntityBackend, EntityPool, TemplateRef, TemplateRegistry};
use crate::spatial::{RegionId, SpatialRegion};
use crate::spawning::{
    Placement, PositionSampler, RegionPlacement, SpawnError, SpawnRequest, TemplateSource, ZeroWeightPolicy,
};
use std::collections::HashSet;

/// One entity placed by a request
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnedEntity<H> {
    /// Backend handle
    pub handle: H,
    /// Template the entity was spawned as
    pub template: TemplateRef,
    /// World position it was placed at
    pub position: Vec3,
    /// Region it was placed in, if any
    pub region: Option<RegionId>,
    /// True if an inactive entity was reactivated
    pub reused: bool,
}

/// Everything a request spawned, in spawn order
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnReport<H> {
    /// Spawned entities
    pub spawned: Vec<SpawnedEntity<H>>,
}

impl<H> Default for SpawnReport<H> {
    fn default() -> Self {
        Self { spawned: Vec::new() }
    }
}

impl<H: Copy> SpawnReport<H> {
    /// Number of spawned entities
    pub fn len(&self) -> usize {
        self.spawned.len()
    }

    /// Whether nothing was spawned
    pub fn is_empty(&self) -> bool {
        self.spawned.is_empty()
    }

    /// Handles in spawn order
    pub fn handles(&self) -> impl Iterator<Item = H> + '_ {
        self.spawned.iter().map(|s| s.handle)
    }

    /// Positions in spawn order
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.spawned.iter().map(|s| s.position)
    }

    /// How many spawns reused an inactive entity
    pub fn reused_count(&self) -> usize {
        self.spawned.iter().filter(|s| s.reused).count()
    }

    /// How many spawns created a new entity
    pub fn created_count(&self) -> usize {
        self.len() - self.reused_count()
    }
}

/// Statistics about the coordinator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpawnerStats {
    /// Requests received
    pub requests: u64,
    /// Requests rejected by validation
    pub rejected: u64,
    /// Requests stopped by a backend failure
    pub failed: u64,
    /// Entities placed
    pub spawned: u64,
    /// Placements that reactivated an inactive entity
    pub reused: u64,
    /// Placements that created a new entity
    pub created: u64,
    /// Random placements that had to accept a repeated position
    pub repeat_fallbacks: u64,
}

enum Target<'r> {
    Fixed(Vec3),
    Region(&'r SpatialRegion, RegionPlacement),
}

/// Places pooled entities at positions or into regions
///
/// The coordinator borrows its regions, owns the template registry, the
/// entity pool, the position sampler and the random source. Every operation
/// runs to completion before returning.
pub struct SpawnCoordinator<'r, B: EntityBackend, R: RandomSource = SeededRng> {
    regions: &'r [SpatialRegion],
    templates: TemplateRegistry,
    pool: EntityPool<B>,
    sampler: PositionSampler,
    rng: R,
    zero_weight_policy: ZeroWeightPolicy,
    stats: SpawnerStats,
}

impl<'r, B: EntityBackend> SpawnCoordinator<'r, B, SeededRng> {
    /// Create a coordinator whose random source is seeded from `config`
    ///
    /// Without a configured seed the generator is seeded from entropy.
    pub fn from_config(regions: &'r [SpatialRegion], backend: B, config: &SpawnerConfig) -> Result<Self, SpawnError> {
        let rng = config.seed.map_or_else(entropy_rng, seeded_rng);
        Self::with_config(regions, backend, rng, config)
    }
}

impl<'r, B: EntityBackend, R: RandomSource> SpawnCoordinator<'r, B, R> {
    /// Create a coordinator with default tuning
    pub fn new(regions: &'r [SpatialRegion], backend: B, rng: R) -> Result<Self, SpawnError> {
        Self::with_config(regions, backend, rng, &SpawnerConfig::default())
    }

    /// Create a coordinator with explicit tuning; the config seed is ignored
    pub fn with_config(
        regions: &'r [SpatialRegion],
        backend: B,
        rng: R,
        config: &SpawnerConfig,
    ) -> Result<Self, SpawnError> {
        let mut seen = HashSet::with_capacity(regions.len());
        for region in regions {
            if !seen.insert(region.id()) {
                return Err(SpawnError::InvalidArgument(format!(
                    "duplicate region id {} ('{}')",
                    region.id(),
                    region.name()
                )));
            }
        }

        log::info!(
            "Created spawn coordinator with {} regions, {} sample attempts, {:?} zero-weight policy",
            regions.len(),
            config.max_sample_attempts,
            config.zero_weight_policy
        );

        Ok(Self {
            regions,
            templates: TemplateRegistry::new(),
            pool: EntityPool::new(backend),
            sampler: PositionSampler::new(config.max_sample_attempts),
            rng,
            zero_weight_policy: config.zero_weight_policy,
            stats: SpawnerStats::default(),
        })
    }

    /// Register a spawnable template
    pub fn register_template(&mut self, name: impl Into<String>) -> Result<TemplateRef, SpawnError> {
        Ok(self.templates.register(name)?)
    }

    /// Templates known to this coordinator
    pub fn templates(&self) -> &TemplateRegistry {
        &self.templates
    }

    /// Regions in placement order
    pub fn regions(&self) -> &'r [SpatialRegion] {
        self.regions
    }

    /// Find a region by id
    pub fn region(&self, id: RegionId) -> Option<&'r SpatialRegion> {
        let regions = self.regions;
        regions.iter().find(|region| region.id() == id)
    }

    /// Spawn `template` once at `position`
    pub fn spawn_at(&mut self, template: &TemplateRef, position: Vec3) -> Result<B::Handle, SpawnError> {
        let report = self.spawn(&SpawnRequest::new(TemplateSource::Single(template), Placement::Fixed(position)))?;
        let handle = report.handles().next();
        handle.ok_or_else(|| SpawnError::InvalidArgument("request produced no entity".to_string()))
    }

    /// Spawn `template` `count` times at `position`
    pub fn spawn_at_n(
        &mut self,
        template: &TemplateRef,
        position: Vec3,
        count: i32,
    ) -> Result<SpawnReport<B::Handle>, SpawnError> {
        self.spawn(&SpawnRequest::new(TemplateSource::Single(template), Placement::Fixed(position)).with_count(count))
    }

    /// Spawn `template` `count` times in one region
    pub fn spawn_in_region(
        &mut self,
        template: &TemplateRef,
        region: RegionId,
        placement: RegionPlacement,
        count: i32,
    ) -> Result<SpawnReport<B::Handle>, SpawnError> {
        self.spawn(
            &SpawnRequest::new(TemplateSource::Single(template), Placement::in_region(region, placement))
                .with_count(count),
        )
    }

    /// Spawn `template` `count` times in every region, in region order
    pub fn spawn_in_all_regions(
        &mut self,
        template: &TemplateRef,
        placement: RegionPlacement,
        count: i32,
    ) -> Result<SpawnReport<B::Handle>, SpawnError> {
        self.spawn(&SpawnRequest::new(TemplateSource::Single(template), Placement::AllRegions(placement)).with_count(count))
    }

    /// Execute a spawn request
    ///
    /// For each target (one position, one region, or every region in order)
    /// the template is resolved and the position computed `count` times, each
    /// pair going through reuse-or-create. The whole request is validated
    /// first; a backend failure stops the request but keeps earlier spawns.
    pub fn spawn(&mut self, request: &SpawnRequest<'_>) -> Result<SpawnReport<B::Handle>, SpawnError> {
        self.stats.requests += 1;

        let targets = match self.validate(request) {
            Ok(targets) => targets,
            Err(err) => {
                self.stats.rejected += 1;
                log::warn!("Rejected spawn request: {}", err);
                return Err(err);
            }
        };

        let mut report = SpawnReport::default();
        for target in &targets {
            for _ in 0..request.count {
                let template = request.source.resolve(self.zero_weight_policy, &mut self.rng)?;

                let (position, region) = match *target {
                    Target::Fixed(position) => (position, None),
                    Target::Region(region, RegionPlacement::Center) => (region.center(), Some(region.id())),
                    Target::Region(region, RegionPlacement::Random) => {
                        (self.sampler.sample(region, &mut self.rng), Some(region.id()))
                    }
                };

                match self.pool.spawn(template, position) {
                    Ok(spawned) => report.spawned.push(SpawnedEntity {
                        handle: spawned.handle,
                        template: template.clone(),
                        position,
                        region,
                        reused: spawned.reused,
                    }),
                    Err(source) => {
                        self.record(&report);
                        self.stats.failed += 1;
                        log::warn!("Spawn request stopped after {} spawns: {}", report.len(), source);
                        return Err(SpawnError::Instantiation {
                            spawned_before: report.len(),
                            source,
                        });
                    }
                }
            }
        }

        self.record(&report);
        log::debug!(
            "Spawned {} entities ({} reused, {} created)",
            report.len(),
            report.reused_count(),
            report.created_count()
        );
        Ok(report)
    }

    fn validate(&self, request: &SpawnRequest<'_>) -> Result<Vec<Target<'r>>, SpawnError> {
        if request.count <= 0 {
            return Err(SpawnError::InvalidCount(request.count));
        }

        request.source.validate(self.zero_weight_policy)?;
        if let Some(unknown) = request.source.templates().find(|t| !self.templates.contains(t)) {
            return Err(SpawnError::InvalidArgument(format!(
                "template {unknown} is not registered with this coordinator"
            )));
        }

        let region = |id: RegionId| {
            self.region(id)
                .ok_or_else(|| SpawnError::InvalidArgument(format!("unknown {id}")))
        };

        let targets = match request.placement {
            Placement::Fixed(position) => {
                if !math::is_finite(&position) {
                    return Err(SpawnError::InvalidArgument(format!("position {position:?} is not finite")));
                }
                vec![Target::Fixed(position)]
            }
            Placement::RegionCenter(id) => vec![Target::Region(region(id)?, RegionPlacement::Center)],
            Placement::RegionRandom(id) => vec![Target::Region(region(id)?, RegionPlacement::Random)],
            Placement::AllRegions(placement) => {
                if self.regions.is_empty() {
                    log::debug!("Spawn into all regions requested, but there are no regions");
                }
                let regions = self.regions;
                regions.iter().map(|r| Target::Region(r, placement)).collect()
            }
        };

        Ok(targets)
    }

    fn record(&mut self, report: &SpawnReport<B::Handle>) {
        let reused = report.reused_count() as u64;
        self.stats.spawned += report.len() as u64;
        self.stats.reused += reused;
        self.stats.created += report.len() as u64 - reused;
    }

    /// Deactivate one entity so later requests can reuse it
    pub fn deactivate(&mut self, handle: B::Handle) -> Result<(), SpawnError> {
        Ok(self.pool.deactivate(handle)?)
    }

    /// Deactivate every entity, returning how many were active
    pub fn deactivate_all(&mut self) -> usize {
        let count = self.pool.deactivate_all();
        log::info!("Deactivated {} entities", count);
        count
    }

    /// The entity pool
    pub fn pool(&self) -> &EntityPool<B> {
        &self.pool
    }

    /// Mutable access to the random source
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Most recent random placement
    pub fn last_sampled_position(&self) -> Option<Vec3> {
        self.sampler.last_sampled()
    }

    /// Current zero-weight policy
    pub fn zero_weight_policy(&self) -> ZeroWeightPolicy {
        self.zero_weight_policy
    }

    /// Change how all-zero weight sets are handled
    pub fn set_zero_weight_policy(&mut self, policy: ZeroWeightPolicy) {
        self.zero_weight_policy = policy;
    }

    /// Coordinator statistics
    pub fn stats(&self) -> SpawnerStats {
        SpawnerStats {
            repeat_fallbacks: self.sampler.repeat_fallbacks(),
            ..self.stats.clone()
        }
    }
}
