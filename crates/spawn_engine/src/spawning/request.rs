//! Spawn request description

use crate::foundation::math::Vec3;
use crate::foundation::random::RandomSource;
use crate::pool::{TemplateRef, WeightedTemplate};
use crate::spatial::RegionId;
use crate::spawning::{select_uniform, select_weighted, total_weight, SelectionError, ZeroWeightPolicy};

/// Where inside a region an entity is placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionPlacement {
    /// Horizontal center of the region at its reference height
    Center,
    /// Anti-repeat random point inside the region bounds
    Random,
}

/// Target of a spawn request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Explicit world position
    Fixed(Vec3),
    /// Center of one region
    RegionCenter(RegionId),
    /// Random point inside one region
    RegionRandom(RegionId),
    /// Every region of the coordinator, in order
    AllRegions(RegionPlacement),
}

impl Placement {
    /// Placement inside a single region
    pub const fn in_region(region: RegionId, placement: RegionPlacement) -> Self {
        match placement {
            RegionPlacement::Center => Self::RegionCenter(region),
            RegionPlacement::Random => Self::RegionRandom(region),
        }
    }
}

/// Which template a spawn uses
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TemplateSource<'a> {
    /// Always this template
    Single(&'a TemplateRef),
    /// Uniformly chosen per spawn
    Uniform(&'a [TemplateRef]),
    /// Chosen per spawn, weighted by rarity
    Weighted(&'a [WeightedTemplate]),
}

impl<'a> TemplateSource<'a> {
    /// Every template this source can produce
    pub fn templates(&self) -> Box<dyn Iterator<Item = &'a TemplateRef> + 'a> {
        match *self {
            Self::Single(template) => Box::new(std::iter::once(template)),
            Self::Uniform(templates) => Box::new(templates.iter()),
            Self::Weighted(entries) => Box::new(entries.iter().map(|entry| &entry.template)),
        }
    }

    /// Check that [`TemplateSource::resolve`] cannot fail
    pub fn validate(&self, policy: ZeroWeightPolicy) -> Result<(), SelectionError> {
        match *self {
            Self::Single(_) => Ok(()),
            Self::Uniform(templates) if templates.is_empty() => Err(SelectionError::EmptyInput),
            Self::Uniform(_) => Ok(()),
            Self::Weighted(entries) => {
                let total = total_weight(entries)?;
                if total <= 0.0 && policy == ZeroWeightPolicy::Reject {
                    return Err(SelectionError::DegenerateDistribution { candidates: entries.len() });
                }
                Ok(())
            }
        }
    }

    /// Choose the template for one spawn
    pub fn resolve<R>(&self, policy: ZeroWeightPolicy, rng: &mut R) -> Result<&'a TemplateRef, SelectionError>
    where
        R: RandomSource + ?Sized,
    {
        match *self {
            Self::Single(template) => Ok(template),
            Self::Uniform(templates) => select_uniform(templates, rng),
            Self::Weighted(entries) => select_weighted(entries, policy, rng).map(|entry| &entry.template),
        }
    }
}

/// A complete spawn request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest<'a> {
    /// Template or candidate set
    pub source: TemplateSource<'a>,
    /// Target position or regions
    pub placement: Placement,
    /// Spawns per target; must be positive
    pub count: i32,
}

impl<'a> SpawnRequest<'a> {
    /// Spawn once
    pub const fn new(source: TemplateSource<'a>, placement: Placement) -> Self {
        Self { source, placement, count: 1 }
    }

    /// Repeat the spawn `count` times per target
    #[must_use]
    pub fn with_count(mut self, count: i32) -> Self {
        self.count = count;
        self
    }
}
