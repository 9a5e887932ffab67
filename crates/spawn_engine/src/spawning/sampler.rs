//! Random positions inside a region

use crate::foundation::math::Vec3;
use crate::foundation::random::RandomSource;
use crate::spatial::SpatialRegion;

/// Draws attempted before a repeated position is accepted
pub const DEFAULT_MAX_SAMPLE_ATTEMPTS: u32 = 8;

/// Samples positions inside region bounds, avoiding the previous sample
///
/// X and Z are drawn uniformly over the region bounds; Y is the region's
/// reference height. A draw equal to the previous sample is redrawn, up to
/// `max_attempts` draws in total. Regions with no horizontal extent can only
/// ever produce one position, so after the last attempt the repeat is
/// accepted.
#[derive(Debug, Clone)]
pub struct PositionSampler {
    last_sampled: Option<Vec3>,
    max_attempts: u32,
    repeat_fallbacks: u64,
}

impl Default for PositionSampler {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SAMPLE_ATTEMPTS)
    }
}

impl PositionSampler {
    /// Create a sampler; `max_attempts` is raised to at least one
    pub fn new(max_attempts: u32) -> Self {
        Self {
            last_sampled: None,
            max_attempts: max_attempts.max(1),
            repeat_fallbacks: 0,
        }
    }

    /// Draw a position inside `region`
    pub fn sample<R: RandomSource + ?Sized>(&mut self, region: &SpatialRegion, rng: &mut R) -> Vec3 {
        let bounds = region.bounds();
        let (min, max) = (bounds.min(), bounds.max());

        // Only one position exists, so redrawing cannot help
        if bounds.is_flat_horizontally() {
            let only = Vec3::new(min.x, region.reference_height(), min.z);
            if self.last_sampled == Some(only) {
                self.accept_repeat(only, region);
            }
            self.last_sampled = Some(only);
            return only;
        }

        let mut candidate = Vec3::zeros();
        for _ in 0..self.max_attempts {
            candidate = Vec3::new(
                rng.uniform_float(min.x, max.x),
                region.reference_height(),
                rng.uniform_float(min.z, max.z),
            );

            if self.last_sampled != Some(candidate) {
                self.last_sampled = Some(candidate);
                return candidate;
            }
        }

        self.accept_repeat(candidate, region);
        self.last_sampled = Some(candidate);
        candidate
    }

    fn accept_repeat(&mut self, position: Vec3, region: &SpatialRegion) {
        self.repeat_fallbacks += 1;
        log::warn!(
            "Position sampler repeated {:?} in region '{}' after {} attempts",
            position,
            region.name(),
            self.max_attempts
        );
    }

    /// The most recent sample, if any
    pub const fn last_sampled(&self) -> Option<Vec3> {
        self.last_sampled
    }

    /// Maximum draws per sample
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// How many samples had to accept a repeated position
    pub const fn repeat_fallbacks(&self) -> u64 {
        self.repeat_fallbacks
    }
}
