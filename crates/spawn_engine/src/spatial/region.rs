//! Axis-aligned bounds and the regions built on them

use crate::foundation::math::{self, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors raised while building regions
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RegionError {
    /// A bound component is NaN or infinite
    #[error("bounds must be finite: min {min:?}, max {max:?}")]
    NonFinite {
        /// Requested minimum corner
        min: [f32; 3],
        /// Requested maximum corner
        max: [f32; 3],
    },

    /// Minimum exceeds maximum on one axis
    #[error("bounds inverted on {axis} axis: min {min} > max {max}")]
    Inverted {
        /// Axis name
        axis: char,
        /// Minimum on that axis
        min: f32,
        /// Maximum on that axis
        max: f32,
    },

    /// Bounds are finite but too far apart to measure on one axis
    #[error("bounds too wide on {axis} axis: {min} to {max}")]
    Oversized {
        /// Axis name
        axis: char,
        /// Minimum on that axis
        min: f32,
        /// Maximum on that axis
        max: f32,
    },

    /// Reference height is NaN or infinite
    #[error("reference height must be finite, got {0}")]
    InvalidHeight(f32),
}

/// Axis-Aligned Bounding Box
///
/// `min <= max` holds on every axis for any value of this type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAabb", into = "RawAabb")]
pub struct Aabb {
    min: Vec3,
    max: Vec3,
}

#[derive(Serialize, Deserialize)]
struct RawAabb {
    min: [f32; 3],
    max: [f32; 3],
}

impl TryFrom<RawAabb> for Aabb {
    type Error = RegionError;

    fn try_from(raw: RawAabb) -> Result<Self, Self::Error> {
        Self::new(Vec3::from(raw.min), Vec3::from(raw.max))
    }
}

impl From<Aabb> for RawAabb {
    fn from(aabb: Aabb) -> Self {
        Self {
            min: aabb.min.into(),
            max: aabb.max.into(),
        }
    }
}

impl Aabb {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Result<Self, RegionError> {
        if !math::is_finite(&min) || !math::is_finite(&max) {
            return Err(RegionError::NonFinite {
                min: min.into(),
                max: max.into(),
            });
        }

        for (axis, name) in ['x', 'y', 'z'].into_iter().enumerate() {
            if min[axis] > max[axis] {
                return Err(RegionError::Inverted {
                    axis: name,
                    min: min[axis],
                    max: max[axis],
                });
            }
            if !(max[axis] - min[axis]).is_finite() {
                return Err(RegionError::Oversized {
                    axis: name,
                    min: min[axis],
                    max: max[axis],
                });
            }
        }

        Ok(Self { min, max })
    }

    /// Create an AABB centered at a point with given extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Result<Self, RegionError> {
        let extents = extents.abs();
        Self::new(center - extents, center + extents)
    }

    /// Minimum corner
    pub const fn min(&self) -> Vec3 {
        self.min
    }

    /// Maximum corner
    pub const fn max(&self) -> Vec3 {
        self.max
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        self.min + (self.max - self.min) * 0.5
    }

    /// Get the extents (half-size) of the AABB
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Check if this AABB contains a point
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }

    /// Whether the box has zero size on both horizontal axes
    pub fn is_flat_horizontally(&self) -> bool {
        self.min.x == self.max.x && self.min.z == self.max.z
    }
}

/// Something that can report the bounds of an area, such as a box collider
pub trait BoundsProvider {
    /// World-space bounds of the area
    fn bounds(&self) -> Aabb;
}

impl BoundsProvider for Aabb {
    fn bounds(&self) -> Aabb {
        *self
    }
}

/// Region identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegionId(pub u32);

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "region#{}", self.0)
    }
}

/// A named area where entities may be placed
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialRegion {
    id: RegionId,
    name: String,
    bounds: Aabb,
    reference_height: f32,
}

impl SpatialRegion {
    /// Create a region whose reference height is the center height of its bounds
    pub fn new(id: RegionId, name: impl Into<String>, bounds: Aabb) -> Self {
        Self {
            id,
            name: name.into(),
            reference_height: bounds.center().y,
            bounds,
        }
    }

    /// Create a region from anything that reports bounds
    pub fn from_provider(id: RegionId, name: impl Into<String>, provider: &impl BoundsProvider) -> Self {
        Self::new(id, name, provider.bounds())
    }

    /// Override the height entities are placed at
    pub fn with_reference_height(mut self, height: f32) -> Result<Self, RegionError> {
        if !height.is_finite() {
            return Err(RegionError::InvalidHeight(height));
        }
        self.reference_height = height;
        Ok(self)
    }

    /// Region identifier
    pub const fn id(&self) -> RegionId {
        self.id
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Region bounds
    pub const fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Height used for every placement in this region
    pub const fn reference_height(&self) -> f32 {
        self.reference_height
    }

    /// Horizontal center of the bounds at the reference height
    pub fn center(&self) -> Vec3 {
        let center = self.bounds.center();
        Vec3::new(center.x, self.reference_height, center.z)
    }
}
