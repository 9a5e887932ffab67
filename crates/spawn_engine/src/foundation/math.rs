//! Math utilities and types
//!
//! Provides the vector types used for positions and bounds.

pub use nalgebra::Vector3;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Check that every component of a vector is finite
pub fn is_finite(v: &Vec3) -> bool {
    v.iter().all(|c| c.is_finite())
}
