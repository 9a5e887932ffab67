//! Scenario tests driving the coordinator end to end

mod selection_scenarios;

use crate::foundation::math::Vec3;
use crate::spatial::{Aabb, RegionId, SpatialRegion};

/// Single flat region spanning (0,0,0)..(10,0,10)
fn quarry() -> Vec<SpatialRegion> {
    vec![SpatialRegion::new(
        RegionId(0),
        "quarry",
        Aabb::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(10.0, 0.0, 10.0)).unwrap(),
    )]
}

/// Three separated regions at different heights
fn valley() -> Vec<SpatialRegion> {
    (0..3)
        .map(|i| {
            let offset = i as f32 * 100.0;
            SpatialRegion::new(
                RegionId(i),
                format!("field-{i}"),
                Aabb::new(Vec3::new(offset, i as f32, 0.0), Vec3::new(offset + 20.0, i as f32, 20.0)).unwrap(),
            )
        })
        .collect()
}
