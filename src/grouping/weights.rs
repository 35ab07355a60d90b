//! Merge cost of an adjacency edge from superpixel geometry.
//!
//! A pair is convex when neither centre lies in front of the other's tangent
//! plane: the direction from the second centre to the first does not point
//! against the first normal, and vice versa. The weight therefore does not
//! depend on edge orientation, and at an occlusion boundary the background
//! patch sees the foreground in front of it. Convex
//! pairs cost `1 − cos θ` with `θ` the angle between the normals, so
//! coplanar neighbours cost zero. Concave pairs (creases, silhouettes) cost a
//! fixed large value.
use crate::superpixels::SuperpixelAggregate;
use nalgebra::Vector3;

/// `true` when neither superpixel lies in front of the other's surface.
///
/// Which label of an edge comes first is arbitrary, so the test is symmetric.
pub fn is_convex(sp1: &SuperpixelAggregate, sp2: &SuperpixelAggregate) -> bool {
    let direction = (sp1.world - sp2.world)
        .try_normalize(f32::EPSILON)
        .unwrap_or_else(Vector3::zeros);
    direction.dot(&sp1.normal) >= 0.0 && (-direction).dot(&sp2.normal) >= 0.0
}

pub fn edge_weight(
    sp1: &SuperpixelAggregate,
    sp2: &SuperpixelAggregate,
    concave_weight: f32,
) -> f32 {
    if is_convex(sp1, sp2) {
        (1.0 - sp1.normal.dot(&sp2.normal)).max(0.0)
    } else {
        concave_weight
    }
}
