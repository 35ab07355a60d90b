//! Superpixel-to-pixel dissimilarity used by the clustering engine.
//!
//! ```text
//! d = c · |Δworld|² / r²
//!   + (1 − c) · ((1 − n) · |Δcolor|² + n · (1 − normal_a · normal_b))
//! ```
//!
//! with `c` the compactness and `n` the normal weight, both in `[0, 1]`. At
//! `c = 1` only the spatial term remains; at `n = 1` color is ignored.
use crate::features::PixelSample;
use crate::superpixels::SuperpixelAggregate;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Anything that can score how well a pixel fits a superpixel.
///
/// Clustering engines only see the metric through this trait.
pub trait PixelDistance {
    fn distance(&self, superpixel: &SuperpixelAggregate, pixel: &PixelSample) -> f32;
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct DistanceOptions {
    /// Weight of the spatial term against color + normal.
    pub compactness: f32,
    /// Share of the non-spatial term given to normals rather than color.
    pub normal_weight: f32,
}

impl Default for DistanceOptions {
    fn default() -> Self {
        Self {
            compactness: 0.4,
            normal_weight: 0.75,
        }
    }
}

/// Depth-adaptive superpixel metric with precomputed `1 / r²`.
#[derive(Clone, Copy, Debug)]
pub struct DistanceMetric {
    compactness: f32,
    normal_weight: f32,
    inv_radius_sq: f32,
}

impl DistanceMetric {
    pub fn new(opts: &DistanceOptions, radius: f32) -> Self {
        Self {
            compactness: opts.compactness,
            normal_weight: opts.normal_weight,
            inv_radius_sq: 1.0 / (radius * radius),
        }
    }
}

impl PixelDistance for DistanceMetric {
    #[inline]
    fn distance(&self, superpixel: &SuperpixelAggregate, pixel: &PixelSample) -> f32 {
        let spatial = (superpixel.world - pixel.world).norm_squared() * self.inv_radius_sq;
        let color = (superpixel.color - pixel.color).norm_squared();
        let normal = normal_distance(&superpixel.normal, &pixel.normal);
        self.compactness * spatial
            + (1.0 - self.compactness)
                * ((1.0 - self.normal_weight) * color + self.normal_weight * normal)
    }
}

/// Cheap stand-in for the angle between two unit normals.
#[inline]
pub fn normal_distance(a: &Vector3<f32>, b: &Vector3<f32>) -> f32 {
    1.0 - a.dot(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector2;

    fn pixel(world: Vector3<f32>, color: Vector3<f32>, normal: Vector3<f32>) -> PixelSample {
        PixelSample {
            position: Vector2::zeros(),
            color,
            depth: world.z,
            world,
            normal,
            density: 0.01,
            num: 1.0,
        }
    }

    fn aggregate_of(p: &PixelSample) -> SuperpixelAggregate {
        SuperpixelAggregate {
            position: p.position,
            world: p.world,
            color: p.color,
            normal: p.normal,
            count: 1,
        }
    }

    #[test]
    fn identical_features_have_zero_distance() {
        let metric = DistanceMetric::new(&DistanceOptions::default(), 0.02);
        let p = pixel(
            Vector3::new(0.1, -0.2, 1.3),
            Vector3::new(0.2, 0.5, 0.9),
            Vector3::new(0.0, 0.0, -1.0),
        );
        assert_eq!(metric.distance(&aggregate_of(&p), &p), 0.0);
    }

    #[test]
    fn full_compactness_is_pure_spatial() {
        let opts = DistanceOptions {
            compactness: 1.0,
            normal_weight: 0.5,
        };
        let metric = DistanceMetric::new(&opts, 0.5);
        let a = pixel(
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::zeros(),
            Vector3::new(0.0, 0.0, -1.0),
        );
        let b = pixel(
            Vector3::new(0.1, 0.0, 1.0),
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(0.0, -1.0, 0.0),
        );
        let d = metric.distance(&aggregate_of(&a), &b);
        assert!((d - 0.01 / 0.25).abs() < 1e-6, "d={d}");
    }

    #[test]
    fn distance_grows_with_each_deviation() {
        let metric = DistanceMetric::new(&DistanceOptions::default(), 0.05);
        let base = pixel(
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(0.5, 0.5, 0.5),
            Vector3::new(0.0, 0.0, -1.0),
        );
        let sp = aggregate_of(&base);

        let near = pixel(Vector3::new(0.01, 0.0, 1.0), base.color, base.normal);
        let far = pixel(Vector3::new(0.03, 0.0, 1.0), base.color, base.normal);
        assert!(metric.distance(&sp, &near) < metric.distance(&sp, &far));

        let dim = pixel(base.world, Vector3::new(0.4, 0.5, 0.5), base.normal);
        let dark = pixel(base.world, Vector3::new(0.1, 0.5, 0.5), base.normal);
        assert!(metric.distance(&sp, &dim) < metric.distance(&sp, &dark));

        let s = std::f32::consts::FRAC_1_SQRT_2;
        let tilted = pixel(base.world, base.color, Vector3::new(0.0, s, -s));
        let side = pixel(base.world, base.color, Vector3::new(0.0, 1.0, 0.0));
        assert!(metric.distance(&sp, &tilted) < metric.distance(&sp, &side));
    }
}
