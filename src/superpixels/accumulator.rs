use super::SuperpixelAggregate;
use crate::features::PixelSample;
use nalgebra::{Vector2, Vector3};

/// Running sums for one superpixel; sums are kept in f64 so that means of
/// identical samples come out exact.
#[derive(Clone, Debug, Default)]
pub(crate) struct AggregateAccumulator {
    sum_position: Vector2<f64>,
    sum_world: Vector3<f64>,
    sum_normal: Vector3<f64>,
    sum_color: Vector3<f64>,
    count: usize,
}

impl AggregateAccumulator {
    pub(crate) fn push(&mut self, q: &PixelSample) {
        self.sum_position += q.position.cast::<f64>();
        self.sum_world += q.world.cast::<f64>();
        self.sum_normal += q.normal.cast::<f64>();
        self.sum_color += q.color.cast::<f64>();
        self.count += 1;
    }

    pub(crate) fn len(&self) -> usize {
        self.count
    }

    /// Mean features, or `None` when nothing was pushed.
    pub(crate) fn finish(&self) -> Option<SuperpixelAggregate> {
        if self.count == 0 {
            return None;
        }
        let n = self.count as f64;
        let normal = self
            .sum_normal
            .try_normalize(1e-12)
            .unwrap_or_else(|| Vector3::new(0.0, 0.0, -1.0));
        Some(SuperpixelAggregate {
            position: (self.sum_position / n).cast::<f32>(),
            world: (self.sum_world / n).cast::<f32>(),
            normal: normal.cast::<f32>(),
            color: (self.sum_color / n).cast::<f32>(),
            count: self.count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_identical_samples_is_exact() {
        let mut q = PixelSample::invalid(Vector2::new(3.0, 4.0), Vector3::new(0.1, 0.2, 0.3));
        q.world = Vector3::new(0.013, -0.07, 1.337);
        q.num = 1.0;
        let mut acc = AggregateAccumulator::default();
        assert!(acc.finish().is_none());
        for _ in 0..97 {
            acc.push(&q);
        }
        let sp = acc.finish().unwrap();
        assert_eq!(acc.len(), 97);
        assert_eq!(sp.world, q.world);
        assert_eq!(sp.normal, Vector3::new(0.0, 0.0, -1.0));
        assert_eq!(sp.count, 97);
    }
}
