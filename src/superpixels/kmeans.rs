//! Iterative local k-means over the feature field.
//!
//! Each superpixel only competes for pixels inside a square window around
//! its centroid whose half-width is `search_factor` projected radii at the
//! superpixel's depth. One iteration assigns every valid pixel inside some
//! window to the closest superpixel under the injected metric, then
//! re-estimates the aggregates from their members. Valid pixels no window
//! reached go to their closest superpixel after the last iteration, so only
//! pixels without depth stay unlabelled. Superpixels that end up without
//! members are dropped and the labels compacted.
use super::accumulator::AggregateAccumulator;
use super::{ClusteringEngine, Seed, SuperpixelAggregate, Superpixels};
use crate::distance::PixelDistance;
use crate::features::{FeatureField, FeatureOptions};
use crate::image::{LabelImage, INVALID_LABEL};
use log::debug;
use serde::{Deserialize, Serialize};

/// Smallest search half-width in pixels.
const MIN_SEARCH_PX: f32 = 2.0;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ClusteringOptions {
    /// Assignment/update rounds (at least one is always run).
    pub iterations: usize,
    /// Search half-width in multiples of the projected superpixel radius.
    pub search_factor: f32,
}

impl Default for ClusteringOptions {
    fn default() -> Self {
        Self {
            iterations: 5,
            search_factor: 2.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct LocalKMeans {
    options: ClusteringOptions,
    features: FeatureOptions,
}

impl LocalKMeans {
    pub fn new(options: ClusteringOptions, features: FeatureOptions) -> Self {
        Self { options, features }
    }

    fn search_half_width(&self, sp: &SuperpixelAggregate, limit: usize) -> usize {
        let r = if sp.world.z > 0.0 {
            self.options.search_factor * self.features.radius_px_at(sp.world.z)
        } else {
            MIN_SEARCH_PX
        };
        (r.max(MIN_SEARCH_PX).ceil() as usize).min(limit)
    }

    fn assign<D: PixelDistance>(
        &self,
        field: &FeatureField,
        aggregates: &[SuperpixelAggregate],
        metric: &D,
        labels: &mut LabelImage,
        best: &mut [f32],
    ) {
        labels.data.fill(INVALID_LABEL);
        best.fill(f32::INFINITY);
        let limit = field.w.max(field.h);
        for (k, sp) in aggregates.iter().enumerate() {
            let r = self.search_half_width(sp, limit);
            let cx = (sp.position.x.round().max(0.0) as usize).min(field.w - 1);
            let cy = (sp.position.y.round().max(0.0) as usize).min(field.h - 1);
            let (x0, x1) = (cx.saturating_sub(r), (cx + r + 1).min(field.w));
            let (y0, y1) = (cy.saturating_sub(r), (cy + r + 1).min(field.h));
            for y in y0..y1 {
                for x in x0..x1 {
                    let i = y * field.w + x;
                    let q = &field.pixels[i];
                    if !q.is_valid() {
                        continue;
                    }
                    let d = metric.distance(sp, q);
                    if d < best[i] {
                        best[i] = d;
                        labels.data[i] = k as i32;
                    }
                }
            }
        }
    }

    fn update(
        field: &FeatureField,
        labels: &LabelImage,
        previous: &[SuperpixelAggregate],
    ) -> Vec<AggregateAccumulator> {
        let mut acc = vec![AggregateAccumulator::default(); previous.len()];
        for (q, &label) in field.pixels.iter().zip(&labels.data) {
            if label != INVALID_LABEL {
                acc[label as usize].push(q);
            }
        }
        acc
    }

    /// Give every valid pixel outside all search windows to its closest
    /// superpixel. Returns the number of pixels adopted.
    fn adopt_orphans<D: PixelDistance>(
        field: &FeatureField,
        aggregates: &[SuperpixelAggregate],
        metric: &D,
        labels: &mut LabelImage,
    ) -> usize {
        let mut adopted = 0;
        for (q, label) in field.pixels.iter().zip(labels.data.iter_mut()) {
            if *label != INVALID_LABEL || !q.is_valid() {
                continue;
            }
            let closest = aggregates
                .iter()
                .map(|sp| metric.distance(sp, q))
                .enumerate()
                .min_by(|a, b| a.1.total_cmp(&b.1));
            if let Some((k, _)) = closest {
                *label = k as i32;
                adopted += 1;
            }
        }
        if adopted > 0 {
            debug!("LocalKMeans adopted {} pixels outside every window", adopted);
        }
        adopted
    }
}

impl ClusteringEngine for LocalKMeans {
    fn cluster<D: PixelDistance>(
        &self,
        field: &FeatureField,
        seeds: &[Seed],
        metric: &D,
    ) -> Superpixels {
        let mut labels = LabelImage::new(field.w, field.h);
        let mut aggregates: Vec<SuperpixelAggregate> = seeds
            .iter()
            .filter(|s| s.x < field.w && s.y < field.h)
            .map(|s| field.get(s.x, s.y))
            .filter(|q| q.is_valid())
            .map(SuperpixelAggregate::from_pixel)
            .collect();
        if aggregates.is_empty() {
            // Too little density for a seed: start from the first valid pixel.
            match field.pixels.iter().find(|q| q.is_valid()) {
                Some(q) => aggregates.push(SuperpixelAggregate::from_pixel(q)),
                None => return Superpixels { labels, aggregates },
            }
        }

        let mut best = vec![f32::INFINITY; field.w * field.h];
        let mut acc = Vec::new();
        for _ in 0..self.options.iterations.max(1) {
            self.assign(field, &aggregates, metric, &mut labels, &mut best);
            acc = Self::update(field, &labels, &aggregates);
            aggregates = acc
                .iter()
                .zip(&aggregates)
                .map(|(a, prev)| a.finish().unwrap_or(*prev))
                .collect();
        }
        let adopted = Self::adopt_orphans(field, &aggregates, metric, &mut labels);
        if adopted > 0 {
            acc = Self::update(field, &labels, &aggregates);
            aggregates = acc
                .iter()
                .zip(&aggregates)
                .map(|(a, prev)| a.finish().unwrap_or(*prev))
                .collect();
        }

        // Drop superpixels that lost all members in the last assignment.
        let mut remap = vec![INVALID_LABEL; aggregates.len()];
        let mut kept = Vec::with_capacity(aggregates.len());
        for (k, (a, sp)) in acc.iter().zip(&aggregates).enumerate() {
            if a.len() > 0 {
                remap[k] = kept.len() as i32;
                kept.push(*sp);
            }
        }
        labels.map_labels(|l| remap[l as usize]);
        debug!(
            "LocalKMeans seeds={} superpixels={} labelled={}",
            seeds.len(),
            kept.len(),
            labels.labelled_count()
        );
        Superpixels {
            labels,
            aggregates: kept,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{DistanceMetric, DistanceOptions};
    use crate::features::PixelSample;
    use nalgebra::{Vector2, Vector3};

    /// Fronto-parallel plane at 1 m, left half red, right half blue.
    fn two_tone_plane(w: usize, h: usize) -> FeatureField {
        let focal = 50.0;
        let mut pixels = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                let position = Vector2::new(x as f32, y as f32);
                let color = if x < w / 2 {
                    Vector3::new(1.0, 0.0, 0.0)
                } else {
                    Vector3::new(0.0, 0.0, 1.0)
                };
                let world = Vector3::new(
                    (x as f32 - w as f32 / 2.0) / focal,
                    (y as f32 - h as f32 / 2.0) / focal,
                    1.0,
                );
                pixels.push(PixelSample {
                    position,
                    color,
                    depth: 1.0,
                    world,
                    normal: Vector3::new(0.0, 0.0, -1.0),
                    density: 0.01,
                    num: 1.0,
                });
            }
        }
        FeatureField::from_samples(w, h, pixels).unwrap()
    }

    fn engine() -> (LocalKMeans, DistanceMetric) {
        let features = FeatureOptions {
            focal_px: 50.0,
            radius: 0.1,
            ..FeatureOptions::default()
        };
        let metric = DistanceMetric::new(
            &DistanceOptions {
                compactness: 0.2,
                normal_weight: 0.0,
            },
            features.radius,
        );
        (LocalKMeans::new(ClusteringOptions::default(), features), metric)
    }

    #[test]
    fn labels_are_dense_and_cover_valid_pixels() {
        let field = two_tone_plane(32, 16);
        let seeds = [Seed { x: 8, y: 8 }, Seed { x: 24, y: 8 }];
        let (kmeans, metric) = engine();
        let sp = kmeans.cluster(&field, &seeds, &metric);
        assert_eq!(sp.len(), 2);
        sp.validate().unwrap();
        assert_eq!(sp.labels.labelled_count(), 32 * 16);
        assert_eq!(sp.labels.distinct_labels(), vec![0, 1]);
        let total: usize = sp.aggregates.iter().map(|a| a.count).sum();
        assert_eq!(total, 32 * 16);
    }

    #[test]
    fn color_boundary_separates_superpixels() {
        let field = two_tone_plane(32, 16);
        let seeds = [Seed { x: 12, y: 8 }, Seed { x: 20, y: 8 }];
        let (kmeans, metric) = engine();
        let sp = kmeans.cluster(&field, &seeds, &metric);
        for y in 0..16 {
            assert_eq!(sp.labels.get(2, y), sp.labels.get(15, y));
            assert_ne!(sp.labels.get(15, y), sp.labels.get(16, y));
        }
    }

    #[test]
    fn valid_island_outside_every_window_is_labelled() {
        let mut field = two_tone_plane(48, 8);
        for q in field.pixels.iter_mut() {
            let x = q.position.x as usize;
            if (12..44).contains(&x) {
                *q = PixelSample::invalid(q.position, q.color);
            }
        }
        let seeds = [Seed { x: 5, y: 4 }];
        let (kmeans, metric) = engine();
        let sp = kmeans.cluster(&field, &seeds, &metric);
        assert_eq!(sp.len(), 1);
        for y in 0..8 {
            for x in 44..48 {
                assert_eq!(sp.labels.get(x, y), 0, "({x},{y})");
            }
        }
        assert_eq!(sp.labels.labelled_count(), field.valid_count());
        assert_eq!(sp.aggregates[0].count, field.valid_count());
    }

    #[test]
    fn field_without_seeds_still_gets_one_superpixel() {
        let field = two_tone_plane(16, 8);
        let (kmeans, metric) = engine();
        let sp = kmeans.cluster(&field, &[], &metric);
        assert_eq!(sp.len(), 1);
        assert_eq!(sp.labels.labelled_count(), 16 * 8);
    }

    #[test]
    fn seeds_on_invalid_pixels_are_ignored() {
        let mut field = two_tone_plane(16, 8);
        let hole = field.pixels[3 * 16 + 3].position;
        field.pixels[3 * 16 + 3] = PixelSample::invalid(hole, Vector3::zeros());
        let seeds = [Seed { x: 3, y: 3 }, Seed { x: 12, y: 4 }];
        let (kmeans, metric) = engine();
        let sp = kmeans.cluster(&field, &seeds, &metric);
        assert_eq!(sp.len(), 1);
        assert_eq!(sp.labels.get(3, 3), INVALID_LABEL);
    }
}
