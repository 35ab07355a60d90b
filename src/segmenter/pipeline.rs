//! Segmenter pipeline: RGB-D frame in, region image out.
//!
//! ```no_run
//! use rgbd_superpixels::image::{ImageDepthU16, ImageRgb8};
//! use rgbd_superpixels::{Segmenter, SegmenterParams};
//!
//! # fn example(rgb: ImageRgb8, depth: ImageDepthU16) {
//! let segmenter = Segmenter::new(SegmenterParams::default()).unwrap();
//! let report = segmenter.process_with_diagnostics(&rgb, &depth).unwrap();
//! println!("{} regions", report.region_count);
//! # }
//! ```

// Stages
// - Features: per-pixel world point, normal and density (`features`).
// - Density: optional rescale to the requested superpixel count.
// - Seeds: injected `SeedSampler` on the density channel.
// - Clustering: injected `ClusteringEngine` under the `DistanceMetric`.
// - Grouping: adjacency → weights → union-find → compact relabel.

use super::params::SegmenterParams;
use crate::diagnostics::{
    elapsed_ms, FeatureStage, GroupingStage, InputDescriptor, PipelineTrace, SegmentationReport,
    SuperpixelStage, TimingBreakdown,
};
use crate::distance::DistanceMetric;
use crate::error::Result;
use crate::features::{build_feature_field, normalize_density, FeatureField};
use crate::grouping::group_superpixels;
use crate::image::{ImageDepthU16, ImageRgb8, LabelImage};
use crate::superpixels::{ClusteringEngine, FloydSteinbergSampler, LocalKMeans, SeedSampler};
use log::debug;
use std::time::Instant;

/// Depth-adaptive superpixel segmentation with geometric region grouping.
///
/// Seed placement and clustering are strategies; [`Segmenter::new`] uses
/// [`FloydSteinbergSampler`] and [`LocalKMeans`].
pub struct Segmenter<S = FloydSteinbergSampler, C = LocalKMeans> {
    params: SegmenterParams,
    sampler: S,
    engine: C,
}

impl Segmenter {
    /// Create a segmenter with the default seed sampler and clustering engine.
    pub fn new(params: SegmenterParams) -> Result<Self> {
        let engine = LocalKMeans::new(params.clustering.clone(), params.features.clone());
        Self::with_strategies(params, FloydSteinbergSampler::new(), engine)
    }
}

impl<S: SeedSampler, C: ClusteringEngine> Segmenter<S, C> {
    /// Create a segmenter with caller-supplied strategies.
    pub fn with_strategies(params: SegmenterParams, sampler: S, engine: C) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            sampler,
            engine,
        })
    }

    /// Feature field with the density normalized to the requested count.
    /// Returns the field and the applied density scale.
    pub fn features(
        &self,
        rgb: &ImageRgb8,
        depth: &ImageDepthU16,
    ) -> Result<(FeatureField, Option<f32>)> {
        let mut field = build_feature_field(rgb, depth, &self.params.features)?;
        let scale = normalize_density(&mut field, self.params.num_superpixels);
        Ok((field, scale))
    }

    /// Segment a frame and return only the region image.
    pub fn process(&self, rgb: &ImageRgb8, depth: &ImageDepthU16) -> Result<LabelImage> {
        Ok(self.process_with_diagnostics(rgb, depth)?.regions)
    }

    /// Segment a frame and return the regions with a detailed report.
    pub fn process_with_diagnostics(
        &self,
        rgb: &ImageRgb8,
        depth: &ImageDepthU16,
    ) -> Result<SegmentationReport> {
        let (width, height) = (depth.w, depth.h);
        debug!(
            "Segmenter::process start w={} h={} radius={} target={}",
            width, height, self.params.features.radius, self.params.num_superpixels
        );
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();

        let (features, features_ms) = timings.measure("features", || self.features(rgb, depth));
        let (field, density_scale) = features?;
        let feature_stage = FeatureStage {
            elapsed_ms: features_ms,
            valid_pixels: field.valid_count(),
            total_density: field.total_density(),
            density_scale,
        };

        let (seeds, sampling_ms) = timings.measure("seeds", || self.sampler.sample(&field));
        let metric = DistanceMetric::new(&self.params.distance, self.params.features.radius);
        let (superpixels, clustering_ms) =
            timings.measure("clustering", || self.engine.cluster(&field, &seeds, &metric));
        let superpixel_stage = SuperpixelStage {
            sampling_ms,
            clustering_ms,
            seeds: seeds.len(),
            superpixels: superpixels.len(),
            labelled_pixels: superpixels.labels.labelled_count(),
        };
        debug!(
            "Segmenter::process seeds={} superpixels={}",
            seeds.len(),
            superpixels.len()
        );

        let (grouping, grouping_ms) = timings.measure("grouping", || {
            group_superpixels(&superpixels, &self.params.grouping)
        });
        let grouping = grouping?;
        timings.total_ms = elapsed_ms(total_start);
        debug!(
            "Segmenter::process regions={} total_ms={:.3}",
            grouping.stats.regions, timings.total_ms
        );

        Ok(SegmentationReport {
            region_count: grouping.stats.regions,
            trace: PipelineTrace {
                input: InputDescriptor { width, height },
                timings,
                features: feature_stage,
                superpixels: superpixel_stage,
                grouping: GroupingStage {
                    elapsed_ms: grouping_ms,
                    stats: grouping.stats,
                },
            },
            regions: grouping.regions,
            superpixels,
        })
    }
}
