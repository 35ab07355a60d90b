#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod segmenter;

// Stage modules, usable on their own.
pub mod distance;
pub mod features;
pub mod grouping;
pub mod superpixels;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::{Result, SegmentationError};
pub use crate::segmenter::{Segmenter, SegmenterParams};

pub use crate::diagnostics::{PipelineTrace, SegmentationReport};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use rgbd_superpixels::prelude::*;
///
/// # fn main() -> rgbd_superpixels::Result<()> {
/// let (w, h) = (640usize, 480usize);
/// let color = vec![[128u8; 3]; w * h];
/// let raw_depth = vec![1500u16; w * h];
/// let rgb = ImageRgb8 { w, h, stride: w, data: &color };
/// let depth = ImageDepthU16 { w, h, stride: w, data: &raw_depth };
///
/// let segmenter = Segmenter::new(SegmenterParams::default())?;
/// let regions = segmenter.process(&rgb, &depth)?;
/// println!("labelled pixels: {}", regions.labelled_count());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{ImageDepthU16, ImageRgb8, LabelImage};
    pub use crate::{Segmenter, SegmenterParams};
}

// --- Stage-level API (for tools & advanced users) ---------------------------

pub mod stages {
    pub use crate::distance::{DistanceMetric, DistanceOptions, PixelDistance};
    pub use crate::features::{
        build_feature_field, normalize_density, FeatureField, FeatureOptions, PixelSample,
    };
    pub use crate::grouping::{group_superpixels, Grouping, GroupingOptions, GroupingStats};
    pub use crate::superpixels::{
        ClusteringEngine, ClusteringOptions, FloydSteinbergSampler, LocalKMeans, Seed,
        SeedSampler, SuperpixelAggregate, Superpixels,
    };
}
