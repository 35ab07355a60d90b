//! Diagnostics returned alongside the segmentation result.
//!
//! `SegmentationReport` is the entry point: the region image, the
//! superpixels it was grouped from and a `PipelineTrace` with per-stage
//! timings and counters. Everything except the images serializes to JSON.

pub mod pipeline;
pub mod timing;

pub use pipeline::{
    FeatureStage, GroupingStage, InputDescriptor, PipelineTrace, SegmentationReport,
    SuperpixelStage,
};
pub use timing::{elapsed_ms, StageTiming, TimingBreakdown};
