//! Segmenter orchestrating the full RGB-D → regions pipeline.
//!
//! Overview
//! - Builds the per-pixel feature field (world points, camera-facing normals,
//!   density) and optionally rescales the density to a requested count.
//! - Places seeds and grows superpixels with the injected strategies under
//!   the depth-adaptive distance metric.
//! - Groups superpixels into regions with a convexity-weighted union-find.
//!
//! Modules
//! - [`params`] – configuration types used by the segmenter and the tool.
//! - `pipeline` – the [`Segmenter`] implementation.

pub mod params;
mod pipeline;

pub use params::SegmenterParams;
pub use pipeline::Segmenter;
