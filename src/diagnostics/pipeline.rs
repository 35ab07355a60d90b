use crate::diagnostics::TimingBreakdown;
use crate::grouping::GroupingStats;
use crate::image::LabelImage;
use crate::superpixels::Superpixels;
use serde::Serialize;

/// Result produced by [`Segmenter::process_with_diagnostics`](crate::Segmenter).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentationReport {
    /// Region id per pixel, `-1` for pixels without depth or label.
    #[serde(skip)]
    pub regions: LabelImage,
    /// Superpixels the regions were grouped from.
    #[serde(skip)]
    pub superpixels: Superpixels,
    pub region_count: usize,
    pub trace: PipelineTrace,
}

/// Per-stage record of one segmentation run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTrace {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    pub features: FeatureStage,
    pub superpixels: SuperpixelStage,
    pub grouping: GroupingStage,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureStage {
    pub elapsed_ms: f64,
    pub valid_pixels: usize,
    /// Density sum after the optional normalization.
    pub total_density: f32,
    /// Factor applied by the density normalizer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub density_scale: Option<f32>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuperpixelStage {
    pub sampling_ms: f64,
    pub clustering_ms: f64,
    pub seeds: usize,
    pub superpixels: usize,
    pub labelled_pixels: usize,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupingStage {
    pub elapsed_ms: f64,
    #[serde(flatten)]
    pub stats: GroupingStats,
}
