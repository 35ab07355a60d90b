//! Parameter types configuring the segmentation stages.
//!
//! `SegmenterParams` bundles one option struct per stage. Every struct
//! deserializes with per-field defaults, so a JSON config only needs to name
//! the knobs it changes. Defaults target a VGA Kinect-class sensor with depth
//! in millimetres.

use crate::distance::DistanceOptions;
use crate::error::{Result, SegmentationError};
use crate::features::FeatureOptions;
use crate::grouping::GroupingOptions;
use crate::superpixels::ClusteringOptions;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SegmenterParams {
    /// Camera model, superpixel radius and gradient window.
    pub features: FeatureOptions,
    /// Requested superpixel count; `0` lets the radius decide.
    pub num_superpixels: usize,
    pub distance: DistanceOptions,
    pub clustering: ClusteringOptions,
    pub grouping: GroupingOptions,
}

impl SegmenterParams {
    /// Reject parameter values the stages cannot work with.
    pub fn validate(&self) -> Result<()> {
        positive("features.focal_px", self.features.focal_px)?;
        positive("features.depth_to_z", self.features.depth_to_z)?;
        positive("features.radius", self.features.radius)?;
        positive("features.window_scale", self.features.window_scale)?;
        unit_interval("distance.compactness", self.distance.compactness)?;
        unit_interval("distance.normal_weight", self.distance.normal_weight)?;
        positive("clustering.search_factor", self.clustering.search_factor)?;
        let concave = self.grouping.concave_weight;
        if concave.is_nan() || concave < 0.0 {
            return Err(invalid(
                "grouping.concave_weight",
                format!("must be non-negative, got {concave}"),
            ));
        }
        Ok(())
    }
}

fn invalid(name: &'static str, reason: String) -> SegmentationError {
    SegmentationError::InvalidParameter { name, reason }
}

fn positive(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(name, format!("must be finite and > 0, got {value}")))
    }
}

fn unit_interval(name: &'static str, value: f32) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(name, format!("must lie in [0, 1], got {value}")))
    }
}
