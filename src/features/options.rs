use serde::{Deserialize, Serialize};

/// Camera model and physical scale used to turn raw depth into geometry.
///
/// - `focal_px`: pinhole focal length in pixels (principal point is taken as
///   the image centre).
/// - `depth_to_z`: metres per raw depth unit (e.g. `0.001` for millimetres).
/// - `radius`: target superpixel radius in metres.
/// - `window_scale`: factor on `radius · focal / depth` giving the finite
///   difference window width in pixels before rounding.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct FeatureOptions {
    pub focal_px: f32,
    pub depth_to_z: f32,
    pub radius: f32,
    pub window_scale: f32,
}

impl Default for FeatureOptions {
    fn default() -> Self {
        Self {
            focal_px: 540.0,
            depth_to_z: 0.001,
            radius: 0.018,
            window_scale: 0.1,
        }
    }
}

impl FeatureOptions {
    /// Projected superpixel radius in pixels at metric depth `depth_m`.
    #[inline]
    pub fn radius_px_at(&self, depth_m: f32) -> f32 {
        self.radius * self.focal_px / depth_m
    }
}
