//! Feature field construction: raw RGB-D in, per-pixel geometry out.
//!
//! For every pixel with a depth reading the builder computes
//!
//! - the metric depth and the back-projected camera-frame point (pinhole
//!   model, principal point at the image centre);
//! - an edge-aware depth gradient over a depth-adaptive window
//!   ([`gradient`]);
//! - a unit normal derived from the gradient, flipped to face the camera;
//! - a density value: the expected number of superpixels covering this
//!   pixel, `(z / (r·f))² / π · sqrt(|∇z|² + 1)`.
//!
//! Pixels without depth keep sentinel values (`num = 0`, `density = 0`,
//! normal `(0, 0, −1)`, world at the origin) and are skipped downstream.
//!
//! [`normalize_density`] optionally rescales the field so that it sums to a
//! requested superpixel count.

mod density;
mod field;
pub mod gradient;
mod options;

pub use density::normalize_density;
pub use field::{build_feature_field, FeatureField, PixelSample};
pub use options::FeatureOptions;
