//! Image containers used by the segmentation pipeline.
//!
//! Inputs arrive as borrowed views (`ImageRgb8`, `ImageDepthU16`) so callers
//! can hand over camera buffers without copying. Stage outputs are owned
//! (`ImageF32` for scalar channels, `LabelImage` for label grids).
pub mod depth;
pub mod f32;
pub mod io;
pub mod labels;
pub mod rgb;
pub mod traits;

pub use self::depth::ImageDepthU16;
pub use self::f32::ImageF32;
pub use self::labels::{LabelImage, INVALID_LABEL};
pub use self::rgb::ImageRgb8;
pub use self::traits::{ImageView, ImageViewMut, Rows, RowsMut};
