//! I/O helpers for RGB-D frames, label images and JSON.
//!
//! - `load_rgb_image`: read a PNG/JPEG/etc. into an owned 8-bit RGB buffer.
//! - `load_depth_image`: read a 16-bit grayscale PNG into an owned depth buffer.
//! - `save_label_image`: write a `LabelImage` as a false-color PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ImageDepthU16, ImageRgb8, ImageView, LabelImage, INVALID_LABEL};
use image::{ImageBuffer, Rgb, RgbImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Owned 8-bit RGB buffer with borrowed view conversion.
#[derive(Clone, Debug)]
pub struct RgbBuffer {
    width: usize,
    height: usize,
    data: Vec<[u8; 3]>,
}

impl RgbBuffer {
    pub fn new(width: usize, height: usize, data: Vec<[u8; 3]>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Borrow as a read-only `ImageRgb8` view
    pub fn as_view(&self) -> ImageRgb8<'_> {
        ImageRgb8 {
            w: self.width,
            h: self.height,
            stride: self.width,
            data: &self.data,
        }
    }
}

/// Owned 16-bit depth buffer with borrowed view conversion.
#[derive(Clone, Debug)]
pub struct DepthBuffer {
    width: usize,
    height: usize,
    data: Vec<u16>,
}

impl DepthBuffer {
    pub fn new(width: usize, height: usize, data: Vec<u16>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Borrow as a read-only `ImageDepthU16` view
    pub fn as_view(&self) -> ImageDepthU16<'_> {
        ImageDepthU16 {
            w: self.width,
            h: self.height,
            stride: self.width,
            data: &self.data,
        }
    }
}

/// Load an image from disk and convert to 8-bit RGB.
pub fn load_rgb_image(path: &Path) -> Result<RgbBuffer, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_rgb8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data = img.pixels().map(|p| p.0).collect();
    Ok(RgbBuffer::new(width, height, data))
}

/// Load a depth map from disk as 16-bit grayscale (sensor units, 0 = invalid).
pub fn load_depth_image(path: &Path) -> Result<DepthBuffer, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_luma16();
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data = img.into_raw();
    Ok(DepthBuffer::new(width, height, data))
}

/// Save a label grid as a false-color PNG; unlabelled pixels are black.
pub fn save_label_image(labels: &LabelImage, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut out: RgbImage = ImageBuffer::new(labels.w as u32, labels.h as u32);
    for (y, row) in labels.rows().enumerate() {
        for (x, &label) in row.iter().enumerate() {
            out.put_pixel(x as u32, y as u32, Rgb(label_color(label)));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

/// Stable pseudo-random color per label (integer hash, no RNG state).
fn label_color(label: i32) -> [u8; 3] {
    if label == INVALID_LABEL {
        return [0, 0, 0];
    }
    let mut h = (label as u32).wrapping_mul(0x9E37_79B9);
    h ^= h >> 15;
    h = h.wrapping_mul(0x85EB_CA6B);
    h ^= h >> 13;
    [
        64 + (h & 0xBF) as u8,
        64 + ((h >> 8) & 0xBF) as u8,
        64 + ((h >> 16) & 0xBF) as u8,
    ]
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::label_color;

    #[test]
    fn invalid_label_is_black_and_valid_labels_are_not() {
        assert_eq!(label_color(-1), [0, 0, 0]);
        for label in 0..32 {
            assert_ne!(label_color(label), [0, 0, 0]);
        }
        assert_ne!(label_color(1), label_color(2));
    }
}
