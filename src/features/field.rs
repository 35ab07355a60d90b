//! Per-pixel feature field built from a registered RGB-D frame.
use super::gradient::{backproject, density, local_depth_gradient, normal_from_gradient};
use super::options::FeatureOptions;
use crate::error::{Result, SegmentationError};
use crate::image::{ImageDepthU16, ImageF32, ImageRgb8, ImageView};
use log::debug;
use nalgebra::{Vector2, Vector3};

/// Geometric and photometric features of a single pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelSample {
    /// Pixel coordinates `(x, y)`.
    pub position: Vector2<f32>,
    /// RGB in `[0, 1]³`.
    pub color: Vector3<f32>,
    /// Metric depth; `0` when the sensor gave no reading.
    pub depth: f32,
    /// Back-projected camera-frame point.
    pub world: Vector3<f32>,
    /// Unit normal facing the camera.
    pub normal: Vector3<f32>,
    /// Expected superpixels per pixel.
    pub density: f32,
    /// `1.0` for valid pixels, `0.0` otherwise.
    pub num: f32,
}

impl PixelSample {
    /// A pixel without depth: no density, origin world point, normal `(0,0,-1)`.
    pub fn invalid(position: Vector2<f32>, color: Vector3<f32>) -> Self {
        Self {
            position,
            color,
            depth: 0.0,
            world: Vector3::zeros(),
            normal: Vector3::new(0.0, 0.0, -1.0),
            density: 0.0,
            num: 0.0,
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.num > 0.0
    }
}

/// Row-major grid of [`PixelSample`]s for one frame.
#[derive(Clone, Debug)]
pub struct FeatureField {
    pub w: usize,
    pub h: usize,
    pub pixels: Vec<PixelSample>,
}

impl FeatureField {
    /// Wrap precomputed samples. Returns `None` on a size mismatch.
    pub fn from_samples(w: usize, h: usize, pixels: Vec<PixelSample>) -> Option<Self> {
        (pixels.len() == w * h).then_some(Self { w, h, pixels })
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> &PixelSample {
        &self.pixels[y * self.w + x]
    }

    pub fn valid_count(&self) -> usize {
        self.pixels.iter().filter(|p| p.is_valid()).count()
    }

    pub fn total_density(&self) -> f32 {
        self.pixels.iter().map(|p| p.density).sum()
    }

    /// Copy of the density channel, the input seed samplers work on.
    pub fn density_image(&self) -> ImageF32 {
        let mut out = ImageF32::new(self.w, self.h);
        for (dst, src) in out.data.iter_mut().zip(&self.pixels) {
            *dst = src.density;
        }
        out
    }
}

impl ImageView for FeatureField {
    type Pixel = PixelSample;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.w
    }
    #[inline]
    fn row(&self, y: usize) -> &[PixelSample] {
        let start = y * self.w;
        &self.pixels[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[PixelSample]> {
        Some(&self.pixels[..])
    }
}

/// Compute world points, normals and density for every pixel of a frame.
///
/// Rows are independent; with the `parallel` feature they are processed on
/// the rayon pool and produce bit-identical results.
pub fn build_feature_field(
    rgb: &ImageRgb8,
    depth: &ImageDepthU16,
    opts: &FeatureOptions,
) -> Result<FeatureField> {
    if rgb.dims() != depth.dims() {
        return Err(SegmentationError::DimensionMismatch {
            color: rgb.dims(),
            depth: depth.dims(),
        });
    }
    let (w, h) = depth.dims();
    let mut pixels = vec![PixelSample::invalid(Vector2::zeros(), Vector3::zeros()); w * h];
    if w == 0 || h == 0 {
        return Ok(FeatureField { w, h, pixels });
    }
    let center = Vector2::new(w as f32, h as f32) * 0.5;

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        pixels
            .par_chunks_mut(w)
            .enumerate()
            .for_each(|(y, row)| fill_row(row, y, rgb, depth, &center, opts));
    }
    #[cfg(not(feature = "parallel"))]
    for (y, row) in pixels.chunks_mut(w).enumerate() {
        fill_row(row, y, rgb, depth, &center, opts);
    }

    let field = FeatureField { w, h, pixels };
    debug!(
        "build_feature_field w={} h={} valid={} density={:.2}",
        w,
        h,
        field.valid_count(),
        field.total_density()
    );
    Ok(field)
}

fn fill_row(
    out: &mut [PixelSample],
    y: usize,
    rgb: &ImageRgb8,
    depth: &ImageDepthU16,
    center: &Vector2<f32>,
    opts: &FeatureOptions,
) {
    let colors = rgb.row(y);
    let depths = depth.row(y);
    for (x, q) in out.iter_mut().enumerate() {
        let position = Vector2::new(x as f32, y as f32);
        let [r, g, b] = colors[x];
        let color = Vector3::new(r as f32, g as f32, b as f32) / 255.0;
        let raw = depths[x];
        if raw == 0 {
            *q = PixelSample::invalid(position, color);
            continue;
        }
        let depth_m = raw as f32 * opts.depth_to_z;
        let world = backproject(&position, center, depth_m, opts.focal_px);
        let gradient = local_depth_gradient(depth, x, y, opts);
        *q = PixelSample {
            position,
            color,
            depth: depth_m,
            world,
            normal: normal_from_gradient(&gradient, &world),
            density: density(depth_m, &gradient, opts),
            num: 1.0,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_depth_yields_sentinel_samples() {
        let (w, h) = (16usize, 12usize);
        let colors = vec![[255u8, 0, 0]; w * h];
        let mut depths = vec![1500u16; w * h];
        depths[5 * w + 7] = 0;
        let rgb = ImageRgb8 {
            w,
            h,
            stride: w,
            data: &colors,
        };
        let depth = ImageDepthU16 {
            w,
            h,
            stride: w,
            data: &depths,
        };
        let field = build_feature_field(&rgb, &depth, &FeatureOptions::default()).unwrap();
        assert_eq!(field.valid_count(), w * h - 1);

        let hole = field.get(7, 5);
        assert_eq!(hole.num, 0.0);
        assert_eq!(hole.density, 0.0);
        assert_eq!(hole.world, Vector3::zeros());
        assert_eq!(hole.normal, Vector3::new(0.0, 0.0, -1.0));
        assert_eq!(hole.color, Vector3::new(1.0, 0.0, 0.0));

        let p = field.get(3, 3);
        assert!((p.depth - 1.5).abs() < 1e-6);
        assert!(p.density > 0.0);
        assert!((p.normal.norm() - 1.0).abs() < 1e-5);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_build_matches_sequential_rows() {
        let (w, h) = (40usize, 30usize);
        let colors: Vec<[u8; 3]> = (0..w * h).map(|i| [(i % 251) as u8, 7, 200]).collect();
        let depths: Vec<u16> = (0..h)
            .flat_map(|y| {
                (0..w).map(move |x| match (x, y) {
                    (12..=14, 8..=10) => 0,
                    _ if x > 25 => 900,
                    _ => 1200 + 7 * x as u16 + 3 * y as u16,
                })
            })
            .collect();
        let rgb = ImageRgb8 {
            w,
            h,
            stride: w,
            data: &colors,
        };
        let depth = ImageDepthU16 {
            w,
            h,
            stride: w,
            data: &depths,
        };
        let opts = FeatureOptions {
            focal_px: 80.0,
            radius: 0.05,
            ..FeatureOptions::default()
        };
        let field = build_feature_field(&rgb, &depth, &opts).unwrap();

        let center = Vector2::new(w as f32, h as f32) * 0.5;
        let mut expected = vec![PixelSample::invalid(Vector2::zeros(), Vector3::zeros()); w * h];
        for (y, row) in expected.chunks_mut(w).enumerate() {
            fill_row(row, y, &rgb, &depth, &center, &opts);
        }
        for (i, (got, want)) in field.pixels.iter().zip(&expected).enumerate() {
            assert_eq!(got, want, "pixel {i}");
        }
    }

    #[test]
    fn mismatched_dimensions_are_rejected() {
        let colors = vec![[0u8; 3]; 4];
        let depths = vec![1u16; 6];
        let rgb = ImageRgb8 {
            w: 2,
            h: 2,
            stride: 2,
            data: &colors,
        };
        let depth = ImageDepthU16 {
            w: 3,
            h: 2,
            stride: 3,
            data: &depths,
        };
        let err = build_feature_field(&rgb, &depth, &FeatureOptions::default()).unwrap_err();
        assert!(matches!(err, SegmentationError::DimensionMismatch { .. }));
    }
}
