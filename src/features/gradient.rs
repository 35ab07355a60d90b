//! Edge-aware depth gradients and the per-pixel geometry derived from them.
//!
//! The gradient at a pixel is a five-tap finite difference along each axis
//! over a window whose width grows as the surface gets closer, so that every
//! estimate spans roughly the same metric footprint. Taps that hit missing
//! depth fall back to one-sided differences; when all five taps are valid the
//! two half-window slopes are blended with weights that favour the smoother
//! side, which keeps the estimate from straddling a depth discontinuity.
//!
//! Outputs are physical slopes (metres of depth per metre of lateral extent).
use super::options::FeatureOptions;
use crate::image::ImageDepthU16;
use nalgebra::{Vector2, Vector3};

/// Smallest finite difference window in pixels.
const MIN_WINDOW: usize = 4;

/// First derivative from five evenly spaced raw depth samples `v0..v4`
/// centred on `v2`, in raw units per half window.
pub fn local_finite_difference(v0: u16, v1: u16, v2: u16, v3: u16, v4: u16) -> f32 {
    let v0f = v0 as f32;
    let v1f = v1 as f32;
    let v2f = v2 as f32;
    let v3f = v3 as f32;
    let v4f = v4 as f32;

    // Speckle at both far taps only: use the inner pair directly.
    if v0 == 0 && v4 == 0 && v1 != 0 && v2 != 0 && v3 != 0 {
        return v3f - v1f;
    }

    let left_invalid = v0 == 0 || v1 == 0;
    let right_invalid = v3 == 0 || v4 == 0;
    match (left_invalid, right_invalid) {
        (true, true) => 0.0,
        (true, false) => v4f - v2f,
        (false, true) => v2f - v0f,
        (false, false) => {
            // Second differences on each side; the curvier side gets less weight.
            let a = (v2f + v0f - 2.0 * v1f).abs();
            let b = (v4f + v2f - 2.0 * v3f).abs();
            let (p, q) = if a + b == 0.0 {
                (0.5, 0.5)
            } else {
                (a / (a + b), b / (a + b))
            };
            q * (v2f - v0f) + p * (v4f - v2f)
        }
    }
}

/// Finite difference window width in pixels at metric depth `depth_m`.
///
/// Always even and at least [`MIN_WINDOW`], so the half window is integral.
pub fn gradient_window(depth_m: f32, opts: &FeatureOptions) -> usize {
    let window = opts.window_scale * opts.radius_px_at(depth_m);
    let mut w = ((window + 0.5) as usize).max(MIN_WINDOW);
    if w % 2 == 1 {
        w += 1;
    }
    w
}

/// Physical depth gradient `(∂z/∂X, ∂z/∂Y)` at pixel `(x, y)`.
///
/// Returns zero for pixels with missing depth and for pixels closer than one
/// window to the image border.
pub fn local_depth_gradient(
    depth: &ImageDepthU16,
    x: usize,
    y: usize,
    opts: &FeatureOptions,
) -> Vector2<f32> {
    let d00 = depth.get(x, y);
    if d00 == 0 {
        return Vector2::zeros();
    }
    let z_over_f = d00 as f32 * opts.depth_to_z / opts.focal_px;
    let w = gradient_window(d00 as f32 * opts.depth_to_z, opts);
    let hw = w / 2;

    if x < w || y < w || depth.w <= x + w || depth.h <= y + w {
        return Vector2::zeros();
    }

    let dx = local_finite_difference(
        depth.get(x - w, y),
        depth.get(x - hw, y),
        d00,
        depth.get(x + hw, y),
        depth.get(x + w, y),
    );
    let dy = local_finite_difference(
        depth.get(x, y - w),
        depth.get(x, y - hw),
        d00,
        depth.get(x, y + hw),
        depth.get(x, y + w),
    );

    // One half window spans `hw · z/f` metres laterally and the difference
    // covers two of them, hence `w · z/f`.
    let scl = opts.depth_to_z / (w as f32 * z_over_f);
    Vector2::new(dx, dy) * scl
}

/// Unit surface normal from a depth gradient, oriented towards the camera
/// (which sits at the origin), i.e. `normal · (−world) ≥ 0`.
pub fn normal_from_gradient(g: &Vector2<f32>, world: &Vector3<f32>) -> Vector3<f32> {
    let scl = 1.0 / (1.0 + g.x * g.x + g.y * g.y).sqrt();
    let normal = Vector3::new(scl * g.x, scl * g.y, -scl);
    if normal.dot(&-world) < 0.0 {
        -normal
    } else {
        normal
    }
}

/// Pinhole back-projection of pixel `pos` at metric depth `depth_m`.
#[inline]
pub fn backproject(
    pos: &Vector2<f32>,
    center: &Vector2<f32>,
    depth_m: f32,
    focal_px: f32,
) -> Vector3<f32> {
    Vector3::new(pos.x - center.x, pos.y - center.y, focal_px) * (depth_m / focal_px)
}

/// Expected superpixels per pixel: inverse projected area of a surface disk of
/// `radius` at `depth_m`, inflated by the surface tilt.
#[inline]
pub fn density(depth_m: f32, gradient: &Vector2<f32>, opts: &FeatureOptions) -> f32 {
    let q = depth_m / (opts.radius * opts.focal_px);
    q * q / std::f32::consts::PI * (gradient.norm_squared() + 1.0).sqrt()
}
