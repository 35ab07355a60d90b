//! Deterministic seed placement by error diffusion over the density field.
//!
//! Per-pixel densities are tiny (one superpixel spans hundreds of pixels),
//! and plain per-pixel diffusion leaks most of the mass through the image
//! border. The field is therefore first summed into square blocks sized so
//! that a typical block carries about half a superpixel, and Floyd–Steinberg
//! diffusion runs on the block grid. Each emitting block contributes one seed
//! at its centre, or at its densest valid pixel when the centre has no depth.
use super::{Seed, SeedSampler};
use crate::features::FeatureField;
use crate::image::ImageF32;
use log::debug;

/// Expected density mass per block.
const TARGET_BLOCK_MASS: f32 = 0.5;

#[derive(Clone, Debug, Default)]
pub struct FloydSteinbergSampler;

impl FloydSteinbergSampler {
    pub fn new() -> Self {
        Self
    }

    /// Block edge length in pixels for a field with the given mean density.
    fn block_size(mean_density: f32) -> usize {
        if mean_density <= 0.0 {
            return 1;
        }
        ((TARGET_BLOCK_MASS / mean_density).sqrt() as usize).max(1)
    }

    fn block_masses(density: &ImageF32, b: usize) -> ImageF32 {
        let mut blocks = ImageF32::new(density.w.div_ceil(b), density.h.div_ceil(b));
        for y in 0..density.h {
            for x in 0..density.w {
                blocks.add(x / b, y / b, density.get(x, y));
            }
        }
        blocks
    }

    /// Pixel inside block `(bx, by)` that receives the seed.
    fn seed_in_block(field: &FeatureField, bx: usize, by: usize, b: usize) -> Option<Seed> {
        let x0 = bx * b;
        let y0 = by * b;
        let x1 = (x0 + b).min(field.w);
        let y1 = (y0 + b).min(field.h);
        let cx = (x0 + x1) / 2;
        let cy = (y0 + y1) / 2;
        if field.get(cx, cy).is_valid() {
            return Some(Seed { x: cx, y: cy });
        }
        let mut best: Option<(f32, Seed)> = None;
        for y in y0..y1 {
            for x in x0..x1 {
                let q = field.get(x, y);
                if q.is_valid() && best.map_or(true, |(d, _)| q.density > d) {
                    best = Some((q.density, Seed { x, y }));
                }
            }
        }
        best.map(|(_, seed)| seed)
    }
}

impl SeedSampler for FloydSteinbergSampler {
    fn sample(&self, field: &FeatureField) -> Vec<Seed> {
        let valid = field.valid_count();
        if valid == 0 {
            return Vec::new();
        }
        let density = field.density_image();
        let b = Self::block_size(density.sum() / valid as f32);
        let mut blocks = Self::block_masses(&density, b);
        let (bw, bh) = (blocks.w, blocks.h);

        let mut seeds = Vec::new();
        for by in 0..bh {
            for bx in 0..bw {
                let v = blocks.get(bx, by);
                let seed = if v >= 0.5 {
                    Self::seed_in_block(field, bx, by, b)
                } else {
                    None
                };
                let err = match seed {
                    Some(s) => {
                        seeds.push(s);
                        v - 1.0
                    }
                    None => v,
                };
                if bx + 1 < bw {
                    blocks.add(bx + 1, by, err * 7.0 / 16.0);
                }
                if by + 1 < bh {
                    if bx > 0 {
                        blocks.add(bx - 1, by + 1, err * 3.0 / 16.0);
                    }
                    blocks.add(bx, by + 1, err * 5.0 / 16.0);
                    if bx + 1 < bw {
                        blocks.add(bx + 1, by + 1, err / 16.0);
                    }
                }
            }
        }
        debug!(
            "FloydSteinbergSampler block={} grid={}x{} seeds={}",
            b,
            bw,
            bh,
            seeds.len()
        );
        seeds
    }
}
