//! Owned single-channel f32 image in row-major layout (stride == width).
//!
//! Holds scalar per-pixel channels such as the density field handed to seed
//! samplers, which diffuse error into it in place.
#[derive(Clone, Debug, Default)]
pub struct ImageF32 {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Number of f32 elements between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<f32>,
}

impl ImageF32 {
    /// Construct a zero-initialized buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![0.0; w * h],
        }
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }
    #[inline]
    /// Get the pixel value at (x, y).
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.idx(x, y)]
    }
    #[inline]
    /// Add `v` to the pixel at (x, y).
    pub fn add(&mut self, x: usize, y: usize, v: f32) {
        let i = self.idx(x, y);
        self.data[i] += v;
    }

    /// Sum of all pixel values.
    pub fn sum(&self) -> f32 {
        use crate::image::traits::ImageView;
        self.rows().map(|row| row.iter().sum::<f32>()).sum()
    }
}

impl crate::image::traits::ImageView for ImageF32 {
    type Pixel = f32;

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
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[f32] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[f32]> {
        (self.stride == self.w).then_some(&self.data[..self.w * self.h])
    }
}
