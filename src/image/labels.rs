//! Owned integer label grid shared by the clustering and grouping stages.
//!
//! Every pixel holds either [`INVALID_LABEL`] or a non-negative label. For
//! clustering output the labels are dense indices into the superpixel list;
//! after grouping they are compact region ids.
use super::traits::{ImageView, ImageViewMut};
use std::collections::BTreeSet;

/// Marks pixels that carry no label (invalid depth or unassigned).
pub const INVALID_LABEL: i32 = -1;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelImage {
    pub w: usize,
    pub h: usize,
    pub data: Vec<i32>,
}

impl LabelImage {
    /// Allocate a `w × h` grid with every pixel unassigned.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![INVALID_LABEL; w * h],
        }
    }

    /// Wrap a row-major buffer. Returns `None` on a size mismatch.
    pub fn from_vec(w: usize, h: usize, data: Vec<i32>) -> Option<Self> {
        (data.len() == w * h).then_some(Self { w, h, data })
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> i32 {
        self.data[self.idx(x, y)]
    }

    /// Sorted list of the distinct non-negative labels present in the grid.
    pub fn distinct_labels(&self) -> Vec<i32> {
        self.data
            .iter()
            .copied()
            .filter(|&l| l != INVALID_LABEL)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Number of pixels carrying a label.
    pub fn labelled_count(&self) -> usize {
        self.data.iter().filter(|&&l| l != INVALID_LABEL).count()
    }

    /// Rewrite every valid label through `f`; invalid pixels are untouched.
    pub fn map_labels<F>(&mut self, mut f: F)
    where
        F: FnMut(i32) -> i32,
    {
        for row in self.rows_mut() {
            for label in row.iter_mut().filter(|l| **l != INVALID_LABEL) {
                *label = f(*label);
            }
        }
    }
}

impl ImageView for LabelImage {
    type Pixel = i32;

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
    fn row(&self, y: usize) -> &[i32] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[i32]> {
        Some(&self.data[..])
    }
}

impl ImageViewMut for LabelImage {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [i32] {
        let start = y * self.w;
        &mut self.data[start..start + self.w]
    }

    #[inline]
    fn as_mut_slice(&mut self) -> Option<&mut [i32]> {
        Some(&mut self.data[..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_labels_are_sorted_and_skip_invalid() {
        let img = LabelImage::from_vec(3, 2, vec![4, -1, 2, 2, 4, -1]).unwrap();
        assert_eq!(img.distinct_labels(), vec![2, 4]);
        assert_eq!(img.labelled_count(), 4);
    }

    #[test]
    fn map_labels_keeps_invalid_pixels() {
        let mut img = LabelImage::from_vec(2, 2, vec![0, -1, 1, 1]).unwrap();
        img.map_labels(|l| l + 10);
        assert_eq!(img.data, vec![10, -1, 11, 11]);
    }
}
