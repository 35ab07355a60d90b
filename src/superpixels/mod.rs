//! Superpixel stage: seed placement and pixel clustering behind strategy
//! traits.
//!
//! The pipeline only depends on two capabilities:
//!
//! - [`SeedSampler`]: place initial superpixel centres from the density
//!   channel of a [`FeatureField`];
//! - [`ClusteringEngine`]: grow superpixels from those seeds under a
//!   [`PixelDistance`], returning a dense label image plus one
//!   [`SuperpixelAggregate`] per label.
//!
//! [`FloydSteinbergSampler`] and [`LocalKMeans`] are the default strategies;
//! alternative algorithms plug in without touching feature extraction or
//! grouping.

mod accumulator;
mod kmeans;
mod sampler;

pub use kmeans::{ClusteringOptions, LocalKMeans};
pub use sampler::FloydSteinbergSampler;

use crate::distance::PixelDistance;
use crate::error::{Result, SegmentationError};
use crate::features::{FeatureField, PixelSample};
use crate::image::{LabelImage, INVALID_LABEL};
use nalgebra::{Vector2, Vector3};
use serde::Serialize;

/// Initial superpixel centre in pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Seed {
    pub x: usize,
    pub y: usize,
}

/// Representative features of one superpixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SuperpixelAggregate {
    /// Mean pixel coordinates of the members.
    pub position: Vector2<f32>,
    pub world: Vector3<f32>,
    /// Unit normal.
    pub normal: Vector3<f32>,
    pub color: Vector3<f32>,
    /// Number of member pixels.
    pub count: usize,
}

impl SuperpixelAggregate {
    /// Single-pixel superpixel, used to start a cluster at a seed.
    pub fn from_pixel(q: &PixelSample) -> Self {
        Self {
            position: q.position,
            world: q.world,
            normal: q.normal,
            color: q.color,
            count: 1,
        }
    }
}

/// Clustering output: label image (`-1` or an index into `aggregates`).
#[derive(Clone, Debug)]
pub struct Superpixels {
    pub labels: LabelImage,
    pub aggregates: Vec<SuperpixelAggregate>,
}

impl Superpixels {
    pub fn len(&self) -> usize {
        self.aggregates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aggregates.is_empty()
    }

    /// Check that every label addresses an aggregate.
    pub fn validate(&self) -> Result<()> {
        let available = self.aggregates.len();
        match self
            .labels
            .data
            .iter()
            .find(|&&l| l != INVALID_LABEL && (l < 0 || l as usize >= available))
        {
            Some(&label) => Err(SegmentationError::LabelOutOfRange { label, available }),
            None => Ok(()),
        }
    }
}

/// Places initial superpixel centres from the density field.
pub trait SeedSampler {
    /// Deterministic for a fixed field; the count should approximate the
    /// total density.
    fn sample(&self, field: &FeatureField) -> Vec<Seed>;
}

/// Assigns every valid pixel to a superpixel.
pub trait ClusteringEngine {
    fn cluster<D: PixelDistance>(
        &self,
        field: &FeatureField,
        seeds: &[Seed],
        metric: &D,
    ) -> Superpixels;
}
