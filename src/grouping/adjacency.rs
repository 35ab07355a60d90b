//! Superpixel adjacency from a label image.
use crate::image::{LabelImage, INVALID_LABEL};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Unordered pair of distinct labels, stored as `(min, max)` so that both
/// orientations map to the same key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct LabelPair {
    pub a: i32,
    pub b: i32,
}

impl LabelPair {
    #[inline]
    pub fn new(l1: i32, l2: i32) -> Self {
        Self {
            a: l1.min(l2),
            b: l1.max(l2),
        }
    }
}

/// Label pair → linear indices of the boundary pixels that touched it.
pub type AdjacencyMap = BTreeMap<LabelPair, Vec<usize>>;

/// Which neighbours of an anchor pixel are compared against it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Neighborhood {
    /// Only the lower-right diagonal neighbour.
    #[default]
    Diagonal,
    /// Right, lower and lower-right neighbours.
    Forward,
}

impl Neighborhood {
    fn offsets(self) -> &'static [(usize, usize)] {
        match self {
            Neighborhood::Diagonal => &[(1, 1)],
            Neighborhood::Forward => &[(1, 0), (0, 1), (1, 1)],
        }
    }
}

/// Adjacency edge between two superpixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Edge {
    pub pair: LabelPair,
    /// Boundary pixel contributions (two per detected contact).
    pub count: usize,
    /// Merge cost; lower merges first.
    pub weight: f32,
}

/// Scan the label image and record every contact between distinct valid
/// labels. Each contact stores both the anchor and the neighbour index.
pub fn build_adjacency(labels: &LabelImage, neighborhood: Neighborhood) -> AdjacencyMap {
    let mut map = AdjacencyMap::new();
    let (w, h) = (labels.w, labels.h);
    let offsets = neighborhood.offsets();
    for y in 0..h {
        for x in 0..w {
            let k = y * w + x;
            let l0 = labels.data[k];
            if l0 == INVALID_LABEL {
                continue;
            }
            for &(dx, dy) in offsets {
                if x + dx >= w || y + dy >= h {
                    continue;
                }
                let kn = k + dx + dy * w;
                let l1 = labels.data[kn];
                if l1 != l0 && l1 != INVALID_LABEL {
                    let entry = map.entry(LabelPair::new(l0, l1)).or_default();
                    entry.push(k);
                    entry.push(kn);
                }
            }
        }
    }
    map
}

/// One unweighted edge per adjacent pair, in key order.
pub fn edges_from_adjacency(map: &AdjacencyMap) -> Vec<Edge> {
    map.iter()
        .map(|(&pair, pixels)| Edge {
            pair,
            count: pixels.len(),
            weight: 0.0,
        })
        .collect()
}
