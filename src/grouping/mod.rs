//! Geometry-aware grouping of superpixels into regions.
//!
//! Stages
//! - Adjacency: scan the label image and collect, per unordered label pair,
//!   the boundary pixels where the two superpixels touch ([`adjacency`]).
//! - Weights: score every edge by convexity and normal alignment of its two
//!   superpixels ([`weights`]).
//! - Merge: visit edges by ascending weight and union their endpoints in a
//!   size-weighted disjoint-set forest ([`union_find`]).
//! - Relabel: number the surviving roots compactly and rewrite the label
//!   image.
//!
//! Superpixels that touch nothing come out as singleton regions.

pub mod adjacency;
pub mod union_find;
pub mod weights;

pub use adjacency::{
    build_adjacency, edges_from_adjacency, AdjacencyMap, Edge, LabelPair, Neighborhood,
};
pub use union_find::{merge_edges, sort_edges, DisjointSet, Vertex};
pub use weights::{edge_weight, is_convex};

use crate::error::Result;
use crate::image::LabelImage;
use crate::superpixels::Superpixels;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct GroupingOptions {
    /// Neighbours inspected when building the adjacency graph.
    pub neighborhood: Neighborhood,
    /// Weight assigned to concave pairs.
    pub concave_weight: f32,
    /// Edges heavier than this are never merged. `None` merges every edge.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_merge_weight: Option<f32>,
}

impl Default for GroupingOptions {
    fn default() -> Self {
        Self {
            neighborhood: Neighborhood::Diagonal,
            concave_weight: 100.0,
            max_merge_weight: None,
        }
    }
}

/// Counters describing one grouping run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupingStats {
    pub vertices: usize,
    pub edges: usize,
    pub merges: usize,
    /// Labels that appear in the image but in no edge.
    pub isolated_labels: usize,
    pub regions: usize,
}

#[derive(Clone, Debug)]
pub struct Grouping {
    /// Region id per pixel, `-1` where the input had no label.
    pub regions: LabelImage,
    /// Weighted edges in merge order.
    pub edges: Vec<Edge>,
    pub stats: GroupingStats,
}

/// Merge adjacent superpixels into regions.
///
/// Fails only when a label does not address an aggregate.
pub fn group_superpixels(superpixels: &Superpixels, opts: &GroupingOptions) -> Result<Grouping> {
    superpixels.validate()?;
    let labels = superpixels.labels.distinct_labels();
    let mut set = DisjointSet::from_sorted_labels(&labels);

    let adjacency = build_adjacency(&superpixels.labels, opts.neighborhood);
    let mut edges = edges_from_adjacency(&adjacency);
    drop(adjacency);
    for edge in &mut edges {
        let sp1 = &superpixels.aggregates[edge.pair.a as usize];
        let sp2 = &superpixels.aggregates[edge.pair.b as usize];
        edge.weight = edge_weight(sp1, sp2, opts.concave_weight);
    }
    sort_edges(&mut edges);

    let connected: BTreeSet<i32> = edges.iter().flat_map(|e| [e.pair.a, e.pair.b]).collect();
    let isolated = labels.len() - connected.len();
    if isolated > 0 && labels.len() > 1 {
        warn!(
            "group_superpixels: {} of {} labels have no adjacency edge; kept as singleton regions",
            isolated,
            labels.len()
        );
    }

    let merges = if set.len() > 1 {
        merge_edges(&mut set, &edges, opts.max_merge_weight)
    } else {
        0
    };
    let components_floor = isolated + usize::from(isolated < labels.len());
    let bound = labels.len() - components_floor.min(labels.len());
    debug_assert!(merges <= bound, "merges={merges} bound={bound}");
    if merges > bound {
        warn!("group_superpixels: {} merges exceed bound {}", merges, bound);
    }

    let compact = set.compact_ids();
    let mut regions = superpixels.labels.clone();
    regions.map_labels(|label| match set.index_of(label) {
        Some(idx) => compact[idx],
        None => label,
    });

    let stats = GroupingStats {
        vertices: set.len(),
        edges: edges.len(),
        merges,
        isolated_labels: isolated,
        regions: set.root_count(),
    };
    debug!("group_superpixels {:?}", stats);
    Ok(Grouping {
        regions,
        edges,
        stats,
    })
}
