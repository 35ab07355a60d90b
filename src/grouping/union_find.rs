//! Weighted union-find over superpixel labels.
//!
//! Vertices live in an index-addressed arena sorted by label; parent links are
//! arena indices. Unions attach the smaller tree under the larger one. Roots
//! are found by walking parent links without compression, so the forest can
//! be inspected after the merge pass exactly as it was built.
use super::adjacency::Edge;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Vertex {
    /// Superpixel label this vertex stands for.
    pub id: i32,
    /// Position in the arena.
    pub idx: usize,
    /// Arena index of the parent; equal to `idx` for roots.
    pub parent: usize,
    /// Number of vertices in the tree rooted here (meaningful for roots).
    pub size: usize,
}

#[derive(Clone, Debug)]
pub struct DisjointSet {
    vertices: Vec<Vertex>,
}

impl DisjointSet {
    /// One singleton per label. `labels` must be sorted and free of duplicates.
    pub fn from_sorted_labels(labels: &[i32]) -> Self {
        debug_assert!(labels.windows(2).all(|w| w[0] < w[1]));
        let vertices = labels
            .iter()
            .enumerate()
            .map(|(idx, &id)| Vertex {
                id,
                idx,
                parent: idx,
                size: 1,
            })
            .collect();
        Self { vertices }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Arena index of `label`, if it has a vertex.
    pub fn index_of(&self, label: i32) -> Option<usize> {
        self.vertices.binary_search_by_key(&label, |v| v.id).ok()
    }

    pub fn find(&self, idx: usize) -> usize {
        let mut root = self.vertices[idx].parent;
        while root != self.vertices[root].parent {
            root = self.vertices[root].parent;
        }
        root
    }

    /// Union by size. Returns `false` when both already share a root.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let mut small = self.find(a);
        let mut large = self.find(b);
        if small == large {
            return false;
        }
        if self.vertices[small].size > self.vertices[large].size {
            std::mem::swap(&mut small, &mut large);
        }
        self.vertices[small].parent = large;
        self.vertices[large].size += self.vertices[small].size;
        true
    }

    /// Compact region id per vertex. Roots are numbered in arena order.
    pub fn compact_ids(&self) -> Vec<i32> {
        let mut root_id = vec![-1i32; self.vertices.len()];
        let mut next = 0i32;
        for v in self.vertices.iter().filter(|v| v.parent == v.idx) {
            root_id[v.idx] = next;
            next += 1;
        }
        self.vertices
            .iter()
            .map(|v| root_id[self.find(v.idx)])
            .collect()
    }

    /// Number of disjoint sets.
    pub fn root_count(&self) -> usize {
        self.vertices.iter().filter(|v| v.parent == v.idx).count()
    }
}

/// Stable ascending sort by weight.
pub fn sort_edges(edges: &mut [Edge]) {
    edges.sort_by(|a, b| a.weight.total_cmp(&b.weight));
}

/// Apply unions for `edges` in order, skipping edges heavier than
/// `max_weight`. Edges whose labels have no vertex are ignored. Returns the
/// number of successful merges.
pub fn merge_edges(set: &mut DisjointSet, edges: &[Edge], max_weight: Option<f32>) -> usize {
    let mut merges = 0;
    for edge in edges {
        if max_weight.is_some_and(|limit| edge.weight > limit) {
            continue;
        }
        let (Some(a), Some(b)) = (set.index_of(edge.pair.a), set.index_of(edge.pair.b)) else {
            continue;
        };
        if set.union(a, b) {
            merges += 1;
        }
    }
    merges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::adjacency::LabelPair;

    fn edge(a: i32, b: i32, weight: f32) -> Edge {
        Edge {
            pair: LabelPair::new(a, b),
            count: 2,
            weight,
        }
    }

    #[test]
    fn chain_merges_into_one_region() {
        let mut set = DisjointSet::from_sorted_labels(&[5, 7, 9]);
        let mut edges = vec![edge(7, 9, 0.2), edge(5, 7, 0.1)];
        sort_edges(&mut edges);
        assert_eq!(edges[0].pair, LabelPair::new(5, 7));
        let merges = merge_edges(&mut set, &edges, None);
        assert_eq!(merges, 2);
        assert_eq!(set.root_count(), 1);
        assert_eq!(set.compact_ids(), vec![0, 0, 0]);
    }

    #[test]
    fn labels_without_edges_stay_singletons() {
        let set = DisjointSet::from_sorted_labels(&[0, 3, 4, 10, 11]);
        assert_eq!(set.compact_ids(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn smaller_tree_goes_under_larger() {
        let mut set = DisjointSet::from_sorted_labels(&[0, 1, 2]);
        assert!(set.union(1, 2));
        // {1,2} rooted at 2 (tie: first under second), then 0 joins below it
        assert!(set.union(0, 1));
        assert_eq!(set.find(0), 2);
        assert_eq!(set.vertices()[2].size, 3);
        assert!(!set.union(0, 2));
    }

    #[test]
    fn partition_does_not_depend_on_edge_order() {
        let labels = [1, 2, 3, 4, 5, 6];
        let edges = vec![
            edge(1, 2, 0.3),
            edge(2, 3, 0.3),
            edge(4, 5, 0.1),
            edge(5, 6, 0.2),
        ];
        let mut reversed: Vec<Edge> = edges.iter().rev().copied().collect();

        let mut forward = edges.clone();
        sort_edges(&mut forward);
        sort_edges(&mut reversed);

        let mut s1 = DisjointSet::from_sorted_labels(&labels);
        let mut s2 = DisjointSet::from_sorted_labels(&labels);
        merge_edges(&mut s1, &forward, None);
        merge_edges(&mut s2, &reversed, None);
        let (ids1, ids2) = (s1.compact_ids(), s2.compact_ids());
        for i in 0..labels.len() {
            for j in 0..labels.len() {
                assert_eq!(ids1[i] == ids1[j], ids2[i] == ids2[j]);
            }
        }
        assert_eq!(ids1, vec![0, 0, 0, 1, 1, 1]);
    }

    #[test]
    fn roots_are_numbered_in_arena_order() {
        let mut set = DisjointSet::from_sorted_labels(&[0, 1, 2]);
        assert_eq!(merge_edges(&mut set, &[edge(0, 2, 0.0)], None), 1);
        // label 0 hangs under root 2, so the isolated root 1 comes first
        assert_eq!(set.find(0), 2);
        assert_eq!(set.compact_ids(), vec![1, 0, 1]);
    }

    #[test]
    fn heavy_edges_are_skipped_under_a_limit() {
        let mut set = DisjointSet::from_sorted_labels(&[0, 1, 2]);
        let edges = vec![edge(0, 1, 0.05), edge(1, 2, 100.0)];
        assert_eq!(merge_edges(&mut set, &edges, Some(1.0)), 1);
        assert_eq!(set.compact_ids(), vec![0, 0, 1]);
    }
}
