//! Deterministic Kruskal spanning tree over a [`PairMatrix`].

use std::cmp::Ordering;

use crate::{graph::PairMatrix, graph::pair_positions, union_find::DisjointSet};

/// Tree edge in canonical form (`source < target`) over dense positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct TreeEdge {
    source: usize,
    target: usize,
    /// Weight in the induced graph.
    weight: f64,
}

impl TreeEdge {
    #[rustfmt::skip]
    pub(super) fn source(&self) -> usize { self.source }

    #[rustfmt::skip]
    pub(super) fn target(&self) -> usize { self.target }

    #[rustfmt::skip]
    pub(super) fn weight(&self) -> f64 { self.weight }

    /// Weight used inside the tree; negative noise is clamped to `0`.
    pub(super) fn tree_weight(&self) -> f64 {
        self.weight.max(0.0)
    }
}

impl Eq for TreeEdge {}

impl Ord for TreeEdge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .total_cmp(&other.weight)
            .then_with(|| self.source.cmp(&other.source))
            .then_with(|| self.target.cmp(&other.target))
    }
}

impl PartialOrd for TreeEdge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Result of running Kruskal over every present pair.
#[derive(Clone, Debug, PartialEq)]
pub(super) struct SpanningForest {
    edges: Vec<TreeEdge>,
    components: usize,
}

impl SpanningForest {
    pub(super) fn edges(&self) -> &[TreeEdge] {
        &self.edges
    }

    pub(super) fn components(&self) -> usize {
        self.components
    }
}

/// Builds a minimum spanning forest, breaking weight ties by
/// `(source, target)` so equal inputs always give the same tree.
pub(super) fn kruskal(matrix: &PairMatrix) -> SpanningForest {
    let n = matrix.len();
    let mut candidates: Vec<TreeEdge> = pair_positions(n)
        .filter_map(|(source, target)| {
            matrix.get(source, target).map(|weight| TreeEdge {
                source,
                target,
                weight,
            })
        })
        .collect();
    candidates.sort_unstable();

    let mut sets = DisjointSet::new(n);
    let mut edges = Vec::with_capacity(n.saturating_sub(1));
    for edge in candidates {
        if sets.union(edge.source, edge.target) {
            edges.push(edge);
            if edges.len() + 1 == n {
                break;
            }
        }
    }
    SpanningForest {
        edges,
        components: sets.components(),
    }
}

/// Adjacency view of a spanning tree.
#[derive(Clone, Debug)]
pub(super) struct TreeAdjacency {
    neighbours: Vec<Vec<(usize, usize)>>,
}

impl TreeAdjacency {
    pub(super) fn new(n: usize, edges: &[TreeEdge]) -> Self {
        let mut neighbours = vec![Vec::new(); n];
        for (id, edge) in edges.iter().enumerate() {
            if let Some(list) = neighbours.get_mut(edge.source) {
                list.push((edge.target, id));
            }
            if let Some(list) = neighbours.get_mut(edge.target) {
                list.push((edge.source, id));
            }
        }
        Self { neighbours }
    }

    /// Maximum of `value(edge)` along the tree path from `root` to every
    /// vertex. The root itself and unreachable vertices hold `None`.
    pub(super) fn path_maxima(
        &self,
        root: usize,
        mut value: impl FnMut(usize) -> f64,
    ) -> Vec<Option<f64>> {
        let mut maxima = vec![None; self.neighbours.len()];
        let mut visited = vec![false; self.neighbours.len()];
        let Some(seen) = visited.get_mut(root) else {
            return maxima;
        };
        *seen = true;
        let mut stack = vec![(root, f64::NEG_INFINITY)];
        while let Some((vertex, best)) = stack.pop() {
            let Some(neighbours) = self.neighbours.get(vertex) else {
                continue;
            };
            for &(next, edge) in neighbours {
                let Some(seen) = visited.get_mut(next) else {
                    continue;
                };
                if *seen {
                    continue;
                }
                *seen = true;
                let path_max = best.max(value(edge));
                if let Some(slot) = maxima.get_mut(next) {
                    *slot = Some(path_max);
                }
                stack.push((next, path_max));
            }
        }
        maxima
    }
}
