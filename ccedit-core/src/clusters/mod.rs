//! Threshold rounding of an ultrametric into clusters, and disagreement
//! scoring of the result against the original signed graph.

mod partition;

use tracing::{info, instrument};

use crate::{
    Result,
    error::{CcError, GraphError},
    graph::{SignedGraph, UltrametricGraph, missing_pair, pair_positions},
    union_find::DisjointSet,
};

pub use self::partition::{ClusterId, Partition};

/// Absolute slack allowed when comparing a distance against a threshold.
pub const THRESHOLD_TOLERANCE: f64 = 1e-9;

/// Rounding threshold in `[0, 1]`.
///
/// # Examples
/// ```
/// use ccedit_core::{CcError, Threshold};
///
/// let threshold = Threshold::new(0.5)?;
/// assert!(threshold.joins(0.5));
/// assert!(!threshold.joins(0.75));
/// assert!(matches!(Threshold::new(1.5), Err(CcError::InvalidThreshold { .. })));
/// # Ok::<(), CcError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Threshold(f64);

impl Threshold {
    /// The customary midpoint threshold.
    pub const HALF: Self = Self(0.5);

    /// Validates `value`.
    ///
    /// # Errors
    /// Returns [`CcError::InvalidThreshold`] when `value` is NaN, infinite, or
    /// outside `[0, 1]`.
    pub fn new(value: f64) -> Result<Self> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(CcError::InvalidThreshold { got: value })
        }
    }

    /// The threshold value.
    #[must_use]
    #[rustfmt::skip]
    pub fn get(self) -> f64 { self.0 }

    /// Whether a pair at `distance` is judged same-cluster.
    #[must_use]
    pub fn joins(self, distance: f64) -> bool {
        distance <= self.0 + THRESHOLD_TOLERANCE
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::HALF
    }
}

impl TryFrom<f64> for Threshold {
    type Error = CcError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

/// Merges every pair whose ultrametric distance passes `threshold`.
///
/// Pairs are visited in ascending `(x, y)` order. A vertex with no joined
/// pair forms a singleton cluster.
///
/// # Examples
/// ```
/// use ccedit_core::{InducedDistanceGraph, Threshold, VertexId, compute_ultrametric,
///     extract_clusters};
///
/// let v = VertexId::new;
/// let induced = InducedDistanceGraph::from_weights(
///     [v(1), v(2), v(3)],
///     [(v(1), v(2), 0.0), (v(1), v(3), 1.0), (v(2), v(3), 1.0)],
/// )?;
/// let ultrametric = compute_ultrametric(&induced)?;
/// let partition = extract_clusters(&ultrametric, Threshold::HALF);
/// assert_eq!(partition.clusters(), vec![vec![v(1), v(2)], vec![v(3)]]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[must_use]
#[instrument(
    name = "core.extract_clusters",
    skip(ultrametric),
    fields(vertices = ultrametric.vertex_count(), threshold = threshold.get()),
)]
pub fn extract_clusters(ultrametric: &UltrametricGraph, threshold: Threshold) -> Partition {
    let matrix = ultrametric.matrix();
    let n = matrix.len();
    let mut sets = DisjointSet::new(n);
    for (x, y) in pair_positions(n) {
        if matrix.get(x, y).is_some_and(|distance| threshold.joins(distance)) {
            sets.union(x, y);
        }
    }
    let labels: Vec<usize> = (0..n).map(|position| sets.find(position)).collect();
    let partition = Partition::from_labels(ultrametric.vertices().to_vec(), &labels);
    info!(clusters = partition.cluster_count(), "clusters extracted");
    partition
}

/// Total weighted disagreement between the rounded ultrametric and `graph`.
///
/// Each pair is judged same-cluster exactly when [`Threshold::joins`] accepts
/// its ultrametric distance, the rule [`extract_clusters`] merges by. A
/// negative edge inside a cluster costs `|w|`; a positive edge across
/// clusters costs `w`. Pairs absent from `graph` cost nothing.
///
/// # Errors
/// Returns [`CcError::MalformedInput`] when `graph` names a vertex the
/// ultrametric does not cover.
///
/// # Examples
/// ```
/// use ccedit_core::{InducedDistanceGraph, SignedGraph, Threshold, VertexId,
///     clustering_disagreement, compute_ultrametric};
///
/// let v = VertexId::new;
/// let graph = SignedGraph::from_edges([(1, 2, 1.0), (2, 3, 1.0), (1, 3, -1.0)])?;
/// let induced = InducedDistanceGraph::from_weights(
///     [v(1), v(2), v(3)],
///     [(v(1), v(2), 0.0), (v(1), v(3), 1.0), (v(2), v(3), 1.0)],
/// )?;
/// let ultrametric = compute_ultrametric(&induced)?;
/// assert_eq!(clustering_disagreement(&ultrametric, &graph, Threshold::HALF)?, 1.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "core.disagreement",
    err,
    skip(ultrametric, graph),
    fields(edges = graph.edge_count(), threshold = threshold.get()),
)]
pub fn clustering_disagreement(
    ultrametric: &UltrametricGraph,
    graph: &SignedGraph,
    threshold: Threshold,
) -> Result<f64> {
    let vertices = ultrametric.vertices();
    if let Some(&vertex) = graph
        .vertices()
        .iter()
        .find(|vertex| vertices.binary_search(vertex).is_err())
    {
        return Err(CcError::from(GraphError::UnknownVertex { vertex }));
    }

    let mut total = 0.0;
    for edge in graph.edges() {
        let distance = ultrametric
            .weight(edge.left(), edge.right())
            .ok_or_else(|| missing_pair(vertices, edge.left(), edge.right()))?;
        let apart = !threshold.joins(distance);
        let weight = edge.weight();
        total += match (weight < 0.0, apart) {
            (true, false) => weight.abs(),
            (false, true) => weight,
            _ => 0.0,
        };
    }
    info!(disagreement = total, "disagreement scored");
    Ok(total)
}

#[cfg(test)]
mod tests;
