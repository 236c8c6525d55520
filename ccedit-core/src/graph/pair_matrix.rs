//! Dense upper-triangular storage for complete weighted graphs.
//!
//! Pairs `(i, j)` with `i < j < n` are laid out row by row, so the storage
//! order is the lexicographic pair order. The relaxation builder numbers its
//! decision variables with the same layout.

use crate::error::GraphError;

use super::{VertexId, VertexIndex, canonical};

/// Number of unordered pairs over `n` vertices.
pub(crate) const fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Row-major offset of the pair `(i, j)`; requires `i < j < n`.
pub(crate) const fn pair_offset(n: usize, i: usize, j: usize) -> usize {
    i * (2 * n - i - 1) / 2 + (j - i - 1)
}

/// Every `(i, j)` with `i < j < n`, in storage order.
pub(crate) fn pair_positions(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n).flat_map(move |i| ((i + 1)..n).map(move |j| (i, j)))
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PairMatrix {
    index: VertexIndex,
    values: Vec<Option<f64>>,
}

impl PairMatrix {
    pub(crate) fn empty(index: VertexIndex) -> Self {
        let values = vec![None; pair_count(index.len())];
        Self { index, values }
    }

    pub(crate) fn index(&self) -> &VertexIndex {
        &self.index
    }

    pub(crate) fn len(&self) -> usize {
        self.index.len()
    }

    /// Weight stored for dense positions `i` and `j` in either order.
    pub(crate) fn get(&self, i: usize, j: usize) -> Option<f64> {
        let n = self.len();
        if i == j || i >= n || j >= n {
            return None;
        }
        let (i, j) = if i < j { (i, j) } else { (j, i) };
        self.values.get(pair_offset(n, i, j)).copied().flatten()
    }

    pub(crate) fn set(&mut self, i: usize, j: usize, value: f64) {
        let n = self.len();
        if i == j || i >= n || j >= n {
            return;
        }
        let (i, j) = if i < j { (i, j) } else { (j, i) };
        if let Some(slot) = self.values.get_mut(pair_offset(n, i, j)) {
            *slot = Some(value);
        }
    }

    pub(crate) fn weight(&self, a: VertexId, b: VertexId) -> Option<f64> {
        let i = self.index.position(a)?;
        let j = self.index.position(b)?;
        self.get(i, j)
    }

    pub(crate) fn pairs(&self) -> impl Iterator<Item = (VertexId, VertexId, f64)> + '_ {
        pair_positions(self.len())
            .zip(self.values.iter())
            .filter_map(|((i, j), value)| {
                let weight = (*value)?;
                Some((self.index.id(i)?, self.index.id(j)?, weight))
            })
    }

    pub(crate) fn present_pairs(&self) -> usize {
        self.values.iter().filter(|value| value.is_some()).count()
    }
}

/// Complete weighted graph holding the solved relaxation value of every pair.
///
/// A weight of `0` means the pair was judged same-cluster and `1` means
/// different clusters; solved graphs only hold values in `[0, 1]`.
///
/// # Examples
/// ```
/// use ccedit_core::{InducedDistanceGraph, VertexId};
///
/// let v = VertexId::new;
/// let induced = InducedDistanceGraph::from_weights(
///     [v(1), v(2), v(3)],
///     [(v(1), v(2), 0.0), (v(1), v(3), 1.0), (v(2), v(3), 1.0)],
/// )?;
/// assert!(induced.is_complete());
/// assert_eq!(induced.weight(v(3), v(1)), Some(1.0));
/// # Ok::<(), ccedit_core::GraphError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InducedDistanceGraph {
    matrix: PairMatrix,
}

impl InducedDistanceGraph {
    /// Builds an induced graph from explicit pair weights.
    ///
    /// Pairs left out stay absent; [`crate::compute_ultrametric`] rejects an
    /// induced graph whose present pairs do not connect every vertex.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownVertex`] for pairs naming vertices outside
    /// `vertices`, [`GraphError::SelfLoop`], [`GraphError::DuplicateEdge`], and
    /// [`GraphError::NonFiniteWeight`] for invalid pairs.
    pub fn from_weights(
        vertices: impl IntoIterator<Item = VertexId>,
        weights: impl IntoIterator<Item = (VertexId, VertexId, f64)>,
    ) -> Result<Self, GraphError> {
        let mut matrix = PairMatrix::empty(VertexIndex::new(vertices));
        for (a, b, weight) in weights {
            if a == b {
                return Err(GraphError::SelfLoop { vertex: a });
            }
            let (left, right) = canonical(a, b);
            let i = matrix.index().require(left)?;
            let j = matrix.index().require(right)?;
            if !weight.is_finite() {
                return Err(GraphError::NonFiniteWeight { left, right });
            }
            if matrix.get(i, j).is_some() {
                return Err(GraphError::DuplicateEdge { left, right });
            }
            matrix.set(i, j, weight);
        }
        Ok(Self { matrix })
    }

    pub(crate) fn from_matrix(matrix: PairMatrix) -> Self {
        Self { matrix }
    }

    pub(crate) fn matrix(&self) -> &PairMatrix {
        &self.matrix
    }

    /// Vertex ids in ascending order.
    #[must_use]
    pub fn vertices(&self) -> &[VertexId] {
        self.matrix.index().ids()
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.matrix.len()
    }

    /// Weight of the pair `(a, b)` in either order.
    #[must_use]
    pub fn weight(&self, a: VertexId, b: VertexId) -> Option<f64> {
        self.matrix.weight(a, b)
    }

    /// Present pairs in ascending `(a, b)` order with `a < b`.
    pub fn pairs(&self) -> impl Iterator<Item = (VertexId, VertexId, f64)> + '_ {
        self.matrix.pairs()
    }

    /// Returns `true` when every unordered pair carries a weight.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.matrix.present_pairs() == pair_count(self.matrix.len())
    }
}

/// Complete weighted graph of closest-ultrametric distances `u*(x, y)`.
#[derive(Debug, Clone, PartialEq)]
pub struct UltrametricGraph {
    matrix: PairMatrix,
    clamped_edges: usize,
}

impl UltrametricGraph {
    pub(crate) fn new(matrix: PairMatrix, clamped_edges: usize) -> Self {
        Self {
            matrix,
            clamped_edges,
        }
    }

    pub(crate) fn matrix(&self) -> &PairMatrix {
        &self.matrix
    }

    /// Vertex ids in ascending order.
    #[must_use]
    pub fn vertices(&self) -> &[VertexId] {
        self.matrix.index().ids()
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.matrix.len()
    }

    /// Ultrametric distance between `a` and `b` in either order.
    #[must_use]
    pub fn weight(&self, a: VertexId, b: VertexId) -> Option<f64> {
        self.matrix.weight(a, b)
    }

    /// All pairs in ascending `(a, b)` order with `a < b`.
    pub fn pairs(&self) -> impl Iterator<Item = (VertexId, VertexId, f64)> + '_ {
        self.matrix.pairs()
    }

    /// Number of spanning-tree edges whose negative weight was clamped to `0`.
    #[must_use]
    pub fn clamped_edges(&self) -> usize {
        self.clamped_edges
    }

    /// Checks `u(x, y) <= max(u(x, z), u(z, y)) + tolerance` for every triple.
    ///
    /// This is `O(n^3)` and meant for validation, not for the hot path.
    #[must_use]
    pub fn is_ultrametric(&self, tolerance: f64) -> bool {
        let n = self.matrix.len();
        for (x, y) in pair_positions(n) {
            let Some(direct) = self.matrix.get(x, y) else {
                return false;
            };
            for z in (0..n).filter(|&z| z != x && z != y) {
                let (Some(left), Some(right)) = (self.matrix.get(x, z), self.matrix.get(z, y))
                else {
                    return false;
                };
                if direct > left.max(right) + tolerance {
                    return false;
                }
            }
        }
        true
    }
}
