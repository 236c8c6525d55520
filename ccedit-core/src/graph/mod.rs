//! Signed weighted graphs and the complete weighted graphs derived from them.
//!
//! Vertices are addressed externally by [`VertexId`] and internally by a dense
//! position in a [`VertexIndex`]. The index keeps ids sorted, so every stage
//! that walks pairs by dense position visits them in ascending
//! `(VertexId, VertexId)` order regardless of how sparse the ids are.

mod pair_matrix;

use std::{collections::BTreeMap, fmt};

use crate::error::GraphError;

pub use self::pair_matrix::{InducedDistanceGraph, UltrametricGraph};
pub(crate) use self::pair_matrix::{PairMatrix, pair_count, pair_offset, pair_positions};

/// External identifier of a vertex.
///
/// # Examples
/// ```
/// use ccedit_core::VertexId;
///
/// let id = VertexId::new(7);
/// assert_eq!(id.get(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(u64);

impl VertexId {
    /// Creates a vertex identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(id: u64) -> Self { Self(id) }

    /// Returns the underlying numeric identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> u64 { self.0 }
}

impl From<u64> for VertexId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sorted mapping from [`VertexId`] to a dense position.
///
/// # Examples
/// ```
/// use ccedit_core::{VertexId, VertexIndex};
///
/// let index = VertexIndex::new([VertexId::new(40), VertexId::new(3), VertexId::new(40)]);
/// assert_eq!(index.len(), 2);
/// assert_eq!(index.position(VertexId::new(40)), Some(1));
/// assert_eq!(index.id(0), Some(VertexId::new(3)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexIndex {
    ids: Vec<VertexId>,
}

impl VertexIndex {
    /// Builds an index from arbitrary ids; duplicates are collapsed.
    #[must_use]
    pub fn new(ids: impl IntoIterator<Item = VertexId>) -> Self {
        let mut ids: Vec<VertexId> = ids.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();
        Self { ids }
    }

    /// Number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` when the index holds no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Dense position of `id`, if present.
    #[must_use]
    pub fn position(&self, id: VertexId) -> Option<usize> {
        self.ids.binary_search(&id).ok()
    }

    /// Vertex stored at dense `position`, if in range.
    #[must_use]
    pub fn id(&self, position: usize) -> Option<VertexId> {
        self.ids.get(position).copied()
    }

    /// All ids in ascending order.
    #[must_use]
    pub fn ids(&self) -> &[VertexId] {
        &self.ids
    }

    pub(crate) fn require(&self, id: VertexId) -> Result<usize, GraphError> {
        self.position(id)
            .ok_or(GraphError::UnknownVertex { vertex: id })
    }
}

/// A weighted edge of a [`SignedGraph`] in canonical form (`left < right`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignedEdge {
    left: VertexId,
    right: VertexId,
    weight: f64,
}

impl SignedEdge {
    /// Smaller endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub fn left(&self) -> VertexId { self.left }

    /// Larger endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub fn right(&self) -> VertexId { self.right }

    /// Signed weight; the sign encodes agreement, the magnitude confidence.
    #[must_use]
    #[rustfmt::skip]
    pub fn weight(&self) -> f64 { self.weight }
}

/// Simple undirected graph with one signed real weight per present edge.
///
/// An absent pair has no weight at all; it is not an edge of weight zero.
///
/// # Examples
/// ```
/// use ccedit_core::{SignedGraph, VertexId};
///
/// let graph = SignedGraph::from_edges([(1, 2, 1.0), (2, 3, -0.5)])?;
/// assert_eq!(graph.vertex_count(), 3);
/// assert_eq!(graph.weight(VertexId::new(3), VertexId::new(2)), Some(-0.5));
/// assert_eq!(graph.weight(VertexId::new(1), VertexId::new(3)), None);
/// # Ok::<(), ccedit_core::GraphError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignedGraph {
    index: VertexIndex,
    edges: Vec<SignedEdge>,
}

impl SignedGraph {
    /// Starts building a graph.
    #[must_use]
    pub fn builder() -> SignedGraphBuilder {
        SignedGraphBuilder::default()
    }

    /// Builds a graph from `(source, target, weight)` triples.
    ///
    /// # Errors
    /// Returns [`GraphError`] for self loops, repeated pairs, or non-finite
    /// weights.
    pub fn from_edges(
        edges: impl IntoIterator<Item = (u64, u64, f64)>,
    ) -> Result<Self, GraphError> {
        let mut builder = Self::builder();
        for (source, target, weight) in edges {
            builder.add_edge(VertexId::new(source), VertexId::new(target), weight)?;
        }
        Ok(builder.build())
    }

    /// Number of vertices, isolated ones included.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.index.len()
    }

    /// Number of present edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` when the graph has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Vertex ids in ascending order.
    #[must_use]
    pub fn vertices(&self) -> &[VertexId] {
        self.index.ids()
    }

    /// The id-to-position mapping shared by every derived graph.
    #[must_use]
    pub fn vertex_index(&self) -> &VertexIndex {
        &self.index
    }

    /// Edges in ascending `(left, right)` order.
    #[must_use]
    pub fn edges(&self) -> &[SignedEdge] {
        &self.edges
    }

    /// Weight of the edge joining `a` and `b`, in either order.
    #[must_use]
    pub fn weight(&self, a: VertexId, b: VertexId) -> Option<f64> {
        let key = canonical(a, b);
        self.edges
            .binary_search_by(|edge| (edge.left, edge.right).cmp(&key))
            .ok()
            .and_then(|position| self.edges.get(position))
            .map(SignedEdge::weight)
    }
}

/// Incremental constructor for [`SignedGraph`].
///
/// # Examples
/// ```
/// use ccedit_core::{GraphError, SignedGraph, VertexId};
///
/// let mut builder = SignedGraph::builder();
/// builder.add_vertex(VertexId::new(9));
/// builder.add_edge(VertexId::new(1), VertexId::new(2), 2.0)?;
/// let err = builder
///     .add_edge(VertexId::new(2), VertexId::new(1), 1.0)
///     .expect_err("pair already present");
/// assert!(matches!(err, GraphError::DuplicateEdge { .. }));
/// let graph = builder.build();
/// assert_eq!(graph.vertex_count(), 3);
/// # Ok::<(), GraphError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct SignedGraphBuilder {
    vertices: Vec<VertexId>,
    edges: BTreeMap<(VertexId, VertexId), f64>,
}

impl SignedGraphBuilder {
    /// Adds a vertex; adding an existing vertex is a no-op.
    pub fn add_vertex(&mut self, vertex: VertexId) -> &mut Self {
        self.vertices.push(vertex);
        self
    }

    /// Adds an undirected edge and both of its endpoints.
    ///
    /// # Errors
    /// Returns [`GraphError::SelfLoop`] when `a == b`,
    /// [`GraphError::NonFiniteWeight`] for NaN or infinite weights, and
    /// [`GraphError::DuplicateEdge`] when the pair already has a weight.
    pub fn add_edge(
        &mut self,
        a: VertexId,
        b: VertexId,
        weight: f64,
    ) -> Result<&mut Self, GraphError> {
        if a == b {
            return Err(GraphError::SelfLoop { vertex: a });
        }
        let (left, right) = canonical(a, b);
        if !weight.is_finite() {
            return Err(GraphError::NonFiniteWeight { left, right });
        }
        if self.edges.contains_key(&(left, right)) {
            return Err(GraphError::DuplicateEdge { left, right });
        }
        self.edges.insert((left, right), weight);
        self.vertices.push(left);
        self.vertices.push(right);
        Ok(self)
    }

    /// Freezes the builder into an immutable graph.
    #[must_use]
    pub fn build(self) -> SignedGraph {
        let edges = self
            .edges
            .into_iter()
            .map(|((left, right), weight)| SignedEdge {
                left,
                right,
                weight,
            })
            .collect();
        SignedGraph {
            index: VertexIndex::new(self.vertices),
            edges,
        }
    }
}

pub(crate) fn canonical(a: VertexId, b: VertexId) -> (VertexId, VertexId) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Error for a pair with no weight in a graph over `vertices`.
pub(crate) fn missing_pair(vertices: &[VertexId], left: VertexId, right: VertexId) -> GraphError {
    [left, right]
        .into_iter()
        .find(|vertex| vertices.binary_search(vertex).is_err())
        .map_or(GraphError::MissingPair { left, right }, |vertex| {
            GraphError::UnknownVertex { vertex }
        })
}
