use ccedit_core::SignedGraph;

/// Edges `(1,2,+1) (2,3,+1) (1,3,-1)`: every clustering disagrees somewhere.
#[must_use]
pub fn imbalanced_triangle() -> SignedGraph {
    SignedGraph::from_edges([(1, 2, 1.0), (2, 3, 1.0), (1, 3, -1.0)])
        .expect("triangle edges are valid")
}

/// Every pair of four vertices joined with weight `+1`.
#[must_use]
pub fn positive_clique() -> SignedGraph {
    SignedGraph::from_edges([
        (1, 2, 1.0),
        (1, 3, 1.0),
        (1, 4, 1.0),
        (2, 3, 1.0),
        (2, 4, 1.0),
        (3, 4, 1.0),
    ])
    .expect("clique edges are valid")
}

/// Positive pairs `{1,2}` and `{3,4}` joined by the negative edge `(2,3)`.
#[must_use]
pub fn two_cliques() -> SignedGraph {
    SignedGraph::from_edges([(1, 2, 1.0), (3, 4, 1.0), (2, 3, -1.0)])
        .expect("two-clique edges are valid")
}

/// Same shape as [`two_cliques`] with ids far apart and out of order.
#[must_use]
pub fn sparse_two_cliques() -> SignedGraph {
    SignedGraph::from_edges([(900, 7, 1.0), (31, 4000, 1.0), (7, 31, -1.0)])
        .expect("sparse edges are valid")
}
