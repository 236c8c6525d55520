//! Closest-ultrametric rounding of an induced distance graph.
//!
//! Follows Krivanek's construction: a minimum spanning tree of the induced
//! graph, a valuation `w'` of its edges raised to the largest path maximum
//! seen between non-adjacent vertices, and finally
//! `u*(x, y) = 0.5 * max(w(e) + w'(e))` over the tree path from `x` to `y`.
//! Because every `u*` is a bottleneck value on a single tree, the result
//! satisfies the strong triangle inequality.

mod mst;

use tracing::{info, instrument, warn};

use crate::{
    Result,
    error::CcError,
    graph::{InducedDistanceGraph, PairMatrix, UltrametricGraph, pair_count, pair_offset},
};

use self::mst::{TreeAdjacency, TreeEdge, kruskal};

/// Computes the closest ultrametric to `induced`.
///
/// The output covers every pair of vertices of `induced`, whether or not the
/// pair carried a weight there. Spanning-tree edges with a negative weight
/// are clamped to `0` inside the tree and counted in
/// [`UltrametricGraph::clamped_edges`].
///
/// # Errors
/// Returns [`CcError::DisconnectedInput`] when the present pairs of
/// `induced` do not connect all of its vertices.
///
/// # Examples
/// ```
/// use ccedit_core::{InducedDistanceGraph, VertexId, compute_ultrametric};
///
/// let v = VertexId::new;
/// let induced = InducedDistanceGraph::from_weights(
///     [v(1), v(2), v(3)],
///     [(v(1), v(2), 0.0), (v(2), v(3), 0.0), (v(1), v(3), 1.0)],
/// )?;
/// let ultrametric = compute_ultrametric(&induced)?;
/// assert!(ultrametric.is_ultrametric(1e-9));
/// assert_eq!(ultrametric.pairs().count(), 3);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "core.ultrametric",
    err,
    skip(induced),
    fields(vertices = induced.vertex_count()),
)]
pub fn compute_ultrametric(induced: &InducedDistanceGraph) -> Result<UltrametricGraph> {
    let source = induced.matrix();
    let n = source.len();
    let mut matrix = PairMatrix::empty(source.index().clone());
    if n < 2 {
        return Ok(UltrametricGraph::new(matrix, 0));
    }

    let forest = kruskal(source);
    if forest.components() > 1 {
        warn!(
            components = forest.components(),
            vertices = n,
            "induced graph is disconnected"
        );
        return Err(CcError::DisconnectedInput {
            components: forest.components(),
            vertices: n,
        });
    }
    let tree = forest.edges();
    let clamped_edges = count_clamped(tree);
    let adjacency = TreeAdjacency::new(n, tree);

    let global_max = non_tree_path_maximum(n, tree, &adjacency);
    let valuation: Vec<f64> = tree
        .iter()
        .map(|edge| edge.tree_weight().max(global_max))
        .collect();

    for x in 0..n {
        let maxima = adjacency.path_maxima(x, |id| {
            let weight = tree.get(id).map_or(0.0, TreeEdge::weight);
            let raised = valuation.get(id).copied().unwrap_or(global_max);
            weight + raised
        });
        for (y, path_max) in maxima.into_iter().enumerate().skip(x + 1) {
            if let Some(path_max) = path_max {
                matrix.set(x, y, 0.5 * path_max.max(0.0));
            }
        }
    }

    info!(global_max, clamped_edges, "ultrametric computed");
    Ok(UltrametricGraph::new(matrix, clamped_edges))
}

fn count_clamped(tree: &[TreeEdge]) -> usize {
    let mut clamped = 0;
    for edge in tree.iter().filter(|edge| edge.weight() < 0.0) {
        warn!(
            source = edge.source(),
            target = edge.target(),
            weight = edge.weight(),
            "negative spanning tree weight clamped to zero"
        );
        clamped += 1;
    }
    clamped
}

/// Largest tree-path maximum over pairs that are not themselves tree edges;
/// `0` when every pair is a tree edge.
fn non_tree_path_maximum(n: usize, tree: &[TreeEdge], adjacency: &TreeAdjacency) -> f64 {
    let mut is_tree_pair = vec![false; pair_count(n)];
    for edge in tree {
        if let Some(flag) = is_tree_pair.get_mut(pair_offset(n, edge.source(), edge.target())) {
            *flag = true;
        }
    }

    let mut global_max: f64 = 0.0;
    for x in 0..n {
        let maxima = adjacency.path_maxima(x, |id| tree.get(id).map_or(0.0, TreeEdge::tree_weight));
        for (y, path_max) in maxima.into_iter().enumerate().skip(x + 1) {
            let tree_pair = is_tree_pair
                .get(pair_offset(n, x, y))
                .copied()
                .unwrap_or(false);
            if let (false, Some(path_max)) = (tree_pair, path_max) {
                global_max = global_max.max(path_max);
            }
        }
    }
    global_max
}
