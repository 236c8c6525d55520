//! Disagreement as a function of the rounding threshold.
//!
//! One ultrametric is rounded at several thresholds, recording the cluster
//! count and disagreement at each.

use ccedit_core::{
    CcError, SignedGraph, Threshold, UltrametricGraph, clustering_disagreement, extract_clusters,
};

/// Outcome of rounding at one threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThresholdPoint {
    /// Threshold used for rounding.
    pub threshold: Threshold,
    /// Number of clusters extracted.
    pub clusters: usize,
    /// Weighted disagreement with the signed graph.
    pub disagreement: f64,
}

/// `steps + 1` evenly spaced thresholds from `0` to `1` inclusive.
///
/// # Examples
/// ```
/// use ccedit_benches::sweep::unit_thresholds;
///
/// let values: Vec<f64> = unit_thresholds(4).iter().map(|t| t.get()).collect();
/// assert_eq!(values, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "thresholds are evenly spaced fractions of the unit interval"
)]
#[expect(
    clippy::cast_precision_loss,
    reason = "step counts stay far below the f64 mantissa range"
)]
pub fn unit_thresholds(steps: usize) -> Vec<Threshold> {
    if steps == 0 {
        return vec![Threshold::HALF];
    }
    (0..=steps)
        .filter_map(|step| Threshold::new(step as f64 / steps as f64).ok())
        .collect()
}

/// Rounds `ultrametric` at every threshold and scores it against `graph`.
///
/// # Errors
/// Returns [`CcError::MalformedInput`] when `graph` names a vertex the
/// ultrametric does not cover.
pub fn disagreement_profile(
    ultrametric: &UltrametricGraph,
    graph: &SignedGraph,
    thresholds: &[Threshold],
) -> Result<Vec<ThresholdPoint>, CcError> {
    thresholds
        .iter()
        .map(|&threshold| {
            Ok(ThresholdPoint {
                threshold,
                clusters: extract_clusters(ultrametric, threshold).cluster_count(),
                disagreement: clustering_disagreement(ultrametric, graph, threshold)?,
            })
        })
        .collect()
}
