//! End-to-end correlation clustering pipeline.
//!
//! Provides the [`CorrelationClustering`] runner that chains the relaxation,
//! ultrametric rounding, and threshold extraction stages, plus the
//! [`solve_correlation_clustering`] convenience entry point.

use std::{fmt, sync::Arc};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{info, instrument};

#[cfg(feature = "microlp")]
use crate::builder::CorrelationClusteringBuilder;
use crate::{
    Result,
    clusters::{Partition, Threshold, clustering_disagreement, extract_clusters},
    graph::{SignedGraph, UltrametricGraph},
    relaxation::{LpSolver, RelaxationMode, relaxation_objective, solve_relaxation},
    ultrametric::compute_ultrametric,
};

/// Result of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusteringOutcome {
    partition: Partition,
    disagreement: f64,
    relaxation_objective: f64,
    clamped_edges: usize,
}

impl ClusteringOutcome {
    /// Hard clustering produced by thresholding the ultrametric.
    #[must_use]
    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// Weighted disagreement of [`ClusteringOutcome::partition`] against the
    /// input graph.
    #[must_use]
    pub fn disagreement(&self) -> f64 {
        self.disagreement
    }

    /// Objective value of the solved relaxation.
    ///
    /// In relaxed mode this is a lower bound on the disagreement of every
    /// clustering of the input graph.
    #[must_use]
    pub fn relaxation_objective(&self) -> f64 {
        self.relaxation_objective
    }

    /// Number of spanning tree weights clamped to zero during rounding.
    #[must_use]
    pub fn clamped_edges(&self) -> usize {
        self.clamped_edges
    }

    /// Splits the outcome into its partition and disagreement score.
    #[must_use]
    pub fn into_parts(self) -> (Partition, f64) {
        (self.partition, self.disagreement)
    }
}

/// Configured correlation clustering runner.
///
/// Built through [`crate::CorrelationClusteringBuilder`]. The runner owns no
/// per-run state, so one instance may serve many graphs.
///
/// # Examples
/// ```
/// use ccedit_core::{CorrelationClusteringBuilder, SignedGraph};
///
/// let graph = SignedGraph::from_edges([(1, 2, 1.0), (3, 4, 1.0), (2, 3, -1.0)])?;
/// let clustering = CorrelationClusteringBuilder::new().build()?;
/// let outcome = clustering.run(&graph)?;
/// assert_eq!(outcome.partition().cluster_count(), 2);
/// assert_eq!(outcome.disagreement(), 0.0);
/// # Ok::<(), ccedit_core::CcError>(())
/// ```
#[derive(Clone)]
pub struct CorrelationClustering {
    threshold: Threshold,
    mode: RelaxationMode,
    solver: Arc<dyn LpSolver + Send + Sync>,
}

impl fmt::Debug for CorrelationClustering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CorrelationClustering")
            .field("threshold", &self.threshold)
            .field("mode", &self.mode)
            .field("solver", &self.solver.name())
            .finish()
    }
}

impl CorrelationClustering {
    pub(crate) fn new(
        threshold: Threshold,
        mode: RelaxationMode,
        solver: Arc<dyn LpSolver + Send + Sync>,
    ) -> Self {
        Self {
            threshold,
            mode,
            solver,
        }
    }

    /// Threshold used to cut the ultrametric into clusters.
    #[rustfmt::skip]
    #[must_use]
    pub fn threshold(&self) -> Threshold { self.threshold }

    /// Variable domain of the linear program.
    #[rustfmt::skip]
    #[must_use]
    pub fn mode(&self) -> RelaxationMode { self.mode }

    /// Name of the backing solver, including any time-limit decoration.
    #[must_use]
    pub fn solver_name(&self) -> &str {
        self.solver.name()
    }

    /// Runs the relaxation and rounds it into an ultrametric without
    /// extracting clusters.
    ///
    /// # Errors
    /// Returns [`crate::CcError::SolverFailed`] when the solver fails.
    pub fn ultrametric(&self, graph: &SignedGraph) -> Result<UltrametricGraph> {
        let induced = solve_relaxation(graph, self.mode, &*self.solver)?;
        compute_ultrametric(&induced)
    }

    /// Clusters `graph` and scores the result.
    ///
    /// # Errors
    /// Returns [`crate::CcError::SolverFailed`] when the solver fails or times
    /// out, and [`crate::CcError::DisconnectedInput`] if the relaxation yields
    /// an incomplete induced graph.
    #[instrument(
        name = "core.run",
        err,
        skip(self, graph),
        fields(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            threshold = self.threshold.get(),
            mode = %self.mode,
            solver = %self.solver.name(),
        ),
    )]
    pub fn run(&self, graph: &SignedGraph) -> Result<ClusteringOutcome> {
        let induced = solve_relaxation(graph, self.mode, &*self.solver)?;
        let relaxation_objective = relaxation_objective(graph, &induced)?;
        let ultrametric = compute_ultrametric(&induced)?;
        let partition = extract_clusters(&ultrametric, self.threshold);
        let disagreement = clustering_disagreement(&ultrametric, graph, self.threshold)?;
        info!(
            clusters = partition.cluster_count(),
            disagreement,
            relaxation_objective,
            "correlation clustering completed"
        );
        Ok(ClusteringOutcome {
            partition,
            disagreement,
            relaxation_objective,
            clamped_edges: ultrametric.clamped_edges(),
        })
    }

    /// Runs every graph independently on the rayon pool.
    ///
    /// Results keep the order of `graphs`; one failure does not stop the
    /// remaining runs.
    #[cfg(feature = "parallel")]
    #[cfg_attr(docsrs, doc(cfg(feature = "parallel")))]
    pub fn run_batch(&self, graphs: &[SignedGraph]) -> Vec<Result<ClusteringOutcome>> {
        graphs.par_iter().map(|graph| self.run(graph)).collect()
    }
}

/// Clusters `graph` at `threshold` with the default relaxed pipeline.
///
/// # Errors
/// Propagates the failures of [`CorrelationClustering::run`].
///
/// # Examples
/// ```
/// use ccedit_core::{SignedGraph, Threshold, solve_correlation_clustering};
///
/// let graph = SignedGraph::from_edges([(1, 2, 1.0), (2, 3, 1.0), (1, 3, -1.0)])?;
/// let (partition, disagreement) = solve_correlation_clustering(&graph, Threshold::HALF)?;
/// assert_eq!(partition.vertices().len(), 3);
/// assert_eq!(disagreement, 1.0);
/// # Ok::<(), ccedit_core::CcError>(())
/// ```
#[cfg(feature = "microlp")]
#[cfg_attr(docsrs, doc(cfg(feature = "microlp")))]
pub fn solve_correlation_clustering(
    graph: &SignedGraph,
    threshold: Threshold,
) -> Result<(Partition, f64)> {
    CorrelationClusteringBuilder::new()
        .with_threshold(threshold.get())
        .build()?
        .run(graph)
        .map(ClusteringOutcome::into_parts)
}
