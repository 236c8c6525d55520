//! Correlation clustering by LP relaxation and closest-ultrametric rounding.
//!
//! A [`SignedGraph`] is relaxed into an [`InducedDistanceGraph`] by an
//! [`LpSolver`], rounded to the closest [`UltrametricGraph`], and cut at a
//! [`Threshold`] into a [`Partition`] whose disagreement with the input is
//! reported alongside it.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod clusters;
mod error;
mod graph;
mod pipeline;
mod relaxation;
mod ultrametric;
mod union_find;

#[cfg(test)]
mod test_utils;

#[cfg(feature = "microlp")]
pub use crate::{pipeline::solve_correlation_clustering, relaxation::MicroLpSolver};
pub use crate::{
    builder::CorrelationClusteringBuilder,
    clusters::{
        ClusterId, Partition, THRESHOLD_TOLERANCE, Threshold, clustering_disagreement,
        extract_clusters,
    },
    error::{CcError, CcErrorCode, GraphError, GraphErrorCode, Result, SolverError, SolverErrorCode},
    graph::{
        InducedDistanceGraph, SignedEdge, SignedGraph, SignedGraphBuilder, UltrametricGraph,
        VertexId, VertexIndex,
    },
    pipeline::{ClusteringOutcome, CorrelationClustering},
    relaxation::{
        LpSolution, LpSolver, RelaxationMode, RelaxationProgram, TimeLimitedSolver,
        TriangleConstraint, TriangleConstraints, VariableDomain, relaxation_objective,
        solve_relaxation,
    },
    ultrametric::compute_ultrametric,
};
