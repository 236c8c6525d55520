//! End-to-end tests for the correlation clustering pipeline on the default
//! `microlp` backend.
#![cfg(feature = "microlp")]

mod common;

use std::time::Duration;

use ccedit_core::{
    ClusterId, CorrelationClusteringBuilder, MicroLpSolver, RelaxationMode, SignedGraph,
    Threshold, VertexId, compute_ultrametric, extract_clusters, solve_correlation_clustering,
    solve_relaxation,
};
use ccedit_test_support::{
    ci::property_test_profile::ProptestRunProfile, tracing::RecordingLayer,
};
use common::{imbalanced_triangle, positive_clique, sparse_two_cliques, two_cliques};
use proptest::{prelude::*, test_runner::Config as ProptestConfig};
use rstest::rstest;
use test_strategy::Arbitrary;
use tracing::Level;

fn v(id: u64) -> VertexId {
    VertexId::new(id)
}

#[rstest]
#[case::relaxed(RelaxationMode::Relaxed)]
#[case::integer(RelaxationMode::Integer)]
fn imbalanced_triangle_disagrees_once(#[case] mode: RelaxationMode) {
    let outcome = CorrelationClusteringBuilder::new()
        .with_mode(mode)
        .build()
        .expect("defaults are valid")
        .run(&imbalanced_triangle())
        .expect("pipeline succeeds");

    assert_eq!(outcome.disagreement(), 1.0);
    assert!((outcome.relaxation_objective() - 1.0).abs() < 1e-6);
    assert_eq!(outcome.partition().vertices(), &[v(1), v(2), v(3)]);
}

#[rstest]
#[case(0.0)]
#[case(0.5)]
#[case(1.0)]
fn positive_clique_forms_one_cluster(#[case] threshold: f64) {
    let outcome = CorrelationClusteringBuilder::new()
        .with_threshold(threshold)
        .build()
        .expect("threshold is valid")
        .run(&positive_clique())
        .expect("pipeline succeeds");

    assert_eq!(outcome.partition().cluster_count(), 1);
    assert_eq!(outcome.disagreement(), 0.0);
}

#[rstest]
#[case::relaxed(RelaxationMode::Relaxed)]
#[case::integer(RelaxationMode::Integer)]
fn two_cliques_split_along_the_negative_edge(#[case] mode: RelaxationMode) {
    let outcome = CorrelationClusteringBuilder::new()
        .with_mode(mode)
        .build()
        .expect("defaults are valid")
        .run(&two_cliques())
        .expect("pipeline succeeds");

    assert_eq!(
        outcome.partition().clusters(),
        vec![vec![v(1), v(2)], vec![v(3), v(4)]]
    );
    assert_eq!(outcome.disagreement(), 0.0);
}

#[test]
fn sparse_ids_are_clustered_like_dense_ones() {
    let (partition, disagreement) =
        solve_correlation_clustering(&sparse_two_cliques(), Threshold::HALF)
            .expect("pipeline succeeds");

    assert_eq!(partition.cluster_of(v(7)), Some(ClusterId::new(0)));
    assert_eq!(partition.cluster_of(v(900)), Some(ClusterId::new(0)));
    assert_eq!(partition.cluster_of(v(31)), Some(ClusterId::new(1)));
    assert_eq!(partition.cluster_of(v(4000)), Some(ClusterId::new(1)));
    assert_eq!(disagreement, 0.0);
}

#[test]
fn stages_compose_like_the_runner() {
    let graph = two_cliques();
    let induced = solve_relaxation(&graph, RelaxationMode::Relaxed, &MicroLpSolver::new())
        .expect("relaxation succeeds");
    assert!(induced.is_complete());
    assert!(induced.pairs().all(|(_, _, x)| (0.0..=1.0).contains(&x)));

    let ultrametric = compute_ultrametric(&induced).expect("induced graph is complete");
    let staged = extract_clusters(&ultrametric, Threshold::HALF);
    let (partition, _) =
        solve_correlation_clustering(&graph, Threshold::HALF).expect("pipeline succeeds");
    assert_eq!(staged, partition);
}

#[test]
fn time_limited_runs_finish_within_a_generous_limit() {
    let clustering = CorrelationClusteringBuilder::new()
        .with_solver_time_limit(Duration::from_secs(30))
        .build()
        .expect("configuration is valid");
    assert_eq!(clustering.solver_name(), "microlp");

    let outcome = clustering.run(&two_cliques()).expect("solve is quick");
    assert_eq!(outcome.partition().cluster_count(), 2);
}

#[test]
fn run_emits_stage_spans_and_completion_event() {
    let clustering = CorrelationClusteringBuilder::new()
        .build()
        .expect("defaults are valid");
    let (outcome, layer) = RecordingLayer::capture(|| clustering.run(&imbalanced_triangle()));
    outcome.expect("pipeline succeeds");

    let run = layer.span("core.run").expect("run span recorded");
    assert_eq!(run.field("solver"), Some("microlp"));
    assert_eq!(run.field("threshold"), Some("0.5"));
    assert!(layer.span("core.solve_relaxation").is_some());
    assert!(layer.has_event(Level::INFO, "relaxation solved"));
    assert!(layer.has_event(Level::INFO, "ultrametric computed"));
    assert!(layer.has_event(Level::INFO, "correlation clustering completed"));
    assert!(layer.events_at(Level::ERROR).is_empty());
}

#[derive(Clone, Copy, Debug, Arbitrary)]
enum PairKind {
    #[weight(3)]
    Absent,
    #[weight(2)]
    Attract,
    #[weight(2)]
    Repel,
}

fn signed_graphs(max_vertices: u64) -> impl Strategy<Value = SignedGraph> {
    (2..=max_vertices).prop_flat_map(|n| {
        let pairs: Vec<(u64, u64)> = (1..=n)
            .flat_map(|a| ((a + 1)..=n).map(move |b| (a, b)))
            .collect();
        proptest::collection::vec(any::<PairKind>(), pairs.len()).prop_map(move |kinds| {
            let mut builder = SignedGraph::builder();
            for vertex in 1..=n {
                builder.add_vertex(v(vertex));
            }
            for (&(a, b), kind) in pairs.iter().zip(kinds) {
                let weight = match kind {
                    PairKind::Absent => continue,
                    PairKind::Attract => 1.0,
                    PairKind::Repel => -1.0,
                };
                builder
                    .add_edge(v(a), v(b), weight)
                    .unwrap_or_else(|err| panic!("generated edge is invalid: {err}"));
            }
            builder.build()
        })
    })
}

fn solver_config() -> ProptestConfig {
    let profile = ProptestRunProfile::load(16, false).capped(32);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

proptest! {
    #![proptest_config(solver_config())]

    #[test]
    fn solved_ultrametrics_are_bounded_and_nested(
        graph in signed_graphs(6),
        low in 0.0_f64..=1.0,
        high in 0.0_f64..=1.0,
    ) {
        let clustering = CorrelationClusteringBuilder::new()
            .build()
            .expect("defaults are valid");
        let ultrametric = clustering.ultrametric(&graph).expect("relaxation is feasible");
        prop_assert!(ultrametric.is_ultrametric(1e-9));
        prop_assert!(ultrametric.pairs().all(|(_, _, u)| u >= 0.0));

        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        let fine = extract_clusters(&ultrametric, Threshold::new(low).expect("in range"));
        let coarse = extract_clusters(&ultrametric, Threshold::new(high).expect("in range"));
        prop_assert!(coarse.is_coarsening_of(&fine));
    }
}
