//! Unit and property tests for cluster extraction and disagreement scoring.

use proptest::prelude::*;
use rstest::rstest;

use super::{ClusterId, Partition, Threshold, clustering_disagreement, extract_clusters};
use crate::{
    CcError, GraphError, InducedDistanceGraph, SignedGraph, UltrametricGraph, VertexId,
    compute_ultrametric,
    test_utils::{complete_induced_graph, suite_proptest_config},
};

fn v(id: u64) -> VertexId {
    VertexId::new(id)
}

fn ultrametric(n: u64, weights: &[(u64, u64, f64)]) -> UltrametricGraph {
    let induced = InducedDistanceGraph::from_weights(
        (1..=n).map(v),
        weights.iter().map(|&(a, b, w)| (v(a), v(b), w)),
    )
    .expect("induced graph is valid");
    compute_ultrametric(&induced).expect("induced graph is connected")
}

/// Two tight pairs `{1,2}` and `{3,4}` far from each other.
fn two_pairs() -> UltrametricGraph {
    ultrametric(
        4,
        &[
            (1, 2, 0.0),
            (3, 4, 0.0),
            (1, 3, 1.0),
            (1, 4, 1.0),
            (2, 3, 1.0),
            (2, 4, 1.0),
        ],
    )
}

#[rstest]
#[case(0.0)]
#[case(0.5)]
#[case(1.0)]
fn threshold_accepts_unit_interval(#[case] value: f64) {
    let threshold = Threshold::new(value).expect("value is valid");
    assert_eq!(threshold.get(), value);
    assert_eq!(Threshold::try_from(value), Ok(threshold));
}

#[rstest]
#[case(-0.01)]
#[case(1.01)]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
fn threshold_rejects_out_of_range_values(#[case] value: f64) {
    let err = Threshold::new(value).expect_err("value is invalid");
    assert!(matches!(err, CcError::InvalidThreshold { .. }));
    assert_eq!(err.code().as_str(), "CCEDIT_INVALID_THRESHOLD");
}

#[test]
fn threshold_tolerates_round_off_at_the_boundary() {
    assert!(Threshold::HALF.joins(0.5 + 1e-12));
    assert!(!Threshold::HALF.joins(0.5 + 1e-6));
    assert_eq!(Threshold::default(), Threshold::HALF);
}

#[rstest]
#[case(0.0, 4)]
#[case(0.5, 2)]
#[case(1.0, 1)]
fn extraction_depends_on_threshold(#[case] threshold: f64, #[case] expected: usize) {
    // u(1,2) = u(3,4) = 0.5, every other pair 1.0.
    let partition = extract_clusters(
        &two_pairs(),
        Threshold::new(threshold).expect("valid threshold"),
    );
    assert_eq!(partition.cluster_count(), expected);
    assert_eq!(partition.vertices().len(), 4);
}

#[test]
fn cluster_ids_follow_smallest_member() {
    let partition = extract_clusters(&two_pairs(), Threshold::HALF);

    assert_eq!(
        partition.assignments(),
        &[
            ClusterId::new(0),
            ClusterId::new(0),
            ClusterId::new(1),
            ClusterId::new(1)
        ]
    );
    assert_eq!(partition.clusters(), vec![vec![v(1), v(2)], vec![v(3), v(4)]]);
    assert_eq!(partition.same_cluster(v(1), v(2)), Some(true));
    assert_eq!(partition.same_cluster(v(2), v(3)), Some(false));
    assert_eq!(partition.same_cluster(v(2), v(9)), None);
}

#[test]
fn listing_matches_cluster_file_format() {
    let partition = extract_clusters(&two_pairs(), Threshold::HALF);
    let mut out = Vec::new();
    partition.write_listing(&mut out).expect("write to vec");
    assert_eq!(
        String::from_utf8(out).expect("utf-8"),
        "#Cluster: 1\n1,2\n#Cluster: 2\n3,4\n"
    );
}

#[test]
fn empty_ultrametric_yields_empty_partition() {
    let partition = extract_clusters(&ultrametric(0, &[]), Threshold::HALF);
    assert_eq!(partition.cluster_count(), 0);
    assert!(partition.clusters().is_empty());
}

#[rstest]
#[case::coarser(vec![vec![1, 2, 3], vec![4]], vec![vec![1, 2], vec![3], vec![4]], true)]
#[case::same(vec![vec![1, 2], vec![3, 4]], vec![vec![1, 2], vec![3, 4]], true)]
#[case::split(vec![vec![1], vec![2, 3, 4]], vec![vec![1, 2], vec![3], vec![4]], false)]
#[case::different_vertices(vec![vec![1, 2]], vec![vec![1], vec![3]], false)]
fn coarsening_is_detected(
    #[case] coarse: Vec<Vec<u64>>,
    #[case] fine: Vec<Vec<u64>>,
    #[case] expected: bool,
) {
    let build = |groups: Vec<Vec<u64>>| {
        Partition::from_groups(
            groups
                .into_iter()
                .map(|group| group.into_iter().map(v).collect::<Vec<_>>()),
        )
    };
    assert_eq!(build(coarse).is_coarsening_of(&build(fine)), expected);
}

#[test]
fn disagreement_counts_cut_positive_and_kept_negative_edges() {
    let graph = SignedGraph::from_edges([
        (1, 2, 2.0),  // same cluster, agrees
        (3, 4, -1.5), // same cluster, negative: costs 1.5
        (2, 3, 0.5),  // different clusters, positive: costs 0.5
        (1, 4, -3.0), // different clusters, agrees
    ])
    .expect("graph is valid");
    let score = clustering_disagreement(&two_pairs(), &graph, Threshold::HALF)
        .expect("vertices are covered");
    assert_eq!(score, 2.0);
}

#[test]
fn disagreement_rejects_uncovered_vertices() {
    let graph = SignedGraph::from_edges([(1, 5, 1.0)]).expect("graph is valid");
    let err = clustering_disagreement(&two_pairs(), &graph, Threshold::HALF)
        .expect_err("vertex 5 is not covered");
    assert_eq!(
        err,
        CcError::MalformedInput {
            source: GraphError::UnknownVertex { vertex: v(5) }
        }
    );
}

proptest! {
    #![proptest_config(suite_proptest_config(64))]

    #[test]
    fn raising_the_threshold_coarsens(
        graph in complete_induced_graph(8),
        low in 0.0_f64..=1.0,
        high in 0.0_f64..=1.0,
    ) {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        let ultrametric = compute_ultrametric(&graph).expect("complete graphs are connected");
        let fine = extract_clusters(&ultrametric, Threshold::new(low).expect("in range"));
        let coarse = extract_clusters(&ultrametric, Threshold::new(high).expect("in range"));
        prop_assert!(coarse.is_coarsening_of(&fine));
        prop_assert!(coarse.cluster_count() <= fine.cluster_count());
    }

    #[test]
    fn partition_agrees_with_pairwise_threshold_rule(
        graph in complete_induced_graph(8),
        threshold in 0.0_f64..=1.0,
    ) {
        let threshold = Threshold::new(threshold).expect("in range");
        let ultrametric = compute_ultrametric(&graph).expect("complete graphs are connected");
        let partition = extract_clusters(&ultrametric, threshold);
        for (a, b, distance) in ultrametric.pairs() {
            prop_assert_eq!(partition.same_cluster(a, b), Some(threshold.joins(distance)));
        }
    }

    #[test]
    fn disagreement_is_non_negative_and_zero_only_on_agreement(
        graph in complete_induced_graph(7),
        signs in proptest::collection::vec(
            prop_oneof![Just(None), Just(Some(1.0)), Just(Some(-1.0))],
            21,
        ),
        threshold in 0.0_f64..=1.0,
    ) {
        let threshold = Threshold::new(threshold).expect("in range");
        let ultrametric = compute_ultrametric(&graph).expect("complete graphs are connected");
        let edges: Vec<(u64, u64, f64)> = ultrametric
            .pairs()
            .zip(signs)
            .filter_map(|((a, b, _), sign)| sign.map(|w| (a.get(), b.get(), w)))
            .collect();
        let signed = SignedGraph::from_edges(edges).expect("pairs are distinct");
        let score = clustering_disagreement(&ultrametric, &signed, threshold)
            .expect("signed graph only names covered vertices");
        let partition = extract_clusters(&ultrametric, threshold);
        let agrees = signed.edges().iter().all(|edge| {
            let together = partition.same_cluster(edge.left(), edge.right()) == Some(true);
            together == (edge.weight() >= 0.0)
        });
        prop_assert!(score >= 0.0);
        prop_assert_eq!(score == 0.0, agrees);
    }
}
