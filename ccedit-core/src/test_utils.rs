//! Shared test utilities for `ccedit-core`.

use ccedit_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::{prelude::*, test_runner::Config as ProptestConfig};

use crate::{InducedDistanceGraph, SignedGraph, VertexId};

/// Builds a standard proptest configuration from the shared CI profile.
///
/// This keeps property suites aligned on the same `PROGTEST_CASES` and
/// `CCEDIT_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    config_from(ProptestRunProfile::load(default_cases, false))
}

/// Like [`suite_proptest_config`] but never exceeding `max_cases`, for suites
/// that run the LP solver per case.
#[must_use]
pub(crate) fn solver_proptest_config(default_cases: u32, max_cases: u32) -> ProptestConfig {
    config_from(ProptestRunProfile::load(default_cases, false).capped(max_cases))
}

fn config_from(profile: ProptestRunProfile) -> ProptestConfig {
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Complete induced graphs on `1..=n` with weights drawn from a small grid,
/// so ties between pairs are common.
pub(crate) fn complete_induced_graph(
    max_vertices: usize,
) -> impl Strategy<Value = InducedDistanceGraph> {
    (0..=max_vertices).prop_flat_map(|n| {
        let pairs = n * n.saturating_sub(1) / 2;
        proptest::collection::vec(0_u8..=8, pairs).prop_map(move |steps| {
            let vertices: Vec<VertexId> = (1..=n as u64).map(VertexId::new).collect();
            let pairs = vertices.iter().enumerate().flat_map(|(i, &a)| {
                vertices.iter().skip(i + 1).map(move |&b| (a, b))
            });
            let weights = pairs
                .zip(steps)
                .map(|((a, b), step)| (a, b, f64::from(step) / 8.0));
            InducedDistanceGraph::from_weights(vertices.iter().copied(), weights)
                .unwrap_or_else(|err| panic!("generated induced graph is invalid: {err}"))
        })
    })
}

/// Signed graphs on up to `max_vertices` vertices with unit-magnitude or
/// fractional weights of either sign.
pub(crate) fn signed_graph(max_vertices: u64) -> impl Strategy<Value = SignedGraph> {
    (2..=max_vertices).prop_flat_map(|n| {
        let pairs: Vec<(u64, u64)> = (1..=n)
            .flat_map(|a| ((a + 1)..=n).map(move |b| (a, b)))
            .collect();
        let len = pairs.len();
        proptest::collection::vec(
            prop_oneof![
                3 => Just(None),
                2 => Just(Some(1.0)),
                2 => Just(Some(-1.0)),
                1 => (-4_i8..=4).prop_map(|step| Some(f64::from(step) / 2.0)),
            ],
            len,
        )
        .prop_map(move |weights| {
            let mut builder = SignedGraph::builder();
            for vertex in 1..=n {
                builder.add_vertex(VertexId::new(vertex));
            }
            for (&(a, b), weight) in pairs.iter().zip(weights) {
                if let Some(weight) = weight {
                    builder
                        .add_edge(VertexId::new(a), VertexId::new(b), weight)
                        .unwrap_or_else(|err| panic!("generated edge is invalid: {err}"));
                }
            }
            builder.build()
        })
    })
}
