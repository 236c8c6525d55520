//! End-to-end correlation clustering benchmarks.
//!
//! Measures the full relax, round, and extract pipeline on single graphs,
//! a parallel batch of graphs, and a threshold sweep over one solved
//! ultrametric.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use ccedit_benches::{
    error::BenchSetupError,
    generator::SignedGnpConfig,
    params::GnpBenchParams,
    sweep::{disagreement_profile, unit_thresholds},
};
use ccedit_core::{CorrelationClusteringBuilder, SignedGraph};

/// Seed used for all graph generation in this benchmark.
const SEED: u64 = 42;

/// Graph sizes to benchmark.
const VERTEX_COUNTS: &[usize] = &[10, 20, 30];

/// `(edge_probability, positive_probability)` pairs to benchmark.
const DENSITIES: &[(f64, f64)] = &[(0.5, 0.5), (1.0, 0.7)];

/// Graphs per parallel batch.
const BATCH_SIZE: u64 = 8;

/// Steps in the threshold sweep.
const SWEEP_STEPS: usize = 20;

fn pipeline_run_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let clustering = CorrelationClusteringBuilder::new().build()?;
    let mut group = c.benchmark_group("pipeline_run");
    group.sample_size(10);

    for &(edge_probability, positive_probability) in DENSITIES {
        for &vertex_count in VERTEX_COUNTS {
            let config = SignedGnpConfig {
                vertex_count,
                edge_probability,
                positive_probability,
                seed: SEED,
            };
            let graph = config.generate()?;
            clustering.run(&graph)?;

            group.bench_with_input(
                BenchmarkId::from_parameter(GnpBenchParams::from(&config)),
                &graph,
                |b, graph| {
                    b.iter(|| {
                        let _outcome = clustering.run(graph);
                    });
                },
            );
        }
    }

    group.finish();
    Ok(())
}

fn pipeline_batch_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let clustering = CorrelationClusteringBuilder::new().build()?;
    let mut group = c.benchmark_group("pipeline_run_batch");
    group.sample_size(10);

    for &vertex_count in VERTEX_COUNTS {
        let graphs = (0..BATCH_SIZE)
            .map(|offset| {
                SignedGnpConfig {
                    vertex_count,
                    edge_probability: 0.5,
                    positive_probability: 0.5,
                    seed: SEED.wrapping_add(offset),
                }
                .generate()
            })
            .collect::<Result<Vec<SignedGraph>, _>>()?;

        group.bench_with_input(
            BenchmarkId::from_parameter(vertex_count),
            &graphs,
            |b, graphs| {
                b.iter(|| {
                    let _outcomes = clustering.run_batch(graphs);
                });
            },
        );
    }

    group.finish();
    Ok(())
}

fn threshold_sweep_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let clustering = CorrelationClusteringBuilder::new().build()?;
    let thresholds = unit_thresholds(SWEEP_STEPS);
    let mut group = c.benchmark_group("threshold_sweep");

    for &vertex_count in VERTEX_COUNTS {
        let graph = SignedGnpConfig {
            vertex_count,
            edge_probability: 0.5,
            positive_probability: 0.5,
            seed: SEED,
        }
        .generate()?;
        let ultrametric = clustering.ultrametric(&graph)?;
        disagreement_profile(&ultrametric, &graph, &thresholds)?;

        group.bench_with_input(
            BenchmarkId::from_parameter(vertex_count),
            &(&ultrametric, &graph),
            |b, &(ultrametric, graph)| {
                b.iter(|| {
                    let _profile = disagreement_profile(ultrametric, graph, &thresholds);
                });
            },
        );
    }

    group.finish();
    Ok(())
}

fn pipeline_run(c: &mut Criterion) {
    if let Err(err) = pipeline_run_impl(c) {
        panic!("pipeline_run benchmark setup failed: {err}");
    }
}

fn pipeline_batch(c: &mut Criterion) {
    if let Err(err) = pipeline_batch_impl(c) {
        panic!("pipeline_batch benchmark setup failed: {err}");
    }
}

fn threshold_sweep(c: &mut Criterion) {
    if let Err(err) = threshold_sweep_impl(c) {
        panic!("threshold_sweep benchmark setup failed: {err}");
    }
}

criterion_group!(benches, pipeline_run, pipeline_batch, threshold_sweep);
criterion_main!(benches);
