//! Benchmark support crate for ccedit.
//!
//! Provides the signed random graph generator, parameter types, and the
//! disagreement-versus-threshold sweep used by the Criterion benchmarks of
//! the relaxation, ultrametric, and end-to-end pipeline stages.

pub mod error;
pub mod generator;
pub mod params;
pub mod sweep;
