//! Benchmark setup error type.
//!
//! Aggregates the failures that can arise while preparing benchmark inputs
//! so setup functions can propagate them with `?`.

use ccedit_core::CcError;

use crate::generator::GeneratorError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Random graph generation failed.
    #[error("graph generation failed: {0}")]
    Generator(#[from] GeneratorError),
    /// A pipeline stage failed while preparing inputs.
    #[error("pipeline stage failed: {0}")]
    Pipeline(#[from] CcError),
}
