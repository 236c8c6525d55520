//! Builder utilities for configuring correlation clustering runs.
//!
//! Collects the threshold, relaxation mode, and solver limit, validating them
//! once before a [`CorrelationClustering`] is constructed.

use std::{sync::Arc, time::Duration};

#[cfg(feature = "microlp")]
use crate::relaxation::MicroLpSolver;
use crate::{
    Result,
    clusters::Threshold,
    pipeline::CorrelationClustering,
    relaxation::{LpSolver, RelaxationMode, TimeLimitedSolver},
};

/// Configures and constructs [`CorrelationClustering`] instances.
///
/// # Examples
/// ```
/// use std::time::Duration;
///
/// use ccedit_core::{CorrelationClusteringBuilder, RelaxationMode};
///
/// let clustering = CorrelationClusteringBuilder::new()
///     .with_threshold(0.4)
///     .with_mode(RelaxationMode::Integer)
///     .with_solver_time_limit(Duration::from_secs(30))
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(clustering.threshold().get(), 0.4);
/// assert_eq!(clustering.mode(), RelaxationMode::Integer);
/// ```
#[derive(Debug, Clone)]
pub struct CorrelationClusteringBuilder {
    threshold: f64,
    mode: RelaxationMode,
    solver_time_limit: Option<Duration>,
}

impl Default for CorrelationClusteringBuilder {
    fn default() -> Self {
        Self {
            threshold: Threshold::HALF.get(),
            mode: RelaxationMode::Relaxed,
            solver_time_limit: None,
        }
    }
}

impl CorrelationClusteringBuilder {
    /// Creates a builder with threshold `0.5`, relaxed mode, and no limit.
    ///
    /// # Examples
    /// ```
    /// use ccedit_core::{CorrelationClusteringBuilder, RelaxationMode};
    ///
    /// let builder = CorrelationClusteringBuilder::new();
    /// assert_eq!(builder.threshold(), 0.5);
    /// assert_eq!(builder.mode(), RelaxationMode::Relaxed);
    /// assert_eq!(builder.solver_time_limit(), None);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the rounding threshold; validated by the `build` methods.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Returns the configured threshold.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Selects relaxed or integer variables.
    #[must_use]
    pub fn with_mode(mut self, mode: RelaxationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Returns the configured relaxation mode.
    #[must_use]
    pub fn mode(&self) -> RelaxationMode {
        self.mode
    }

    /// Bounds every solve by `limit` of wall-clock time.
    #[must_use]
    pub fn with_solver_time_limit(mut self, limit: Duration) -> Self {
        self.solver_time_limit = Some(limit);
        self
    }

    /// Returns the configured solver time limit.
    #[must_use]
    pub fn solver_time_limit(&self) -> Option<Duration> {
        self.solver_time_limit
    }

    /// Validates the configuration and constructs a runner backed by
    /// [`MicroLpSolver`].
    ///
    /// # Errors
    /// Returns [`crate::CcError::InvalidThreshold`] when the threshold is not
    /// a finite value in `[0, 1]`.
    #[cfg(feature = "microlp")]
    #[cfg_attr(docsrs, doc(cfg(feature = "microlp")))]
    pub fn build(self) -> Result<CorrelationClustering> {
        self.build_with_solver(Arc::new(MicroLpSolver::new()))
    }

    /// Validates the configuration and constructs a runner backed by `solver`.
    ///
    /// # Errors
    /// Returns [`crate::CcError::InvalidThreshold`] when the threshold is not
    /// a finite value in `[0, 1]`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use ccedit_core::{CorrelationClusteringBuilder, LpSolution, LpSolver, RelaxationProgram,
    ///     SolverError};
    ///
    /// struct AllTogether;
    ///
    /// impl LpSolver for AllTogether {
    ///     fn name(&self) -> &str { "all-together" }
    ///     fn solve(&self, program: &RelaxationProgram) -> Result<LpSolution, SolverError> {
    ///         Ok(LpSolution::new(vec![0.0; program.variable_count()]))
    ///     }
    /// }
    ///
    /// let clustering = CorrelationClusteringBuilder::new()
    ///     .build_with_solver(Arc::new(AllTogether))
    ///     .expect("builder configuration is valid");
    /// assert_eq!(clustering.solver_name(), "all-together");
    /// ```
    pub fn build_with_solver(
        self,
        solver: Arc<dyn LpSolver + Send + Sync>,
    ) -> Result<CorrelationClustering> {
        let threshold = Threshold::new(self.threshold)?;
        let solver: Arc<dyn LpSolver + Send + Sync> = match self.solver_time_limit {
            Some(limit) => Arc::new(TimeLimitedSolver::new(solver, limit)),
            None => solver,
        };
        Ok(CorrelationClustering::new(threshold, self.mode, solver))
    }
}
