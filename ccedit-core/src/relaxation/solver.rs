//! The solver capability consumed by the relaxation stage.

use std::sync::Arc;

use crate::error::SolverError;

use super::RelaxationProgram;

/// Per-variable assignment returned by a successful solve.
#[derive(Clone, Debug, PartialEq)]
pub struct LpSolution {
    values: Vec<f64>,
}

impl LpSolution {
    /// Wraps the solved values, indexed like the program's variables.
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Solved values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Consumes the solution, returning the solved values.
    #[must_use]
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

/// A linear programming backend able to minimise a [`RelaxationProgram`].
///
/// Implementations own whatever native handle they need for the duration of
/// one [`LpSolver::solve`] call. Nothing else about the backend is assumed
/// beyond returning one numeric value per variable on success.
///
/// # Examples
/// ```
/// use ccedit_core::{LpSolution, LpSolver, RelaxationProgram, SolverError};
///
/// /// Places every pair in different clusters.
/// struct AllApart;
///
/// impl LpSolver for AllApart {
///     fn name(&self) -> &str {
///         "all-apart"
///     }
///
///     fn solve(&self, program: &RelaxationProgram) -> Result<LpSolution, SolverError> {
///         Ok(LpSolution::new(vec![1.0; program.variable_count()]))
///     }
/// }
///
/// assert_eq!(AllApart.name(), "all-apart");
/// ```
pub trait LpSolver {
    /// Human-readable backend name used in errors and logs.
    fn name(&self) -> &str;

    /// Minimises `program`.
    ///
    /// # Errors
    /// Returns [`SolverError`] when the backend reports infeasibility,
    /// unboundedness, or any other failure.
    fn solve(&self, program: &RelaxationProgram) -> Result<LpSolution, SolverError>;
}

impl<S: LpSolver + ?Sized> LpSolver for Arc<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn solve(&self, program: &RelaxationProgram) -> Result<LpSolution, SolverError> {
        (**self).solve(program)
    }
}

impl<S: LpSolver + ?Sized> LpSolver for &S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn solve(&self, program: &RelaxationProgram) -> Result<LpSolution, SolverError> {
        (**self).solve(program)
    }
}
