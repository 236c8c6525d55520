//! `good_lp` backend driving the pure Rust `microlp` engine.

use good_lp::{
    Expression, ProblemVariables, ResolutionError, Solution, SolverModel, Variable, variable,
};

use crate::error::SolverError;

use super::{LpSolution, LpSolver, RelaxationProgram, VariableDomain};

/// Default [`LpSolver`] backed by `good_lp` and `microlp`.
///
/// Each call builds a fresh model, so one instance can serve concurrent
/// solves.
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(docsrs, doc(cfg(feature = "microlp")))]
pub struct MicroLpSolver;

impl MicroLpSolver {
    /// Creates the backend.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl LpSolver for MicroLpSolver {
    fn name(&self) -> &str {
        "microlp"
    }

    fn solve(&self, program: &RelaxationProgram) -> Result<LpSolution, SolverError> {
        let mut vars = ProblemVariables::new();
        let domain = program.domain();
        let columns: Vec<Variable> = (0..program.variable_count())
            .map(|_| match domain {
                VariableDomain::UnitInterval => vars.add(variable().min(0.0).max(1.0)),
                VariableDomain::Binary => vars.add(variable().binary()),
            })
            .collect();

        let mut objective = Expression::with_capacity(columns.len());
        for (&column, &coefficient) in columns.iter().zip(program.objective_coefficients()) {
            if coefficient != 0.0 {
                objective.add_mul(coefficient, column);
            }
        }

        let mut model = vars
            .minimise(objective)
            .using(good_lp::solvers::microlp::microlp);
        for constraint in program.constraints() {
            let [a, b] = constraint.plus();
            let (Some(&a), Some(&b), Some(&c)) = (
                columns.get(a),
                columns.get(b),
                columns.get(constraint.minus()),
            ) else {
                return Err(SolverError::Backend {
                    message: "triangle constraint references an unknown variable".to_owned(),
                });
            };
            model.add_constraint((a + b - c).geq(0.0));
        }

        let solution = model.solve().map_err(map_resolution_error)?;
        let values = columns.iter().map(|&column| solution.value(column)).collect();
        Ok(LpSolution::new(values))
    }
}

fn map_resolution_error(error: ResolutionError) -> SolverError {
    match error {
        ResolutionError::Infeasible => SolverError::Infeasible,
        ResolutionError::Unbounded => SolverError::Unbounded,
        other => SolverError::Backend {
            message: other.to_string(),
        },
    }
}
