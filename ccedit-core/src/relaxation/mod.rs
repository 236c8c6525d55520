//! Linear-programming relaxation of correlation clustering.
//!
//! The relaxation assigns every unordered vertex pair a "different cluster"
//! indicator `x` and minimises the weighted disagreement subject to the
//! triangle inequalities, which make `x` a pseudo-metric. Solving is delegated
//! to an [`LpSolver`]; the decoded values form an [`InducedDistanceGraph`].

#[cfg(feature = "microlp")]
mod microlp;
mod program;
mod solver;
mod time_limit;

use std::{fmt, sync::Arc};

use tracing::{debug, info, instrument};

use crate::{
    Result,
    error::{CcError, SolverError},
    graph::{InducedDistanceGraph, PairMatrix, SignedGraph, missing_pair, pair_positions},
};

#[cfg(feature = "microlp")]
pub use self::microlp::MicroLpSolver;
pub use self::{
    program::{RelaxationProgram, TriangleConstraint, TriangleConstraints, VariableDomain},
    solver::{LpSolution, LpSolver},
    time_limit::TimeLimitedSolver,
};

/// Variable domain used by [`solve_relaxation`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum RelaxationMode {
    /// Continuous variables in `[0, 1]`.
    #[default]
    Relaxed,
    /// Binary variables.
    ///
    /// Solved values are decoded exactly like relaxed ones and feed the same
    /// rounding stage.
    Integer,
}

impl fmt::Display for RelaxationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Relaxed => "relaxed",
            Self::Integer => "integer",
        })
    }
}

/// Solves the relaxation of `graph` and decodes it into an induced graph.
///
/// Every pair of vertices receives a weight, whether or not it is an edge of
/// `graph`. Values are clamped into `[0, 1]` to absorb solver round-off.
/// Graphs with fewer than two vertices have no pairs and skip the solver.
///
/// # Errors
/// Returns [`CcError::SolverFailed`] when the solver reports failure or
/// returns an assignment that does not fit the program.
///
/// # Examples
/// ```
/// use ccedit_core::{LpSolution, LpSolver, RelaxationMode, RelaxationProgram, SignedGraph,
///     SolverError, VertexId, solve_relaxation};
///
/// struct Halves;
///
/// impl LpSolver for Halves {
///     fn name(&self) -> &str { "halves" }
///     fn solve(&self, program: &RelaxationProgram) -> Result<LpSolution, SolverError> {
///         Ok(LpSolution::new(vec![0.5; program.variable_count()]))
///     }
/// }
///
/// let graph = SignedGraph::from_edges([(1, 2, 1.0), (2, 3, 1.0)])?;
/// let induced = solve_relaxation(&graph, RelaxationMode::Relaxed, &Halves)?;
/// assert!(induced.is_complete());
/// assert_eq!(induced.weight(VertexId::new(1), VertexId::new(3)), Some(0.5));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "core.solve_relaxation",
    err,
    skip(graph, solver),
    fields(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        mode = %mode,
        solver = solver.name(),
    ),
)]
pub fn solve_relaxation<S>(
    graph: &SignedGraph,
    mode: RelaxationMode,
    solver: &S,
) -> Result<InducedDistanceGraph>
where
    S: LpSolver + ?Sized,
{
    let mut matrix = PairMatrix::empty(graph.vertex_index().clone());
    if graph.vertex_count() < 2 {
        debug!("fewer than two vertices, skipping solver");
        return Ok(InducedDistanceGraph::from_matrix(matrix));
    }

    let program = RelaxationProgram::from_graph(graph, mode);
    debug!(
        variables = program.variable_count(),
        constraints = program.constraint_count(),
        "relaxation program built"
    );

    let fail = |error: SolverError| CcError::SolverFailed {
        solver: Arc::from(solver.name()),
        error,
    };
    let values = solver.solve(&program).map_err(fail)?.into_values();
    if values.len() != program.variable_count() {
        return Err(fail(SolverError::SolutionLengthMismatch {
            expected: program.variable_count(),
            got: values.len(),
        }));
    }
    if let Some(variable) = values.iter().position(|value| !value.is_finite()) {
        return Err(fail(SolverError::NonFiniteValue { variable }));
    }

    for ((i, j), value) in pair_positions(graph.vertex_count()).zip(&values) {
        matrix.set(i, j, value.clamp(0.0, 1.0));
    }
    info!(
        objective = program.objective_value(&values),
        "relaxation solved"
    );
    Ok(InducedDistanceGraph::from_matrix(matrix))
}

/// Evaluates the relaxation objective of `graph` on `induced`.
///
/// For an optimal `induced` this is the lower bound against which a rounded
/// clustering's disagreement is compared.
///
/// # Errors
/// Returns [`CcError::MalformedInput`] when an edge of `graph` has no weight
/// in `induced`.
///
/// # Examples
/// ```
/// use ccedit_core::{InducedDistanceGraph, SignedGraph, VertexId, relaxation_objective};
///
/// let v = VertexId::new;
/// let graph = SignedGraph::from_edges([(1, 2, 2.0), (2, 3, -1.0)])?;
/// let induced = InducedDistanceGraph::from_weights(
///     [v(1), v(2), v(3)],
///     [(v(1), v(2), 0.25), (v(1), v(3), 1.0), (v(2), v(3), 0.75)],
/// )?;
/// // 2.0 * 0.25 + 1.0 * (1 - 0.75)
/// assert_eq!(relaxation_objective(&graph, &induced)?, 0.75);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn relaxation_objective(graph: &SignedGraph, induced: &InducedDistanceGraph) -> Result<f64> {
    graph.edges().iter().try_fold(0.0, |total, edge| -> Result<f64> {
        let (left, right) = (edge.left(), edge.right());
        let x = induced
            .weight(left, right)
            .ok_or_else(|| missing_pair(induced.vertices(), left, right))?;
        let weight = edge.weight();
        let cost = if weight < 0.0 {
            weight.abs() * (1.0 - x)
        } else {
            weight * x
        };
        Ok(total + cost)
    })
}
