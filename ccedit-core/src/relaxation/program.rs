//! Solver-neutral description of the triangle-constrained relaxation.

use std::iter::FusedIterator;

use crate::graph::{SignedGraph, pair_count, pair_offset};

use super::RelaxationMode;

/// Domain of every decision variable.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VariableDomain {
    /// Continuous values in `[0, 1]`.
    UnitInterval,
    /// Values restricted to `{0, 1}`.
    Binary,
}

impl From<RelaxationMode> for VariableDomain {
    fn from(mode: RelaxationMode) -> Self {
        match mode {
            RelaxationMode::Relaxed => Self::UnitInterval,
            RelaxationMode::Integer => Self::Binary,
        }
    }
}

/// Linear program with one variable per unordered vertex pair.
///
/// Variable `k` belongs to the `k`-th pair in ascending `(i, j)` order over
/// the graph's dense vertex positions. The objective is
/// `constant + Σ coefficient[k] * x[k]`, minimised subject to the triangle
/// inequalities yielded by [`RelaxationProgram::constraints`].
///
/// # Examples
/// ```
/// use ccedit_core::{RelaxationMode, RelaxationProgram, SignedGraph};
///
/// let graph = SignedGraph::from_edges([(1, 2, 2.0), (2, 3, -1.0)])?;
/// let program = RelaxationProgram::from_graph(&graph, RelaxationMode::Relaxed);
/// assert_eq!(program.variable_count(), 3);
/// assert_eq!(program.objective_coefficients(), &[2.0, 0.0, -1.0]);
/// assert_eq!(program.objective_constant(), 1.0);
/// assert_eq!(program.constraint_count(), 3);
/// # Ok::<(), ccedit_core::GraphError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RelaxationProgram {
    vertex_count: usize,
    mode: RelaxationMode,
    coefficients: Vec<f64>,
    constant: f64,
}

impl RelaxationProgram {
    /// Builds the program for `graph`.
    ///
    /// A positive edge `w` costs `w * x`; a negative edge costs
    /// `|w| * (1 - x)`, which splits into the constant `|w|` and the
    /// coefficient `-|w|`. Absent pairs keep a zero coefficient.
    #[must_use]
    pub fn from_graph(graph: &SignedGraph, mode: RelaxationMode) -> Self {
        let index = graph.vertex_index();
        let n = index.len();
        let mut coefficients = vec![0.0; pair_count(n)];
        let mut constant = 0.0;
        for edge in graph.edges() {
            let (Some(i), Some(j)) = (index.position(edge.left()), index.position(edge.right()))
            else {
                continue;
            };
            let Some(slot) = coefficients.get_mut(pair_offset(n, i, j)) else {
                continue;
            };
            let weight = edge.weight();
            *slot = weight;
            if weight < 0.0 {
                constant += weight.abs();
            }
        }
        Self {
            vertex_count: n,
            mode,
            coefficients,
            constant,
        }
    }

    /// Number of vertices the pairs range over.
    #[must_use]
    #[rustfmt::skip]
    pub fn vertex_count(&self) -> usize { self.vertex_count }

    /// Relaxed or integer formulation.
    #[must_use]
    #[rustfmt::skip]
    pub fn mode(&self) -> RelaxationMode { self.mode }

    /// Domain applied to every variable.
    #[must_use]
    pub fn domain(&self) -> VariableDomain {
        self.mode.into()
    }

    /// Number of decision variables.
    #[must_use]
    pub fn variable_count(&self) -> usize {
        self.coefficients.len()
    }

    /// Objective coefficient of each variable.
    #[must_use]
    pub fn objective_coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Constant term of the objective.
    #[must_use]
    #[rustfmt::skip]
    pub fn objective_constant(&self) -> f64 { self.constant }

    /// Variable index of the pair at dense positions `i` and `j`.
    #[must_use]
    pub fn variable(&self, i: usize, j: usize) -> Option<usize> {
        let n = self.vertex_count;
        if i == j || i >= n || j >= n {
            return None;
        }
        let (i, j) = if i < j { (i, j) } else { (j, i) };
        Some(pair_offset(n, i, j))
    }

    /// Number of triangle constraints, `3 * C(n, 3)`.
    #[must_use]
    pub fn constraint_count(&self) -> usize {
        triple_count(self.vertex_count).saturating_mul(3)
    }

    /// Streams the triangle constraints without materialising them.
    #[must_use]
    pub fn constraints(&self) -> TriangleConstraints {
        TriangleConstraints::new(self.vertex_count)
    }

    /// Objective value of an assignment, constant included.
    ///
    /// Missing trailing values count as `0`.
    #[must_use]
    pub fn objective_value(&self, values: &[f64]) -> f64 {
        self.coefficients
            .iter()
            .zip(values)
            .fold(self.constant, |acc, (coefficient, value)| {
                acc + coefficient * value
            })
    }
}

fn triple_count(n: usize) -> usize {
    if n < 3 {
        return 0;
    }
    n * (n - 1) * (n - 2) / 6
}

/// One triangle inequality `x[plus.0] + x[plus.1] - x[minus] >= 0`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TriangleConstraint {
    plus: [usize; 2],
    minus: usize,
}

impl TriangleConstraint {
    /// Variables entering with coefficient `+1`.
    #[must_use]
    #[rustfmt::skip]
    pub fn plus(&self) -> [usize; 2] { self.plus }

    /// Variable entering with coefficient `-1`.
    #[must_use]
    #[rustfmt::skip]
    pub fn minus(&self) -> usize { self.minus }

    /// Left-hand side evaluated on `values`; `None` when a variable is missing.
    #[must_use]
    pub fn slack(&self, values: &[f64]) -> Option<f64> {
        let [a, b] = self.plus;
        Some(values.get(a)? + values.get(b)? - values.get(self.minus)?)
    }
}

/// Lazy iterator over the triangle constraints of `n` vertices.
///
/// Triples `i < j < k` are visited in lexicographic order. With
/// `a = x[i][j]`, `b = x[j][k]`, `c = x[i][k]` each triple yields
/// `a + b - c`, `a + c - b`, and `b + c - a`, in that order.
#[derive(Clone, Debug)]
pub struct TriangleConstraints {
    n: usize,
    cursor: (usize, usize, usize, u8),
    remaining: usize,
}

impl TriangleConstraints {
    fn new(n: usize) -> Self {
        Self {
            n,
            cursor: (0, 1, 2, 0),
            remaining: triple_count(n).saturating_mul(3),
        }
    }

    fn advance(&mut self) {
        let (i, j, k, rotation) = self.cursor;
        self.cursor = if rotation < 2 {
            (i, j, k, rotation + 1)
        } else if k + 1 < self.n {
            (i, j, k + 1, 0)
        } else if j + 2 < self.n {
            (i, j + 1, j + 2, 0)
        } else {
            (i + 1, i + 2, i + 3, 0)
        };
    }
}

impl Iterator for TriangleConstraints {
    type Item = TriangleConstraint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let (i, j, k, rotation) = self.cursor;
        let ij = pair_offset(self.n, i, j);
        let jk = pair_offset(self.n, j, k);
        let ik = pair_offset(self.n, i, k);
        let constraint = match rotation {
            0 => TriangleConstraint {
                plus: [ij, jk],
                minus: ik,
            },
            1 => TriangleConstraint {
                plus: [ij, ik],
                minus: jk,
            },
            _ => TriangleConstraint {
                plus: [jk, ik],
                minus: ij,
            },
        };
        self.remaining -= 1;
        if self.remaining > 0 {
            self.advance();
        }
        Some(constraint)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for TriangleConstraints {}

impl FusedIterator for TriangleConstraints {}
