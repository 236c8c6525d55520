//! Seeded signed random graphs for benchmarks.
//!
//! `G(n, e, p)` joins each unordered pair with probability `e` and makes the
//! edge `+1` with probability `p`, otherwise `-1`.

use ccedit_core::{GraphError, InducedDistanceGraph, SignedGraph, VertexId};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use thiserror::Error;

/// Errors raised while generating benchmark graphs.
#[derive(Debug, Error, PartialEq)]
pub enum GeneratorError {
    /// A probability parameter was NaN or outside `[0, 1]`.
    #[error("{parameter} must be a probability in [0, 1] (got {value})")]
    InvalidProbability {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The vertex count does not fit a vertex id.
    #[error("vertex count {count} exceeds the vertex id range")]
    TooManyVertices {
        /// The requested vertex count.
        count: usize,
    },
    /// The graph rejected a generated edge.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Configuration for a seeded `G(n, e, p)` signed graph.
///
/// # Examples
/// ```
/// use ccedit_benches::generator::SignedGnpConfig;
///
/// let config = SignedGnpConfig {
///     vertex_count: 12,
///     edge_probability: 0.5,
///     positive_probability: 0.5,
///     seed: 7,
/// };
/// let graph = config.generate()?;
/// assert_eq!(graph.vertex_count(), 12);
/// assert_eq!(graph, config.generate()?);
/// # Ok::<(), ccedit_benches::generator::GeneratorError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SignedGnpConfig {
    /// Number of vertices, identified `1..=vertex_count`.
    pub vertex_count: usize,
    /// Probability that a pair is joined by an edge.
    pub edge_probability: f64,
    /// Probability that an edge is positive.
    pub positive_probability: f64,
    /// Seed for the deterministic generator.
    pub seed: u64,
}

impl SignedGnpConfig {
    /// Generates the graph described by this configuration.
    ///
    /// Every vertex is present, isolated or not. The same configuration
    /// always produces the same graph.
    ///
    /// # Errors
    /// Returns [`GeneratorError::InvalidProbability`] for a probability
    /// outside `[0, 1]` and [`GeneratorError::TooManyVertices`] when the
    /// vertex count cannot be expressed as vertex ids.
    pub fn generate(&self) -> Result<SignedGraph, GeneratorError> {
        validate_probability("edge_probability", self.edge_probability)?;
        validate_probability("positive_probability", self.positive_probability)?;
        let vertices = vertex_ids(self.vertex_count)?;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut builder = SignedGraph::builder();
        for (position, &left) in vertices.iter().enumerate() {
            builder.add_vertex(left);
            for &right in vertices.iter().skip(position + 1) {
                if !rng.gen_bool(self.edge_probability) {
                    continue;
                }
                let weight = if rng.gen_bool(self.positive_probability) {
                    1.0
                } else {
                    -1.0
                };
                builder.add_edge(left, right, weight)?;
            }
        }
        Ok(builder.build())
    }
}

/// Complete induced graph on `1..=vertex_count` with uniform weights in
/// `[0, 1)`, standing in for a solved relaxation.
///
/// # Errors
/// Returns [`GeneratorError::TooManyVertices`] when the vertex count cannot
/// be expressed as vertex ids.
pub fn random_induced_graph(
    vertex_count: usize,
    seed: u64,
) -> Result<InducedDistanceGraph, GeneratorError> {
    let vertices = vertex_ids(vertex_count)?;
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut weights = Vec::new();
    for (position, &left) in vertices.iter().enumerate() {
        for &right in vertices.iter().skip(position + 1) {
            weights.push((left, right, rng.r#gen::<f64>()));
        }
    }
    Ok(InducedDistanceGraph::from_weights(
        vertices.iter().copied(),
        weights,
    )?)
}

fn validate_probability(parameter: &'static str, value: f64) -> Result<(), GeneratorError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(GeneratorError::InvalidProbability { parameter, value })
    }
}

fn vertex_ids(count: usize) -> Result<Vec<VertexId>, GeneratorError> {
    let last = u64::try_from(count).map_err(|_| GeneratorError::TooManyVertices { count })?;
    Ok((1..=last).map(VertexId::new).collect())
}
