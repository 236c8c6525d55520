//! Benchmark parameter types.
//!
//! Groups related benchmark parameters into structs so Criterion ids render
//! consistently across groups.

use std::fmt;

use crate::generator::SignedGnpConfig;

/// Parameters for a run over one signed random graph.
#[derive(Clone, Debug)]
pub struct GnpBenchParams {
    /// Number of vertices.
    pub vertex_count: usize,
    /// Probability that a pair is joined by an edge.
    pub edge_probability: f64,
    /// Probability that an edge is positive.
    pub positive_probability: f64,
}

impl From<&SignedGnpConfig> for GnpBenchParams {
    fn from(config: &SignedGnpConfig) -> Self {
        Self {
            vertex_count: config.vertex_count,
            edge_probability: config.edge_probability,
            positive_probability: config.positive_probability,
        }
    }
}

impl fmt::Display for GnpBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={},e={},p={}",
            self.vertex_count, self.edge_probability, self.positive_probability
        )
    }
}

/// Parameters for an ultrametric benchmark run.
#[derive(Clone, Debug)]
pub struct UltrametricBenchParams {
    /// Number of vertices in the complete induced graph.
    pub vertex_count: usize,
}

impl fmt::Display for UltrametricBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={}", self.vertex_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gnp_params_render_compactly() {
        let params = GnpBenchParams {
            vertex_count: 20,
            edge_probability: 0.5,
            positive_probability: 0.3,
        };
        assert_eq!(params.to_string(), "n=20,e=0.5,p=0.3");
    }
}
