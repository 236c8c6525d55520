//! Error types for the ccedit core library.
//!
//! Defines the error enums exposed by the public API, their stable
//! machine-readable codes, and a convenient result alias.

use std::{fmt, sync::Arc, time::Duration};

use thiserror::Error;

use crate::graph::VertexId;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced while constructing or querying a graph.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// An edge joined a vertex to itself.
    #[error("self loop on vertex {vertex}")]
    SelfLoop {
        /// Vertex named at both ends of the edge.
        vertex: VertexId,
    },
    /// The same unordered pair was given a weight twice.
    #[error("duplicate edge ({left}, {right})")]
    DuplicateEdge {
        /// Smaller endpoint of the repeated pair.
        left: VertexId,
        /// Larger endpoint of the repeated pair.
        right: VertexId,
    },
    /// An edge weight was NaN or infinite.
    #[error("edge ({left}, {right}) has a non-finite weight")]
    NonFiniteWeight {
        /// Smaller endpoint of the offending pair.
        left: VertexId,
        /// Larger endpoint of the offending pair.
        right: VertexId,
    },
    /// A vertex was referenced that the graph does not contain.
    #[error("vertex {vertex} is not part of the graph")]
    UnknownVertex {
        /// The missing vertex.
        vertex: VertexId,
    },
    /// Both vertices exist but the pair joining them carries no weight.
    #[error("pair ({left}, {right}) has no weight")]
    MissingPair {
        /// Smaller endpoint of the pair.
        left: VertexId,
        /// Larger endpoint of the pair.
        right: VertexId,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// An edge joined a vertex to itself.
        SelfLoop => SelfLoop { .. } => "GRAPH_SELF_LOOP",
        /// The same unordered pair was given a weight twice.
        DuplicateEdge => DuplicateEdge { .. } => "GRAPH_DUPLICATE_EDGE",
        /// An edge weight was NaN or infinite.
        NonFiniteWeight => NonFiniteWeight { .. } => "GRAPH_NON_FINITE_WEIGHT",
        /// A vertex was referenced that the graph does not contain.
        UnknownVertex => UnknownVertex { .. } => "GRAPH_UNKNOWN_VERTEX",
        /// Both vertices exist but the pair joining them carries no weight.
        MissingPair => MissingPair { .. } => "GRAPH_MISSING_PAIR",
    }
}

/// An error reported by an [`crate::LpSolver`] backend.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SolverError {
    /// The backend proved the program infeasible.
    #[error("linear program is infeasible")]
    Infeasible,
    /// The backend proved the program unbounded.
    #[error("linear program is unbounded")]
    Unbounded,
    /// The solve did not finish within the configured limit.
    #[error("solver did not finish within {limit:?}")]
    TimedOut {
        /// Limit that elapsed.
        limit: Duration,
    },
    /// The backend returned a different number of values than variables.
    #[error("solver returned {got} values for {expected} variables")]
    SolutionLengthMismatch {
        /// Number of variables in the program.
        expected: usize,
        /// Number of values returned.
        got: usize,
    },
    /// The backend returned a NaN or infinite value for a variable.
    #[error("solver returned a non-finite value for variable {variable}")]
    NonFiniteValue {
        /// Index of the offending variable.
        variable: usize,
    },
    /// Any other backend failure.
    #[error("solver backend failed: {message}")]
    Backend {
        /// Backend-provided description.
        message: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`SolverError`] variants.
    enum SolverErrorCode for SolverError {
        /// The backend proved the program infeasible.
        Infeasible => Infeasible => "SOLVER_INFEASIBLE",
        /// The backend proved the program unbounded.
        Unbounded => Unbounded => "SOLVER_UNBOUNDED",
        /// The solve did not finish within the configured limit.
        TimedOut => TimedOut { .. } => "SOLVER_TIMED_OUT",
        /// The backend returned a different number of values than variables.
        SolutionLengthMismatch => SolutionLengthMismatch { .. } => "SOLVER_SOLUTION_LENGTH_MISMATCH",
        /// The backend returned a NaN or infinite value for a variable.
        NonFiniteValue => NonFiniteValue { .. } => "SOLVER_NON_FINITE_VALUE",
        /// Any other backend failure.
        Backend => Backend { .. } => "SOLVER_BACKEND",
    }
}

/// Error type produced by the correlation clustering pipeline.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum CcError {
    /// The input graph was rejected before any solve.
    #[error("malformed input: {source}")]
    MalformedInput {
        /// Underlying graph error.
        #[from]
        source: GraphError,
    },
    /// The external solver failed or reported infeasibility.
    #[error("solver `{solver}` failed: {error}")]
    SolverFailed {
        /// Name of the solver backend.
        solver: Arc<str>,
        #[source]
        /// Underlying solver error.
        error: SolverError,
    },
    /// The spanning tree step could not reach every vertex.
    #[error("induced graph over {vertices} vertices splits into {components} components")]
    DisconnectedInput {
        /// Number of connected components found.
        components: usize,
        /// Number of vertices in the graph.
        vertices: usize,
    },
    /// The rounding threshold was outside `[0, 1]` or not finite.
    #[error("threshold must be a finite value in [0, 1] (got {got})")]
    InvalidThreshold {
        /// The rejected threshold.
        got: f64,
    },
}

define_error_codes! {
    /// Stable codes describing [`CcError`] variants.
    enum CcErrorCode for CcError {
        /// The input graph was rejected before any solve.
        MalformedInput => MalformedInput { .. } => "CCEDIT_MALFORMED_INPUT",
        /// The external solver failed or reported infeasibility.
        SolverFailed => SolverFailed { .. } => "CCEDIT_SOLVER_FAILED",
        /// The spanning tree step could not reach every vertex.
        DisconnectedInput => DisconnectedInput { .. } => "CCEDIT_DISCONNECTED_INPUT",
        /// The rounding threshold was outside `[0, 1]` or not finite.
        InvalidThreshold => InvalidThreshold { .. } => "CCEDIT_INVALID_THRESHOLD",
    }
}

impl CcError {
    /// Retrieve the inner [`GraphErrorCode`] when the input graph was rejected.
    #[must_use]
    pub const fn graph_code(&self) -> Option<GraphErrorCode> {
        match self {
            Self::MalformedInput { source } => Some(source.code()),
            _ => None,
        }
    }

    /// Retrieve the inner [`SolverErrorCode`] when the solver failed.
    #[must_use]
    pub const fn solver_code(&self) -> Option<SolverErrorCode> {
        match self {
            Self::SolverFailed { error, .. } => Some(error.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, CcError>;
