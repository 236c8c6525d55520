//! Errors raised while reading an edge list.

use std::io;

use ccedit_core::GraphError;
use thiserror::Error;

/// Failure to turn edge-list text into a [`ccedit_core::SignedGraph`].
///
/// Line numbers are 1-based and count every line, comments included.
#[derive(Debug, Error)]
pub enum EdgeListError {
    /// The underlying reader failed.
    #[error("failed to read edge list: {0}")]
    Io(#[from] io::Error),
    /// A data line did not hold exactly three fields.
    #[error("line {line}: expected `source,target,weight`, found `{content}`")]
    MalformedLine {
        /// Offending line number.
        line: usize,
        /// The line as read, without its terminator.
        content: String,
    },
    /// A vertex field was not a non-negative integer.
    #[error("line {line}: invalid vertex id `{field}`")]
    InvalidVertex {
        /// Offending line number.
        line: usize,
        /// The field that failed to parse.
        field: String,
    },
    /// The weight field was not a number.
    #[error("line {line}: invalid weight `{field}`")]
    InvalidWeight {
        /// Offending line number.
        line: usize,
        /// The field that failed to parse.
        field: String,
    },
    /// The edge parsed but the graph rejected it.
    #[error("line {line}: {source}")]
    Graph {
        /// Offending line number.
        line: usize,
        /// Rejection reported by the graph builder.
        #[source]
        source: GraphError,
    },
    /// The input held no edges.
    #[error("edge list contains no edges")]
    EmptyInput,
}

impl EdgeListError {
    /// Line the error refers to, when it refers to one.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::MalformedLine { line, .. }
            | Self::InvalidVertex { line, .. }
            | Self::InvalidWeight { line, .. }
            | Self::Graph { line, .. } => Some(*line),
            Self::Io(_) | Self::EmptyInput => None,
        }
    }
}
