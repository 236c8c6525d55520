//! Edge-list backed graph provider.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use ccedit_core::{SignedGraph, VertexId};

use crate::{errors::EdgeListError, parse::parse_line};

/// A named [`SignedGraph`] loaded from an edge list.
#[derive(Debug, Clone)]
pub struct EdgeListProvider {
    name: String,
    graph: SignedGraph,
}

impl EdgeListProvider {
    /// Reads an edge list from `reader`.
    ///
    /// # Errors
    /// Returns [`EdgeListError`] when reading fails, a line is malformed, the
    /// graph rejects an edge, or no edges are present.
    ///
    /// # Examples
    /// ```
    /// use std::io::Cursor;
    ///
    /// use ccedit_providers_edgelist::EdgeListProvider;
    ///
    /// let provider = EdgeListProvider::try_from_reader(
    ///     "demo",
    ///     Cursor::new("# signed triangle\n1,2,1\n2,3,1\n1,3,-1\n"),
    /// )?;
    /// assert_eq!(provider.name(), "demo");
    /// assert_eq!(provider.graph().edge_count(), 3);
    /// # Ok::<(), ccedit_providers_edgelist::EdgeListError>(())
    /// ```
    pub fn try_from_reader<R: BufRead>(
        name: impl Into<String>,
        reader: R,
    ) -> Result<Self, EdgeListError> {
        let mut builder = SignedGraph::builder();
        let mut edges = 0_usize;
        for (index, raw) in reader.lines().enumerate() {
            let raw = raw?;
            let line = index + 1;
            let Some(record) = parse_line(line, &raw)? else {
                continue;
            };
            builder
                .add_edge(
                    VertexId::new(record.source),
                    VertexId::new(record.target),
                    record.weight,
                )
                .map_err(|source| EdgeListError::Graph { line, source })?;
            edges += 1;
        }
        if edges == 0 {
            return Err(EdgeListError::EmptyInput);
        }
        Ok(Self {
            name: name.into(),
            graph: builder.build(),
        })
    }

    /// Reads the edge list stored at `path`.
    ///
    /// # Errors
    /// Returns [`EdgeListError::Io`] when the file cannot be opened, and the
    /// errors of [`EdgeListProvider::try_from_reader`] otherwise.
    pub fn try_from_path(
        name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<Self, EdgeListError> {
        let file = File::open(path)?;
        Self::try_from_reader(name, BufReader::new(file))
    }

    /// Name given to the graph at load time.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parsed graph.
    #[must_use]
    pub fn graph(&self) -> &SignedGraph {
        &self.graph
    }

    /// Consumes the provider, keeping only the graph.
    #[must_use]
    pub fn into_graph(self) -> SignedGraph {
        self.graph
    }
}
