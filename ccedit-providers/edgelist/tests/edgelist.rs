//! Integration tests for the edge-list provider.
use std::{
    io::{BufRead, Cursor, Read, Write},
    path::PathBuf,
};

use anyhow::Result;
use ccedit_core::{GraphError, VertexId};
use ccedit_providers_edgelist::{EdgeListError, EdgeListProvider};
use rstest::rstest;
use tempfile::NamedTempFile;

const TRIANGLE: &str = "# imbalanced triangle\n1,2,1\n\n2,3,1\n1,3,-1\n";

#[rstest]
fn reads_weighted_edges() -> Result<()> {
    let provider = EdgeListProvider::try_from_reader("triangle", Cursor::new(TRIANGLE))?;
    let graph = provider.graph();
    assert_eq!(graph.vertex_count(), 3);
    assert_eq!(graph.edge_count(), 3);
    assert_eq!(graph.weight(VertexId::new(3), VertexId::new(1)), Some(-1.0));
    assert_eq!(provider.into_graph().edge_count(), 3);
    Ok(())
}

#[rstest]
fn reads_from_path() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(b"10\t20\t0.5\n20\t30\t-2\n")?;
    let provider = EdgeListProvider::try_from_path("tabbed", file.path())?;
    assert_eq!(provider.name(), "tabbed");
    assert_eq!(
        provider.graph().vertices(),
        &[VertexId::new(10), VertexId::new(20), VertexId::new(30)]
    );
    Ok(())
}

#[rstest]
fn missing_file_is_an_io_error() {
    let path = PathBuf::from("definitely/not/here.csv");
    let err = EdgeListProvider::try_from_path("missing", path).expect_err("file is absent");
    assert!(matches!(err, EdgeListError::Io(_)));
    assert_eq!(err.line(), None);
}

#[rstest]
#[case("")]
#[case("# only comments\n\n# here\n")]
fn inputs_without_edges_are_rejected(#[case] raw: &str) {
    let err = EdgeListProvider::try_from_reader("empty", Cursor::new(raw))
        .expect_err("no edges present");
    assert!(matches!(err, EdgeListError::EmptyInput));
}

#[rstest]
fn malformed_lines_report_their_position() {
    let err = EdgeListProvider::try_from_reader("bad", Cursor::new("# header\n1,2,1\n2,3\n"))
        .expect_err("third line is short");
    assert_eq!(err.line(), Some(3));
    assert_eq!(
        err.to_string(),
        "line 3: expected `source,target,weight`, found `2,3`"
    );
}

#[rstest]
#[case("1,1,1\n", GraphError::SelfLoop { vertex: VertexId::new(1) })]
#[case(
    "1,2,1\n2,1,-1\n",
    GraphError::DuplicateEdge { left: VertexId::new(1), right: VertexId::new(2) },
)]
#[case(
    "1,2,NaN\n",
    GraphError::NonFiniteWeight { left: VertexId::new(1), right: VertexId::new(2) },
)]
fn graph_rejections_carry_the_line(#[case] raw: &str, #[case] expected: GraphError) {
    let err = EdgeListProvider::try_from_reader("rejected", Cursor::new(raw))
        .expect_err("graph rejects the edge");
    match err {
        EdgeListError::Graph { line, source } => {
            assert_eq!(line, raw.lines().count());
            assert_eq!(source, expected);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[rstest]
fn reader_failures_propagate() {
    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("boom"))
        }
    }

    impl BufRead for FailingReader {
        fn fill_buf(&mut self) -> std::io::Result<&[u8]> {
            Err(std::io::Error::other("boom"))
        }

        fn consume(&mut self, _amt: usize) {}
    }

    let err = EdgeListProvider::try_from_reader("failing", FailingReader)
        .expect_err("reader fails");
    assert!(matches!(err, EdgeListError::Io(_)));
}
