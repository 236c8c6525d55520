//! Command implementations and argument parsing for the `ccedit` CLI.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    time::Duration,
};

use ccedit_core::{
    CcError, ClusteringOutcome, CorrelationClustering, CorrelationClusteringBuilder,
    RelaxationMode, SignedGraph, UltrametricGraph,
};
use ccedit_providers_edgelist::{EdgeListError, EdgeListProvider};
use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

const DEFAULT_THRESHOLD: f64 = 0.5;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "ccedit",
    about = "Correlation clustering of signed graphs by LP relaxation."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Cluster a signed edge list and score the result.
    Solve(SolveCommand),
    /// Print the closest ultrametric of the relaxation as an edge list.
    Ultrametric(UltrametricCommand),
}

/// Relaxation mode accepted on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Continuous variables in `[0, 1]`.
    #[default]
    Relaxed,
    /// Binary variables.
    Integer,
}

impl From<ModeArg> for RelaxationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Relaxed => Self::Relaxed,
            ModeArg::Integer => Self::Integer,
        }
    }
}

/// Options accepted by the `solve` command.
#[derive(Debug, Args, Clone)]
pub struct SolveCommand {
    /// Path to a `source,target,weight` edge list.
    pub path: PathBuf,

    /// Ultrametric distance at or below which two vertices share a cluster.
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f64,

    /// Variable domain of the linear program.
    #[arg(long, value_enum, default_value_t = ModeArg::Relaxed)]
    pub mode: ModeArg,

    /// Abort the solve after this many seconds.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub solver_timeout_secs: Option<u64>,

    /// Also write the cluster listing to this file.
    #[arg(long)]
    pub clusters_out: Option<PathBuf>,

    /// Override name for the graph (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,
}

/// Options accepted by the `ultrametric` command.
#[derive(Debug, Args, Clone)]
pub struct UltrametricCommand {
    /// Path to a `source,target,weight` edge list.
    pub path: PathBuf,

    /// Abort the solve after this many seconds.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub solver_timeout_secs: Option<u64>,

    /// Override name for the graph (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Writing an output file failed.
    #[error("failed to write `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The edge list could not be read.
    #[error(transparent)]
    EdgeList(#[from] EdgeListError),
    /// The clustering pipeline failed.
    #[error(transparent)]
    Core(#[from] CcError),
}

/// Outcome of a `solve` run.
#[derive(Debug, Clone)]
pub struct SolveSummary {
    /// Name of the clustered graph.
    pub graph: String,
    /// Number of vertices in the input.
    pub vertices: usize,
    /// Number of edges in the input.
    pub edges: usize,
    /// Relaxation mode used.
    pub mode: RelaxationMode,
    /// Threshold used for extraction.
    pub threshold: f64,
    /// Clusters and scores.
    pub outcome: ClusteringOutcome,
}

/// Outcome of an `ultrametric` run.
#[derive(Debug, Clone)]
pub struct UltrametricSummary {
    /// Name of the rounded graph.
    pub graph: String,
    /// Closest ultrametric of the relaxation.
    pub ultrametric: UltrametricGraph,
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub enum CommandSummary {
    /// Result of `solve`.
    Solve(SolveSummary),
    /// Result of `ultrametric`.
    Ultrametric(UltrametricSummary),
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading the graph, running the pipeline, or
/// writing the cluster listing fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use ccedit_cli::cli::{Cli, Command, CommandSummary, ModeArg, SolveCommand, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "1,2,1\n3,4,1\n2,3,-1\n")?;
/// let cli = Cli {
///     command: Command::Solve(SolveCommand {
///         path: file.path().to_path_buf(),
///         threshold: 0.5,
///         mode: ModeArg::Relaxed,
///         solver_timeout_secs: None,
///         clusters_out: None,
///         name: Some("cliques".into()),
///     }),
/// };
/// let CommandSummary::Solve(summary) = run_cli(cli)? else {
///     panic!("solve returns a solve summary");
/// };
/// assert_eq!(summary.outcome.partition().cluster_count(), 2);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<CommandSummary, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Solve(solve) => {
            span.record("command", field::display("solve"));
            run_solve(solve).map(CommandSummary::Solve)
        }
        Command::Ultrametric(ultrametric) => {
            span.record("command", field::display("ultrametric"));
            run_ultrametric(ultrametric).map(CommandSummary::Ultrametric)
        }
    }
}

#[instrument(
    name = "cli.solve",
    err,
    skip(command),
    fields(path = %command.path.display(), threshold = command.threshold, mode = field::Empty),
)]
pub(super) fn run_solve(command: SolveCommand) -> Result<SolveSummary, CliError> {
    let SolveCommand {
        path,
        threshold,
        mode,
        solver_timeout_secs,
        clusters_out,
        name,
    } = command;
    let mode = RelaxationMode::from(mode);
    Span::current().record("mode", field::display(mode));

    let clustering = build_clustering(
        CorrelationClusteringBuilder::new()
            .with_threshold(threshold)
            .with_mode(mode),
        solver_timeout_secs,
    )?;
    let (graph_name, graph) = load_graph(&path, name.as_deref())?;
    let outcome = clustering.run(&graph)?;
    if let Some(out) = clusters_out {
        write_clusters(&out, &outcome)?;
    }

    info!(
        graph = graph_name.as_str(),
        clusters = outcome.partition().cluster_count(),
        disagreement = outcome.disagreement(),
        "solve completed"
    );
    Ok(SolveSummary {
        graph: graph_name,
        vertices: graph.vertex_count(),
        edges: graph.edge_count(),
        mode,
        threshold,
        outcome,
    })
}

#[instrument(
    name = "cli.ultrametric",
    err,
    skip(command),
    fields(path = %command.path.display()),
)]
pub(super) fn run_ultrametric(
    command: UltrametricCommand,
) -> Result<UltrametricSummary, CliError> {
    let UltrametricCommand {
        path,
        solver_timeout_secs,
        name,
    } = command;
    let clustering = build_clustering(CorrelationClusteringBuilder::new(), solver_timeout_secs)?;
    let (graph_name, graph) = load_graph(&path, name.as_deref())?;
    let ultrametric = clustering.ultrametric(&graph)?;
    info!(
        graph = graph_name.as_str(),
        clamped_edges = ultrametric.clamped_edges(),
        "ultrametric completed"
    );
    Ok(UltrametricSummary {
        graph: graph_name,
        ultrametric,
    })
}

fn build_clustering(
    builder: CorrelationClusteringBuilder,
    solver_timeout_secs: Option<u64>,
) -> Result<CorrelationClustering, CliError> {
    let builder = match solver_timeout_secs {
        Some(secs) => builder.with_solver_time_limit(Duration::from_secs(secs)),
        None => builder,
    };
    Ok(builder.build()?)
}

#[instrument(name = "cli.load_graph", err, skip(override_name), fields(graph = field::Empty))]
pub(super) fn load_graph(
    path: &Path,
    override_name: Option<&str>,
) -> Result<(String, SignedGraph), CliError> {
    let name = derive_graph_name(path, override_name);
    Span::current().record("graph", field::display(&name));
    let provider = EdgeListProvider::try_from_path(name, path)?;
    info!(
        vertices = provider.graph().vertex_count(),
        edges = provider.graph().edge_count(),
        "edge list loaded"
    );
    let name = provider.name().to_owned();
    Ok((name, provider.into_graph()))
}

pub(super) fn derive_graph_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| "graph".to_owned(), ToOwned::to_owned)
}

fn write_clusters(path: &Path, outcome: &ClusteringOutcome) -> Result<(), CliError> {
    let io_error = |source| CliError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_error)?;
    outcome
        .partition()
        .write_listing(BufWriter::new(file))
        .map_err(io_error)
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// `solve` prints a header of scores followed by the `#Cluster: <n>`
/// listing; `ultrametric` prints one `source,target,distance` line per pair.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &CommandSummary, mut writer: impl Write) -> io::Result<()> {
    match summary {
        CommandSummary::Solve(solve) => {
            let outcome = &solve.outcome;
            writeln!(writer, "graph: {}", solve.graph)?;
            writeln!(writer, "vertices: {}", solve.vertices)?;
            writeln!(writer, "edges: {}", solve.edges)?;
            writeln!(writer, "mode: {}", solve.mode)?;
            writeln!(writer, "threshold: {}", solve.threshold)?;
            writeln!(writer, "relaxation objective: {}", outcome.relaxation_objective())?;
            writeln!(writer, "disagreement: {}", outcome.disagreement())?;
            writeln!(writer, "clamped edges: {}", outcome.clamped_edges())?;
            writeln!(writer, "clusters: {}", outcome.partition().cluster_count())?;
            outcome.partition().write_listing(&mut writer)
        }
        CommandSummary::Ultrametric(rounded) => {
            writeln!(writer, "# graph: {}", rounded.graph)?;
            for (a, b, distance) in rounded.ultrametric.pairs() {
                writeln!(writer, "{a},{b},{distance}")?;
            }
            Ok(())
        }
    }
}
