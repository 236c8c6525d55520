//! Command-line interface for correlation clustering of edge-list graphs.
//!
//! `solve` runs the full pipeline and prints the clusters with their
//! disagreement score; `ultrametric` stops after rounding and prints the
//! ultrametric distances as an edge list.

mod commands;

pub use commands::{
    Cli, CliError, Command, CommandSummary, ModeArg, SolveCommand, SolveSummary,
    UltrametricCommand, UltrametricSummary, render_summary, run_cli,
};

#[cfg(test)]
mod test_helpers;
