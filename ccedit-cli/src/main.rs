//! Entry point of the `ccedit` binary.
//!
//! Logging comes up first, then the command runs and its summary is written
//! to stdout. Failures are logged with their stable error codes and mapped
//! to a process exit status.

use std::{
    io::{self, BufWriter, Write},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::Parser;
use ccedit_core::CcError;
use tracing::{error, field};

use ccedit_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging::{self, LoggingError},
};

/// Exit status for failures inside the clustering pipeline.
const PIPELINE_FAILURE: u8 = 2;
/// Exit status for unreadable or malformed input.
const INPUT_FAILURE: u8 = 3;

fn try_main() -> Result<()> {
    let summary = run_cli(Cli::parse()).context("failed to execute command")?;
    let mut out = BufWriter::new(io::stdout().lock());
    render_summary(&summary, &mut out).context("failed to write summary")?;
    out.flush().context("failed to flush stdout")
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let cause = err.downcast_ref::<CliError>();
            log_failure(&err, cause);
            exit_code(cause)
        }
    }
}

fn log_failure(err: &anyhow::Error, cause: Option<&CliError>) {
    let pipeline = match cause {
        Some(CliError::Core(pipeline)) => Some(pipeline),
        _ => None,
    };
    error!(
        error = %err,
        code = pipeline.map(|pipeline| field::display(pipeline.code().as_str())),
        graph_code = pipeline
            .and_then(CcError::graph_code)
            .map(|code| field::display(code.as_str())),
        solver_code = pipeline
            .and_then(CcError::solver_code)
            .map(|code| field::display(code.as_str())),
        "command execution failed"
    );
}

fn exit_code(cause: Option<&CliError>) -> ExitCode {
    match cause {
        Some(CliError::Core(_)) => ExitCode::from(PIPELINE_FAILURE),
        Some(CliError::EdgeList(_)) => ExitCode::from(INPUT_FAILURE),
        _ => ExitCode::FAILURE,
    }
}

#[expect(
    clippy::print_stderr,
    reason = "tracing is not available until logging initialises"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialise logging: {err}");
}
