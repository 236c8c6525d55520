//! Small helpers shared across CLI tests.

use std::{
    fs::File,
    io::{self, Write},
    path::PathBuf,
};

use tempfile::TempDir;

use super::{Cli, CliError, Command, ModeArg, SolveCommand, run_cli};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn create_edge_list(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

/// `solve` with default options for `path`.
pub(super) fn solve(path: PathBuf) -> SolveCommand {
    SolveCommand {
        path,
        threshold: 0.5,
        mode: ModeArg::Relaxed,
        solver_timeout_secs: None,
        clusters_out: None,
        name: None,
    }
}

pub(super) fn run_cli_expecting_error(command: Command, panic_msg: &str) -> CliError {
    match run_cli(Cli { command }) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
