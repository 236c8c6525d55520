//! Support library for the `ccedit` binary.
//!
//! Exposes the command and logging modules so doctests and integration tests
//! can drive the commands without spawning a subprocess.

pub mod cli;
pub mod logging;
