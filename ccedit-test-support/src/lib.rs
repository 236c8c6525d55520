//! Shared test utilities used across ccedit crates.

pub mod ci;
pub mod tracing;
