//! Edge-list provider reading signed weighted graphs from delimited text.
//!
//! Each data line holds `source,target,weight`. Lines starting with `#` and
//! blank lines are skipped. When a line has no comma its fields may instead
//! be separated by tabs or spaces.

mod errors;
mod parse;
mod provider;

pub use crate::{errors::EdgeListError, provider::EdgeListProvider};
