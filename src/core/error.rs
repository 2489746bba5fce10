//! Errors surfaced to callers of the inspector.
//!
//! Unencodable characters are report data and detector failures are
//! recovered internally, so neither appears here.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InspectError {
    /// Nothing but whitespace was supplied.
    #[error("Please enter text to convert")]
    EmptyInput,

    #[error("{} is {size} bytes; files up to {limit} bytes can be inspected", path.display())]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{0}")]
    Unexpected(String),
}

impl InspectError {
    /// Whether this is the "nothing to do" condition rather than a failure.
    pub fn is_empty_input(&self) -> bool {
        matches!(self, InspectError::EmptyInput)
    }
}
