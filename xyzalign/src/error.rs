//! Error types for loading, aligning and saving point sets

use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions; every one of them aborts the run before output is written.
#[derive(Error, Debug)]
pub enum AlignError {
    /// Input file could not be opened
    #[error("'{}' not found", path.display())]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input file could be opened but not read
    #[error("failed to read '{}': {source}", path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed line in the input
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Point identifier outside `1..=count`
    #[error("atom {id} not in xyz file ({count} atoms)")]
    SelectionNotFound { id: usize, count: usize },

    /// Explicit selection with no identifiers
    #[error("selection must name at least one atom")]
    EmptySelection,

    /// Selection arguments that do not form a valid selection
    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    /// Transform argument with the wrong number of values
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Output destination could not be written
    #[error("write error for '{}': {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AlignError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        AlignError::Parse {
            line,
            message: message.into(),
        }
    }
}

pub type AlignResult<T> = Result<T, AlignError>;
