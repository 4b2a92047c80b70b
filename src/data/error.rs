//! Data loading error types
//!
//! Every error here is fatal for the dataset: the table is either loaded
//! completely or not at all.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the sales table
#[derive(Error, Debug)]
pub enum LoadError {
    /// Source file could not be opened or inspected
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The delimited structure itself is broken (bad quoting, ragged rows, bad UTF-8)
    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row
    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    /// A cell that must be numeric could not be parsed
    #[error("Line {line}: invalid {column} value {value:?}")]
    InvalidValue {
        line: u64,
        column: &'static str,
        value: String,
    },

    /// Cache lock was poisoned by a panicking reader or writer
    #[error("Lock error: {0}")]
    Lock(String),
}

/// Result type alias for data loading
pub type LoadResult<T> = Result<T, LoadError>;
