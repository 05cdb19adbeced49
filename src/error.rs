//! Errors raised while loading the rental dataset.

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong turning a source file into a [`RentalTable`].
///
/// All variants are fatal at startup; there is nothing to retry.
///
/// [`RentalTable`]: crate::loader::RentalTable
#[derive(Error, Debug)]
pub enum LoadError {
    /// The source file does not exist.
    #[error("Dataset not found: {0}")]
    NotFound(PathBuf),

    /// The source file exists but could not be opened or read.
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV itself is malformed, or a row failed to deserialize.
    #[error("Malformed dataset: {0}")]
    Csv(#[from] csv::Error),

    /// The header row lacks one or more required columns.
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// A date cell could not be parsed as a calendar date.
    #[error("Invalid date {value:?} on line {line}")]
    InvalidDate { line: u64, value: String },

    /// A field parsed but holds a value outside its domain.
    #[error("Invalid {field} on line {line}: {reason}")]
    InvalidField {
        line: u64,
        field: &'static str,
        reason: String,
    },

    /// The source has a header but no data rows.
    #[error("Dataset contains no records")]
    NoRecords,
}
