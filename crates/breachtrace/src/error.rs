//! Error types for breachtrace operations.

use crate::domain::Dataset;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The error type for breachtrace operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A required field was missing or blank while building the index.
    ///
    /// Raised before any traversal runs; no partial index exists.
    #[error("malformed {dataset} record at row {row}: missing or empty `{field}`")]
    MalformedRecord {
        /// Dataset the row belongs to
        dataset: Dataset,
        /// 1-based record number within the dataset
        row: usize,
        /// Name of the offending field
        field: &'static str,
    },

    /// An input file could not be read or decoded.
    #[error("failed to load {dataset} records from {}", .path.display())]
    Load {
        /// Dataset being loaded
        dataset: Dataset,
        /// Path of the input file
        path: PathBuf,
        /// Underlying reader error
        #[source]
        source: breachtrace_tabular::Error,
    },

    /// Writing an output artifact failed.
    #[error("failed to write {}", .path.display())]
    Save {
        /// Path of the output file
        path: PathBuf,
        /// Underlying writer error
        #[source]
        source: breachtrace_tabular::Error,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// A specialized Result type for breachtrace operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_record_display_names_dataset_row_and_field() {
        let err = Error::MalformedRecord {
            dataset: Dataset::Access,
            row: 12,
            field: "affected_user_id",
        };
        let display = err.to_string();
        assert!(display.contains("access"));
        assert!(display.contains("row 12"));
        assert!(display.contains("affected_user_id"));
    }

    #[test]
    fn load_error_exposes_source() {
        let err = Error::Load {
            dataset: Dataset::Activity,
            path: PathBuf::from("activity_logs.csv"),
            source: breachtrace_tabular::Error::UnsupportedFormat(PathBuf::from("x")),
        };
        assert!(err.to_string().contains("activity_logs.csv"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
