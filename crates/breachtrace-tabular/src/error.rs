//! Error types for breachtrace-tabular operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The error type for breachtrace-tabular operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred while reading or writing.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A CSV row could not be read.
    #[error("CSV error at row {row}: {source}")]
    Csv {
        /// 1-based data row, or 0 for the header.
        row: usize,
        /// Underlying reader error.
        #[source]
        source: csv::Error,
    },

    /// A CSV row was read but does not decode into the target type.
    #[error("CSV decode error at row {row}: {source}")]
    CsvDecode {
        /// 1-based data row (the header is not counted).
        row: usize,
        /// Underlying decoder error.
        #[source]
        source: serde_json::Error,
    },

    /// Writing CSV output failed.
    #[error("CSV write error: {0}")]
    CsvWrite(#[source] csv::Error),

    /// A JSON Lines entry could not be decoded.
    #[error("JSON error at line {line}: {source}")]
    Json {
        /// 1-based line number in the input file.
        line: usize,
        /// Underlying decoder error.
        #[source]
        source: serde_json::Error,
    },

    /// The file extension does not map to a known format.
    #[error("unsupported input format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

/// A specialized Result type for breachtrace-tabular operations.
pub type Result<T> = std::result::Result<T, Error>;
