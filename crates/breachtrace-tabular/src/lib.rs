//! Typed record loading and crash-safe output writes for tabular log data.
//!
//! Input files are read into `serde`-deserialized rows, either from CSV
//! (header row required) or from JSON Lines. Output files are written with
//! the temp-file-then-rename pattern so a reader never observes a
//! half-written artifact.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod atomic;
pub mod error;
pub mod reader;

pub use atomic::{to_csv_bytes, write_atomic, write_csv_atomic};
pub use error::{Error, Result};
pub use reader::{read_records, Format};
