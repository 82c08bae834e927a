//! Loading the input logs from disk into a [`LogIndex`].

use crate::domain::{Dataset, RawAccessRow, RawActivityRow};
use crate::error::{Error, Result};
use crate::index::LogIndex;
use std::path::Path;

/// Read both datasets and build the index.
///
/// Each file may be CSV or JSON Lines, chosen by extension.
///
/// # Errors
///
/// Returns [`Error::Load`] if a file cannot be read or decoded, and
/// [`Error::MalformedRecord`] if a row lacks a required field or holds a
/// non-string value in one. No index is
/// produced in either case.
pub fn load_index(activity_path: &Path, access_path: &Path) -> Result<LogIndex> {
    let activity: Vec<RawActivityRow> = read(Dataset::Activity, activity_path)?;
    let access: Vec<RawAccessRow> = read(Dataset::Access, access_path)?;
    LogIndex::build(&activity, &access)
}

fn read<T: serde::de::DeserializeOwned>(dataset: Dataset, path: &Path) -> Result<Vec<T>> {
    breachtrace_tabular::read_records(path).map_err(|source| Error::Load {
        dataset,
        path: path.to_path_buf(),
        source,
    })
}
