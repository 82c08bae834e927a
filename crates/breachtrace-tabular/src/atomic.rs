//! Atomic write operations for output artifacts.
//!
//! Data is first written to a sibling file with a `.tmp` extension, flushed,
//! and then renamed over the target. Renames within one filesystem are atomic
//! on POSIX systems, so the target is either the old file or the complete new
//! one. A failed write may leave the temporary file behind; the target is
//! never left partially written.

use crate::{Error, Result};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically replaces the file at `path` with `contents`.
///
/// # Errors
///
/// Returns an error if the temporary file cannot be created or written, or
/// if the rename fails (e.g., across filesystems).
///
/// # Examples
///
/// ```no_run
/// use breachtrace_tabular::write_atomic;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// write_atomic("investigation_log.txt", b"Processing user: U1")?;
/// # Ok(())
/// # }
/// ```
pub fn write_atomic<P: AsRef<Path>>(path: P, contents: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let temp_path = make_temp_path(path);

    if let Err(e) = write_to_temp_file(&temp_path, contents) {
        // Best-effort cleanup of temp file
        let _ = std::fs::remove_file(&temp_path);
        return Err(e);
    }

    std::fs::rename(&temp_path, path)?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "Wrote file");
    Ok(())
}

/// Serializes `rows` as CSV into memory, with a header row derived from the
/// field names of `T`.
///
/// # Errors
///
/// Returns [`Error::CsvWrite`] if a row fails to serialize.
pub fn to_csv_bytes<T, I>(rows: I) -> Result<Vec<u8>>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row).map_err(Error::CsvWrite)?;
    }
    writer
        .into_inner()
        .map_err(|e| Error::Io(e.into_error()))
}

/// Atomically writes `rows` as CSV to `path`. See [`to_csv_bytes`].
///
/// # Errors
///
/// Returns [`Error::CsvWrite`] if a row fails to serialize, or any error from
/// [`write_atomic`].
pub fn write_csv_atomic<T, I, P>(path: P, rows: I) -> Result<()>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
    P: AsRef<Path>,
{
    let buffer = to_csv_bytes(rows)?;
    write_atomic(path, &buffer)
}

/// Creates the temporary path used during an atomic write.
///
/// `.tmp` is appended to the existing extension, or used as the extension
/// when there is none.
fn make_temp_path(path: &Path) -> PathBuf {
    let mut temp_path = path.to_path_buf();
    let new_extension = match path.extension() {
        Some(ext) => {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".tmp");
            new_ext
        }
        None => std::ffi::OsString::from("tmp"),
    };
    temp_path.set_extension(new_extension);
    temp_path
}

fn write_to_temp_file(temp_path: &Path, contents: &[u8]) -> Result<()> {
    let mut file = File::create(temp_path)?;
    file.write_all(contents)?;
    file.sync_all()?;
    Ok(())
}
