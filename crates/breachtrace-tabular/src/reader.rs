//! Record reading operations.
//!
//! Rows are decoded into any [`DeserializeOwned`] type. Columns that the
//! target type does not name are ignored, so callers can read a subset of a
//! wider export. Decoding stops at the first bad row: the whole read fails and
//! no records are returned. Values are never trimmed: `" C1 "` and `"C1"`
//! are different identifiers.

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Input file format, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Comma-separated values with a header row.
    Csv,
    /// One JSON object per line.
    Jsonl,
}

impl Format {
    /// Determines the format of `path` from its extension.
    ///
    /// `.csv` maps to [`Format::Csv`]; `.jsonl` and `.ndjson` map to
    /// [`Format::Jsonl`]. Matching is case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] for any other extension, or when
    /// the path has none.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase());
        match ext.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("jsonl" | "ndjson") => Ok(Self::Jsonl),
            _ => Err(Error::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Reads every record from the file at `path`.
///
/// The format is picked by [`Format::from_path`]. Records are returned in
/// file order.
///
/// # Errors
///
/// Returns an error if the format is unsupported, the file cannot be opened,
/// or any row fails to decode.
///
/// # Examples
///
/// ```no_run
/// use breachtrace_tabular::read_records;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Row {
///     user_id: String,
///     computer_id: String,
/// }
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let rows: Vec<Row> = read_records("activity_logs.csv")?;
/// # Ok(())
/// # }
/// ```
pub fn read_records<T, P>(path: P) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let format = Format::from_path(path)?;
    let file = File::open(path)?;

    let records = match format {
        Format::Csv => read_csv(file)?,
        Format::Jsonl => read_jsonl(BufReader::new(file))?,
    };

    tracing::debug!(
        path = %path.display(),
        ?format,
        records = records.len(),
        "Loaded records"
    );
    Ok(records)
}

/// Reads CSV records from `reader`.
///
/// The first row is the header. Every field is handed to the decoder as a
/// JSON string, so a value such as `7` stays the text `"7"` and both formats
/// decode through the same path. Rows may be shorter than the header; the
/// missing trailing columns are absent from the decoded row, which surfaces
/// as `None` for optional fields. Headers and fields are kept verbatim,
/// surrounding whitespace included.
///
/// # Errors
///
/// Returns [`Error::Csv`] if a row cannot be read (row 0 is the header), or
/// [`Error::CsvDecode`] with the 1-based data row if a row does not decode
/// into `T`.
pub fn read_csv<T, R>(reader: R) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|source| Error::Csv { row: 0, source })?
        .clone();

    let mut records = Vec::new();
    for (index, result) in csv_reader.records().enumerate() {
        let row = index + 1;
        let record = result.map_err(|source| Error::Csv { row, source })?;
        let object: Map<String, Value> = headers
            .iter()
            .zip(record.iter())
            .map(|(header, field)| (header.to_string(), Value::String(field.to_string())))
            .collect();
        let decoded = serde_json::from_value(Value::Object(object))
            .map_err(|source| Error::CsvDecode { row, source })?;
        records.push(decoded);
    }
    Ok(records)
}

/// Reads JSON Lines records from `reader`.
///
/// Lines that are empty after trimming are skipped but still counted, so
/// reported line numbers match the file.
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails, or [`Error::Json`] with the 1-based
/// line number on the first line that cannot be decoded.
pub fn read_jsonl<T, R>(reader: R) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    R: BufRead,
{
    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let record = serde_json::from_str(trimmed).map_err(|source| Error::Json {
            line: index + 1,
            source,
        })?;
        records.push(record);
    }
    Ok(records)
}
