//! Integration tests for reading and writing tabular files on disk.

use breachtrace_tabular::{read_records, write_atomic, write_csv_atomic, Error};
use serde::{Deserialize, Serialize};
use std::fs;
use tempfile::TempDir;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct AccessRow {
    computer_id: String,
    affected_user_id: String,
    activity_type: String,
}

fn sample_rows() -> Vec<AccessRow> {
    vec![
        AccessRow {
            computer_id: "C1".to_string(),
            affected_user_id: "U2".to_string(),
            activity_type: "login".to_string(),
        },
        AccessRow {
            computer_id: "C1".to_string(),
            affected_user_id: "U3".to_string(),
            activity_type: "copy".to_string(),
        },
    ]
}

#[test]
fn reads_csv_file_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("access_logs.csv");
    fs::write(
        &path,
        "computer_id,affected_user_id,activity_type\nC1,U2,login\nC1,U3,copy\n",
    )
    .unwrap();

    let rows: Vec<AccessRow> = read_records(&path).unwrap();
    assert_eq!(rows, sample_rows());
}

#[test]
fn reads_jsonl_file_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("access_logs.jsonl");
    let body = sample_rows()
        .iter()
        .map(|r| serde_json::to_string(r).unwrap())
        .collect::<Vec<_>>()
        .join("\n");
    fs::write(&path, body).unwrap();

    let rows: Vec<AccessRow> = read_records(&path).unwrap();
    assert_eq!(rows, sample_rows());
}

#[test]
fn missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = read_records::<AccessRow, _>(dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn unsupported_extension_is_rejected_before_opening() {
    let dir = TempDir::new().unwrap();
    // The file does not exist; the extension check must fail first.
    let err = read_records::<AccessRow, _>(dir.path().join("access_logs.parquet")).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat(_)));
}

#[test]
fn csv_written_atomically_reads_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.csv");

    write_csv_atomic(&path, sample_rows()).unwrap();
    let rows: Vec<AccessRow> = read_records(&path).unwrap();

    assert_eq!(rows, sample_rows());
}

#[test]
fn write_atomic_overwrites_previous_output() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("investigation_log.txt");

    write_atomic(&path, b"first").unwrap();
    write_atomic(&path, b"second").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "second");
}
