//! Integration tests for the breachtrace binary.
//!
//! Each test runs the binary in a fresh temporary working directory.

use rstest::{fixture, rstest};
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const ACTIVITY_CSV: &str = "user_id,computer_id\nU1,C1\nU2,C1\n";
const ACCESS_CSV: &str = "computer_id,affected_user_id,activity_type\nC1,U2,login\nC1,U3,copy\n";

fn run_in_dir(dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_breachtrace"))
        .current_dir(dir)
        .env("RUST_LOG", "off")
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute breachtrace")
}

/// A working directory holding the default input files.
#[fixture]
fn workspace() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp directory");
    fs::write(dir.path().join("activity_logs.csv"), ACTIVITY_CSV).unwrap();
    fs::write(dir.path().join("access_logs.csv"), ACCESS_CSV).unwrap();
    dir
}

#[rstest]
fn writes_trace_and_summary(workspace: TempDir) {
    let output = run_in_dir(workspace.path());
    assert!(
        output.status.success(),
        "breachtrace failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let log = fs::read_to_string(workspace.path().join("investigation_log.txt")).unwrap();
    assert_eq!(
        log,
        "Analysis started with suspicious user U1\n\
         Processing user: U1\n\
         User U1 accessed computer C1\n\
         Activities on computer C1:\n  \
         - login by user U2\n  \
         - copy by user U3\n\
         Computer C1 affected user U2\n\
         Computer C1 affected user U3\n\
         Processing user: U2\n\
         Processing user: U3"
    );

    let summary = fs::read_to_string(workspace.path().join("analysis_summary.csv")).unwrap();
    assert_eq!(
        summary,
        "Metric,Value\nTotal Affected Users,3\nTotal Affected Computers,1\n"
    );
}

#[rstest]
fn prints_final_summary(workspace: TempDir) {
    let output = run_in_dir(workspace.path());
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("Final Summary:"));
    assert!(stdout.contains("Total Affected Users: 3"));
    assert!(stdout.contains("Total Affected Computers: 1"));
    assert!(stdout.contains("- investigation_log.txt (detailed event log)"));
    assert!(stdout.contains("- analysis_summary.csv (summary statistics)"));
}

#[rstest]
fn stdout_is_plain_text_even_when_colour_is_forced(workspace: TempDir) {
    let output = Command::new(env!("CARGO_BIN_EXE_breachtrace"))
        .current_dir(workspace.path())
        .env("RUST_LOG", "off")
        .env_remove("NO_COLOR")
        .env("CLICOLOR_FORCE", "1")
        .output()
        .expect("Failed to execute breachtrace");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "\nFinal Summary:\n\
         Total Affected Users: 3\n\
         Total Affected Computers: 1\n\
         \nResults have been saved to:\n\
         - investigation_log.txt (detailed event log)\n\
         - analysis_summary.csv (summary statistics)\n"
    );
}

#[rstest]
fn malformed_row_fails_without_output(workspace: TempDir) {
    fs::write(
        workspace.path().join("access_logs.csv"),
        "computer_id,affected_user_id,activity_type\nC1,,login\n",
    )
    .unwrap();

    let output = run_in_dir(workspace.path());
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("malformed access record at row 1"));
    assert!(!workspace.path().join("investigation_log.txt").exists());
    assert!(!workspace.path().join("analysis_summary.csv").exists());
}

#[test]
fn missing_inputs_exit_non_zero() {
    let dir = TempDir::new().unwrap();
    let output = run_in_dir(dir.path());

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("activity_logs.csv"));
}

#[rstest]
fn config_file_overrides_seed(workspace: TempDir) {
    fs::write(workspace.path().join("breachtrace.yaml"), "seed: U3\n").unwrap();

    let output = run_in_dir(workspace.path());
    assert!(output.status.success());

    let log = fs::read_to_string(workspace.path().join("investigation_log.txt")).unwrap();
    assert_eq!(
        log,
        "Analysis started with suspicious user U3\nProcessing user: U3"
    );
}

#[test]
fn help_lists_no_custom_flags() {
    let output = Command::new(env!("CARGO_BIN_EXE_breachtrace"))
        .arg("--help")
        .output()
        .expect("Failed to execute breachtrace");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--help"));
    assert!(stdout.contains("--version"));
}

#[test]
fn unknown_flag_is_rejected() {
    let output = Command::new(env!("CARGO_BIN_EXE_breachtrace"))
        .arg("--seed")
        .output()
        .expect("Failed to execute breachtrace");

    assert!(!output.status.success());
}
