//! Breachtrace CLI - blast-radius analysis for a suspicious user.
//!
//! Reads `activity_logs.csv` and `access_logs.csv` from the working directory,
//! traces compromise propagation from user `U1`, and writes
//! `investigation_log.txt` and `analysis_summary.csv`. A `breachtrace.yaml`
//! in the working directory overrides any of these.

use std::process::ExitCode;

use breachtrace::config::Settings;
use breachtrace::sink::ResultSink;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

/// Breachtrace: trace the blast radius of a compromised user account.
#[derive(Parser)]
#[command(name = "breachtrace")]
#[command(version, about, long_about = None)]
struct Cli {}

fn main() -> ExitCode {
    let _cli = Cli::parse();

    // Can be controlled via RUST_LOG environment variable
    // Example: RUST_LOG=breachtrace=debug cargo run
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("breachtrace=info,breachtrace_tabular=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let result = std::env::current_dir()
        .map_err(breachtrace::Error::from)
        .and_then(|dir| Settings::discover(&dir))
        .and_then(|settings| breachtrace::app::run(&settings).map(|sink| (settings, sink)));

    match result {
        Ok((settings, sink)) => {
            print_summary(&settings, &sink);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            // Show cause chain for nested errors
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                eprintln!("  {}: {cause}", "caused by".dimmed());
                source = std::error::Error::source(cause);
            }
            ExitCode::FAILURE
        }
    }
}

fn print_summary(settings: &Settings, sink: &ResultSink) {
    let file_name = |path: &std::path::Path| {
        path.file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
    };

    println!("\nFinal Summary:");
    println!("Total Affected Users: {}", sink.affected_user_count());
    println!("Total Affected Computers: {}", sink.affected_computer_count());
    println!("\nResults have been saved to:");
    println!(
        "- {} (detailed event log)",
        file_name(settings.investigation_log.as_path())
    );
    println!(
        "- {} (summary statistics)",
        file_name(settings.analysis_summary.as_path())
    );
}
