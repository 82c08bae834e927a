//! End-to-end run: load, analyze, save.

use crate::config::Settings;
use crate::error::Result;
use crate::ingest::load_index;
use crate::propagation::analyze;
use crate::sink::ResultSink;

/// Run one investigation with `settings` and persist its artifacts.
///
/// The index is fully built before the traversal starts; a malformed input
/// aborts the run without writing any output.
///
/// # Errors
///
/// Returns an error if the inputs cannot be loaded or validated, or if an
/// output file cannot be written.
pub fn run(settings: &Settings) -> Result<ResultSink> {
    let index = load_index(&settings.activity_logs, &settings.access_logs)?;
    let seed = settings.seed();

    tracing::info!(seed = %seed, "Starting compromise analysis");
    let sink = ResultSink::new(analyze(&index, &seed));
    sink.save(&settings.output_paths())?;

    Ok(sink)
}
