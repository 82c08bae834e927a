//! Result hand-off for external formatting and persistence.
//!
//! [`ResultSink`] wraps a finished [`Analysis`] and only reads from it.

use crate::error::{Error, Result};
use crate::propagation::Analysis;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Metric name of the affected-user count in the summary.
pub const TOTAL_AFFECTED_USERS: &str = "Total Affected Users";

/// Metric name of the affected-computer count in the summary.
pub const TOTAL_AFFECTED_COMPUTERS: &str = "Total Affected Computers";

/// One row of the key/value summary table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    /// Metric name
    #[serde(rename = "Metric")]
    pub metric: &'static str,
    /// Metric value
    #[serde(rename = "Value")]
    pub value: usize,
}

/// Where [`ResultSink::save`] writes its artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Trace text file
    pub investigation_log: PathBuf,
    /// Summary CSV file
    pub analysis_summary: PathBuf,
}

/// Read-only view over a finished analysis.
#[derive(Debug, Clone)]
pub struct ResultSink {
    analysis: Analysis,
}

impl From<Analysis> for ResultSink {
    fn from(analysis: Analysis) -> Self {
        Self { analysis }
    }
}

impl ResultSink {
    /// Wrap a finished analysis.
    #[must_use]
    pub fn new(analysis: Analysis) -> Self {
        Self { analysis }
    }

    /// The underlying analysis.
    #[must_use]
    pub fn analysis(&self) -> &Analysis {
        &self.analysis
    }

    /// Trace lines in emission order.
    #[must_use]
    pub fn trace_lines(&self) -> Vec<String> {
        self.analysis.log().lines()
    }

    /// Trace lines joined by newlines, without a trailing newline.
    #[must_use]
    pub fn trace_text(&self) -> String {
        self.trace_lines().join("\n")
    }

    /// Number of affected users.
    #[must_use]
    pub fn affected_user_count(&self) -> usize {
        self.analysis.affected_users().len()
    }

    /// Number of affected computers.
    #[must_use]
    pub fn affected_computer_count(&self) -> usize {
        self.analysis.affected_computers().len()
    }

    /// The two-row summary table.
    #[must_use]
    pub fn summary(&self) -> [SummaryRow; 2] {
        [
            SummaryRow {
                metric: TOTAL_AFFECTED_USERS,
                value: self.affected_user_count(),
            },
            SummaryRow {
                metric: TOTAL_AFFECTED_COMPUTERS,
                value: self.affected_computer_count(),
            },
        ]
    }

    /// Write the trace and the summary CSV.
    ///
    /// Both files are replaced atomically. The summary is serialized before
    /// anything is written. If the summary file cannot be written, the trace
    /// written by this call is removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Save`] naming the file that could not be written.
    pub fn save(&self, paths: &OutputPaths) -> Result<()> {
        let log_path = &paths.investigation_log;
        let summary_path = &paths.analysis_summary;
        let summary = breachtrace_tabular::to_csv_bytes(self.summary())
            .map_err(|source| save_error(summary_path, source))?;

        breachtrace_tabular::write_atomic(log_path, self.trace_text().as_bytes())
            .map_err(|source| save_error(log_path, source))?;

        if let Err(source) = breachtrace_tabular::write_atomic(summary_path, &summary) {
            // Best-effort removal of the trace written above
            let _ = std::fs::remove_file(log_path);
            return Err(save_error(summary_path, source));
        }

        tracing::info!(
            log = %log_path.display(),
            summary = %summary_path.display(),
            "Saved investigation results"
        );
        Ok(())
    }
}

fn save_error(path: &Path, source: breachtrace_tabular::Error) -> Error {
    Error::Save {
        path: path.to_path_buf(),
        source,
    }
}
