//! Configuration for a breachtrace run.
//!
//! The binary takes no flags. It looks for [`CONFIG_FILE_NAME`] in the working
//! directory and falls back to the built-in defaults for anything the file
//! leaves out (or for everything, when there is no file).

use crate::domain::UserId;
use crate::error::{Error, Result};
use crate::sink::OutputPaths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Optional configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "breachtrace.yaml";

/// Default suspicious user.
pub const DEFAULT_SEED: &str = "U1";

/// Run settings.
///
/// Relative paths are resolved against the directory passed to
/// [`Settings::discover`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
    /// Identity the traversal starts from
    pub seed: String,

    /// Access records (computer → user)
    pub access_logs: PathBuf,

    /// Activity records (user → computer)
    pub activity_logs: PathBuf,

    /// Trace output
    pub investigation_log: PathBuf,

    /// Summary output
    pub analysis_summary: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED.to_string(),
            access_logs: PathBuf::from("access_logs.csv"),
            activity_logs: PathBuf::from("activity_logs.csv"),
            investigation_log: PathBuf::from("investigation_log.txt"),
            analysis_summary: PathBuf::from("analysis_summary.csv"),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, or [`Error::Config`] if
    /// it is not valid settings YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    /// Load settings for a run in `dir`.
    ///
    /// Uses `dir/breachtrace.yaml` when present, the defaults otherwise, and
    /// resolves every relative path against `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be loaded,
    /// or names an empty seed.
    pub fn discover(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        let settings = if config_path.is_file() {
            tracing::debug!(path = %config_path.display(), "Loading configuration");
            Self::load(&config_path)?
        } else {
            Self::default()
        };

        if settings.seed.is_empty() {
            return Err(Error::Config("seed must not be empty".to_string()));
        }
        Ok(settings.resolve(dir))
    }

    /// The seed identity, taken verbatim like the identifiers in the logs.
    #[must_use]
    pub fn seed(&self) -> UserId {
        UserId::new(self.seed.as_str())
    }

    /// Output artifact locations.
    #[must_use]
    pub fn output_paths(&self) -> OutputPaths {
        OutputPaths {
            investigation_log: self.investigation_log.clone(),
            analysis_summary: self.analysis_summary.clone(),
        }
    }

    fn resolve(self, dir: &Path) -> Self {
        Self {
            access_logs: dir.join(self.access_logs),
            activity_logs: dir.join(self.activity_logs),
            investigation_log: dir.join(self.investigation_log),
            analysis_summary: dir.join(self.analysis_summary),
            ..self
        }
    }
}
