//! Configuration for log output

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main instrumentation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentationConfig {
    /// Service name attached to log lines
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Log level filter (e.g., "info", "debug", "aula_http=trace")
    pub log_level: String,
    /// Optional file output in addition to stderr
    #[serde(default)]
    pub log_file: Option<LogFileConfig>,
}

/// File-based logging configuration
///
/// Log files roll over daily and are named `<file_prefix>.<date>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogFileConfig {
    /// Directory where log files should be written
    pub directory: PathBuf,
    /// Prefix for log file names
    pub file_prefix: String,
    /// Whether to also output logs to stderr
    pub console_enabled: bool,
}

impl Default for InstrumentationConfig {
    fn default() -> Self {
        Self {
            service_name: "aula".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl LogFileConfig {
    pub fn new(directory: impl Into<PathBuf>, file_prefix: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            file_prefix: file_prefix.into(),
            console_enabled: true,
        }
    }
}

impl InstrumentationConfig {
    /// Use `level` for every Aula crate
    pub fn with_level(level: &str) -> Self {
        Self {
            log_level: format!(
                "aula={level},aula_core={level},aula_http={level},aula_frontend_common={level}"
            ),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn log_to_file(mut self, file: LogFileConfig) -> Self {
        self.log_file = Some(file);
        self
    }
}
