//! CLI configuration: backend URL and data directory

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "aula.toml";
pub const SESSION_FILE_NAME: &str = "session.json";

const DEFAULT_API_URL: &str = "http://localhost:8000/api";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Base URL of the backend API, e.g. `https://school.example/api`
    pub api_url: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl CliConfig {
    /// Load defaults, then the optional file, then `AULA_*` variables
    pub fn load(path: &Path) -> Result<Self> {
        let defaults = Self::default();
        let settings = config::Config::builder()
            .set_default("api_url", defaults.api_url)?
            .add_source(config::File::from(path).required(false))
            .add_source(config::Environment::with_prefix("AULA"))
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        let config: Self = settings.try_deserialize()?;
        if config.api_url.trim().is_empty() {
            bail!("api_url must not be empty");
        }
        Ok(config)
    }

    /// Write this configuration as TOML, refusing to clobber an existing file
    pub fn write(&self, path: &Path, force: bool) -> Result<()> {
        if path.exists() && !force {
            bail!(
                "{} already exists, pass --force to overwrite it",
                path.display()
            );
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// `--data-dir`, else `AULA_STATE_DIR`, else the platform data directory
pub fn resolve_data_dir(data_dir: Option<PathBuf>) -> PathBuf {
    data_dir.unwrap_or_else(|| {
        if let Ok(state_dir) = std::env::var("AULA_STATE_DIR") {
            PathBuf::from(state_dir)
        } else {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("aula")
        }
    })
}
