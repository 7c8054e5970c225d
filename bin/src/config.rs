//! Settings file for the laborstat CLI.
//!
//! Command-line flags win over the `BLS_API_KEY` environment variable (clap
//! handles both), which win over `config.json` in the platform config
//! directory, which wins over built-in defaults.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Contents of `config.json`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct FileConfig {
    /// BLS registration key.
    pub(crate) api_key: Option<String>,
    /// Override for the API base URL.
    pub(crate) base_url: Option<String>,
    /// Default years per request.
    pub(crate) max_span: Option<u32>,
    /// Ask BLS for annual averages of sub-annual series.
    pub(crate) annual_average: Option<bool>,
}

impl FileConfig {
    /// Default location of the config file.
    pub(crate) fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "laborstat").map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Loads the config file at `path`. A missing file yields the defaults.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file");
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Loads `path` if given, otherwise the file at the default location.
    pub(crate) fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::default_path().map_or_else(|| Ok(Self::default()), |p| Self::load(&p)),
        }
    }

    /// Returns the flag or environment value if set, else the file's key.
    pub(crate) fn api_key(&self, from_cli: Option<String>) -> Option<String> {
        from_cli
            .or_else(|| self.api_key.clone())
            .filter(|key| !key.trim().is_empty())
    }
}
