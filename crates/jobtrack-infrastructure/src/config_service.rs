//! Configuration service implementation.
//!
//! Resolves the [`ClientConfig`] from, in order of priority:
//!
//! 1. Environment variables (`JOBTRACK_API_BASE_URL`, `JOBTRACK_TIMEOUT_SECS`,
//!    `JOBTRACK_LOG_LEVEL`)
//! 2. The configuration file (`~/.config/jobtrack/config.toml`)
//! 3. Built-in defaults

use crate::paths::JobtrackPaths;
use jobtrack_core::config::ClientConfig;
use jobtrack_core::error::{Result, TrackerError};
use std::path::{Path, PathBuf};

pub const ENV_API_BASE_URL: &str = "JOBTRACK_API_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "JOBTRACK_TIMEOUT_SECS";
pub const ENV_LOG_LEVEL: &str = "JOBTRACK_LOG_LEVEL";

/// Loads the client configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    /// Explicit config file; `None` means the platform default location.
    path: Option<PathBuf>,
}

impl ConfigService {
    /// Creates a service reading the default config file.
    pub fn new() -> Self {
        Self { path: None }
    }

    /// Creates a service reading a specific config file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Loads the configuration with environment overrides applied.
    pub fn load(&self) -> Result<ClientConfig> {
        let mut config = self.load_file()?;
        apply_overrides(&mut config, |key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Loads only the configuration file, falling back to defaults when it is missing.
    pub fn load_file(&self) -> Result<ClientConfig> {
        let path = match &self.path {
            Some(path) => path.clone(),
            None => match JobtrackPaths::config_file() {
                Ok(path) => path,
                Err(e) => {
                    tracing::debug!("[ConfigService] {}; using defaults", e);
                    return Ok(ClientConfig::default());
                }
            },
        };
        read_config_file(&path)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

fn read_config_file(path: &Path) -> Result<ClientConfig> {
    if !path.exists() {
        tracing::debug!(
            "[ConfigService] No config file at {}; using defaults",
            path.display()
        );
        return Ok(ClientConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| {
        TrackerError::config(format!("Invalid config file {}: {}", path.display(), e))
    })
}

/// Applies overrides looked up by environment variable name.
pub fn apply_overrides<F>(config: &mut ClientConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_API_BASE_URL).filter(|v| !v.trim().is_empty()) {
        config.api_base_url = url.trim().to_string();
    }
    if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
        config.request_timeout_secs = raw.trim().parse().map_err(|_| {
            TrackerError::config(format!("{} must be a whole number of seconds", ENV_TIMEOUT_SECS))
        })?;
    }
    if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|v| !v.trim().is_empty()) {
        config.log_level = level.trim().to_string();
    }
    Ok(())
}
