//! Path management for jobtrack configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/jobtrack/          # Config directory (platform default)
//! └── config.toml              # Client configuration
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "jobtrack";
const CONFIG_FILE: &str = "config.toml";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Platform paths for jobtrack.
pub struct JobtrackPaths;

impl JobtrackPaths {
    /// Returns the jobtrack configuration directory (e.g. `~/.config/jobtrack/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path of `config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Self::config_dir().map(|dir| dir.join(CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_lives_in_app_dir() {
        if let Ok(path) = JobtrackPaths::config_file() {
            assert!(path.ends_with("jobtrack/config.toml"));
        }
    }
}
