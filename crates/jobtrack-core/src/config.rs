//! Client configuration model.

use serde::{Deserialize, Serialize};

/// Default backend address, matching the development server.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
/// Default transport timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Default tracing filter.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Root configuration of the client, stored as `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the remote service, without a trailing slash.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Transport timeout applied to every request.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Tracing filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_timeout_secs(),
            log_level: default_log_level(),
        }
    }
}

impl ClientConfig {
    /// Base URL with any trailing slashes removed.
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ClientConfig = toml::from_str(r#"api_base_url = "https://jobs.example.com/""#).unwrap();
        assert_eq!(config.base_url(), "https://jobs.example.com");
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
    }
}
