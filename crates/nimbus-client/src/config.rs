//! Client configuration

use crate::{ClientError, Result};
use std::time::Duration;

/// Path prefix of every API route
pub const API_BASE_PATH: &str = "/api/v1";

/// Environment variable holding the service endpoint
pub const ENV_ENDPOINT: &str = "NIMBUS_ENDPOINT";
/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "NIMBUS_API_KEY";
/// Environment variable holding the request timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "NIMBUS_TIMEOUT_SECS";

/// Client configuration
#[derive(Clone)]
pub struct Config {
    /// Service endpoint URL, without the `/api/v1` suffix
    pub endpoint: String,
    /// API key sent as a bearer token
    pub api_key: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080".to_string(),
            api_key: None,
            timeout: Duration::from_secs(30),
            user_agent: format!("nimbus-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    /// Create a new config with the given endpoint
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// Build a config from `NIMBUS_ENDPOINT`, `NIMBUS_API_KEY` and
    /// `NIMBUS_TIMEOUT_SECS`, falling back to defaults for unset variables.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(endpoint) = std::env::var(ENV_ENDPOINT) {
            config.endpoint = endpoint;
        }
        if let Ok(key) = std::env::var(ENV_API_KEY) {
            config.api_key = Some(key);
        }
        if let Ok(secs) = std::env::var(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                ClientError::configuration(format!("{} must be a number of seconds, got {:?}", ENV_TIMEOUT_SECS, secs))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Set the API key
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Base URL for API requests: the endpoint plus `/api/v1`
    pub fn api_base(&self) -> String {
        format!("{}{}", self.endpoint.trim_end_matches('/'), API_BASE_PATH)
    }

    /// Reject endpoints that are not absolute http(s) URLs
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(ClientError::configuration("endpoint must not be empty"));
        }

        let url = url::Url::parse(&self.endpoint)
            .map_err(|e| ClientError::configuration(format!("invalid endpoint {:?}: {}", self.endpoint, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::configuration(format!(
                "unsupported endpoint scheme: {}",
                url.scheme()
            )));
        }

        if matches!(&self.api_key, Some(key) if key.is_empty()) {
            return Err(ClientError::configuration("API key must not be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.endpoint, "http://localhost:8080");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.api_key.is_none());
        assert!(config.user_agent.starts_with("nimbus-client/"));
    }

    #[test]
    fn test_api_base_strips_trailing_slash() {
        assert_eq!(Config::new("https://api.example.com/").api_base(), "https://api.example.com/api/v1");
        assert_eq!(Config::new("http://127.0.0.1:9000").api_base(), "http://127.0.0.1:9000/api/v1");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = Config::new("https://api.example.com").with_api_key("sk-live-secret");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("sk-live-secret"));
        assert!(printed.contains("[REDACTED]"));
        assert!(printed.contains("https://api.example.com"));

        assert!(format!("{:?}", Config::default()).contains("api_key: None"));
    }

    #[test]
    fn test_validate() {
        assert!(Config::new("https://api.example.com").with_api_key("k").validate().is_ok());
        assert!(Config::new("").validate().is_err());
        assert!(Config::new("not a url").validate().is_err());
        assert!(Config::new("ftp://files.example.com").validate().is_err());
        assert!(Config::new("http://localhost").with_api_key("").validate().is_err());
    }
}
