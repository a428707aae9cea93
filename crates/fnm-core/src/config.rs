//! Configuration for connecting to a FastNetMon appliance.
//!
//! The appliance API listens on a plain host:port with HTTP basic
//! authentication; everything a client needs is collected here and
//! validated before a connection is opened.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;
use validator::Validate;

use crate::client::APPLIANCE_DEFAULT_TIMEOUT;
use crate::error::Error;

/// Connection settings for a FastNetMon appliance.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApplianceConfig {
    /// Appliance hostname or IP address.
    #[validate(length(min = 1, message = "host must not be empty"))]
    pub host: String,

    /// Appliance API port.
    #[validate(range(min = 1))]
    pub port: u16,

    /// Basic-auth username.
    #[validate(length(min = 1, message = "username must not be empty"))]
    pub username: String,

    /// Basic-auth password, never serialized.
    #[serde(skip_serializing)]
    pub password: SecretString,

    /// Request timeout in seconds.
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

const fn default_request_timeout_secs() -> u64 {
    APPLIANCE_DEFAULT_TIMEOUT
}

impl ApplianceConfig {
    /// Create a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when a field fails validation.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: impl Into<SecretString>,
    ) -> Result<Self, Error> {
        let config = Self {
            host: host.into(),
            port,
            username: username.into(),
            password: password.into(),
            request_timeout_secs: default_request_timeout_secs(),
        };

        config
            .validate()
            .map_err(|e| Error::Config(format!("Invalid configuration: {e}")))?;

        Ok(config)
    }

    /// Set the request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Build the appliance base URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEndpoint`] when host and port do not form a
    /// valid URL.
    pub fn base_url(&self) -> Result<Url, Error> {
        Url::parse(&format!("http://{}:{}", self.host, self.port)).map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn config() -> ApplianceConfig {
        ApplianceConfig::new("fnm.example.com", 10007, "admin", "secret").unwrap()
    }

    #[test]
    fn valid_config_builds() {
        let config = config();
        assert_eq!(config.host, "fnm.example.com");
        assert_eq!(config.port, 10007);
        assert_eq!(config.username, "admin");
        assert_eq!(config.password.expose_secret(), "secret");
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn empty_host_is_rejected() {
        let err = ApplianceConfig::new("", 10007, "admin", "secret").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn empty_username_is_rejected() {
        let err = ApplianceConfig::new("fnm.example.com", 10007, "", "secret").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn base_url_includes_host_and_port() {
        let url = config().base_url().unwrap();
        assert_eq!(url.as_str(), "http://fnm.example.com:10007/");
    }

    #[test]
    fn with_timeout_overrides_default() {
        let config = config().with_timeout(5);
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn password_is_not_serialized() {
        let json = serde_json::to_string(&config()).unwrap();
        assert!(!json.contains("secret"));
        assert!(json.contains("fnm.example.com"));
    }
}
