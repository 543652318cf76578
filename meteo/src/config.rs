//! Service configuration.

use crate::client::{ClientConfig, DEFAULT_TIMEOUT_SECS};
use crate::error::{MeteoError, Result};
use crate::service::MeteoService;

/// Environment variable holding the provider username.
pub const ENV_USER: &str = "MM_USER";
/// Environment variable holding the provider password.
pub const ENV_PASS: &str = "MM_PASS";
/// Environment variable overriding the provider base URL.
pub const ENV_BASE_URL: &str = "MM_BASE_URL";
/// Environment variable overriding the request timeout.
pub const ENV_TIMEOUT_SECS: &str = "MM_TIMEOUT_SECS";

/// Builder for [`MeteoService`].
///
/// # Example
///
/// ```ignore
/// use meteo::MeteoServiceBuilder;
///
/// let service = MeteoServiceBuilder::new("user", "pass")
///     .timeout_secs(30)
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct MeteoServiceBuilder {
    config: ClientConfig,
}

impl MeteoServiceBuilder {
    /// Create a new builder with the given credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            config: ClientConfig::new(username, password),
        }
    }

    /// Create a builder configured from environment variables.
    ///
    /// # Environment Variables
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `MM_USER` | Provider username | Required |
    /// | `MM_PASS` | Provider password | Required |
    /// | `MM_BASE_URL` | Provider base URL | `https://api.meteomatics.com` |
    /// | `MM_TIMEOUT_SECS` | Request timeout in seconds | 60 |
    ///
    /// # Errors
    ///
    /// Returns [`MeteoError::MissingCredentials`] if `MM_USER` or `MM_PASS`
    /// is unset or empty.
    pub fn from_env() -> Result<Self> {
        let username = required_var(ENV_USER)?;
        let password = required_var(ENV_PASS)?;

        let mut builder = Self::new(username, password);

        if let Ok(base_url) = std::env::var(ENV_BASE_URL) {
            if !base_url.trim().is_empty() {
                builder = builder.base_url(base_url.trim());
            }
        }

        let timeout_secs: u64 = std::env::var(ENV_TIMEOUT_SECS)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(builder.timeout_secs(timeout_secs))
    }

    /// Set the provider base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Set the per-request timeout.
    ///
    /// Default is 60 seconds.
    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.config.timeout_secs = timeout_secs;
        self
    }

    /// Set the `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// The connection settings accumulated so far.
    pub fn client_config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build the [`MeteoService`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn build(self) -> Result<MeteoService> {
        MeteoService::with_config(self.config)
    }
}

fn required_var(name: &'static str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(MeteoError::MissingCredentials { var: name }),
    }
}
