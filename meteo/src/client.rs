//! Outbound HTTP client for the weather provider.
//!
//! [`MeteomaticsClient`] owns one `reqwest::Client` configured with the
//! provider base URL, credentials, timeout and default headers. It is built
//! once at startup and shared by every request; it holds no mutable state.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::Client;

use crate::error::{MeteoError, Result};

/// Default provider base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.meteomatics.com";

/// Default timeout for outbound requests in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default `User-Agent` sent with every request.
pub const DEFAULT_USER_AGENT: &str = "meteo-api/1.0";

/// A provider response, untouched.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body.
    pub body: Bytes,
}

impl RawResponse {
    /// The declared `Content-Type`, if present and valid ASCII.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
    }

    /// Whether the status is 400 or above.
    pub fn is_error(&self) -> bool {
        self.status >= 400
    }
}

/// Fetches raw resources from the provider.
///
/// Implementations issue exactly one request per call and do not interpret
/// the response.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// GET `path` relative to the provider base URL.
    async fn get_raw(&self, path: &str) -> std::result::Result<RawResponse, reqwest::Error>;
}

/// Connection settings for [`MeteomaticsClient`].
#[derive(Clone)]
pub struct ClientConfig {
    /// Provider base URL, without trailing slash.
    pub base_url: String,
    /// Provider username.
    pub username: String,
    /// Provider password.
    pub password: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a configuration with default base URL, timeout and user agent.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            username: username.into(),
            password: password.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Shared connection context for the Meteomatics API.
pub struct MeteomaticsClient {
    http: Client,
    config: ClientConfig,
}

impl MeteomaticsClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// [`MeteoError::ClientBuild`] if the TLS backend or client cannot be
    /// initialised.
    pub fn new(mut config: ClientConfig) -> Result<Self> {
        let trimmed = config.base_url.trim_end_matches('/').len();
        config.base_url.truncate(trimmed);

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(MeteoError::ClientBuild)?;

        Ok(Self { http, config })
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }
}

impl fmt::Debug for MeteomaticsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeteomaticsClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Upstream for MeteomaticsClient {
    async fn get_raw(&self, path: &str) -> std::result::Result<RawResponse, reqwest::Error> {
        let response = self
            .http
            .get(self.url_for(path))
            .basic_auth(&self.config.username, Some(&self.config.password))
            .send()
            .await?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client_for(base_url: String) -> MeteomaticsClient {
        let mut config = ClientConfig::new("alice", "s3cret");
        config.base_url = base_url;
        MeteomaticsClient::new(config).unwrap()
    }

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::new("u", "p");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.user_agent, "meteo-api/1.0");
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = ClientConfig::new("alice", "s3cret");
        let debug = format!("{:?}", config);
        assert!(debug.contains("alice"));
        assert!(!debug.contains("s3cret"));
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = client_for("http://localhost:1234/".to_string());
        assert_eq!(client.base_url(), "http://localhost:1234");
        assert_eq!(client.url_for("/now/t_2m:C"), "http://localhost:1234/now/t_2m:C");
    }

    #[tokio::test]
    async fn test_get_raw_sends_credentials_and_path() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/now/t_2m:C/50.0,5.0_45.0,10.0:0.5,0.5/png")
                    .header("authorization", "Basic YWxpY2U6czNjcmV0")
                    .header("user-agent", "meteo-api/1.0");
                then.status(200)
                    .header("content-type", "image/png")
                    .body(vec![0x89, b'P', b'N', b'G']);
            })
            .await;

        let client = client_for(server.base_url());
        let raw = client
            .get_raw("/now/t_2m:C/50.0,5.0_45.0,10.0:0.5,0.5/png")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(raw.status, 200);
        assert_eq!(raw.content_type(), Some("image/png"));
        assert_eq!(raw.body.as_ref(), &[0x89, b'P', b'N', b'G']);
        assert!(!raw.is_error());
    }

    #[tokio::test]
    async fn test_get_raw_does_not_interpret_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/missing");
                then.status(404).body("not found");
            })
            .await;

        let client = client_for(server.base_url());
        let raw = client.get_raw("/missing").await.unwrap();

        assert_eq!(raw.status, 404);
        assert!(raw.is_error());
        assert_eq!(raw.body.as_ref(), b"not found");
    }

    #[tokio::test]
    async fn test_get_raw_connection_refused() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(format!("http://{}", addr));
        let err = client.get_raw("/now/t_2m:C").await.unwrap_err();
        assert!(err.is_connect() || err.is_request());
    }
}
