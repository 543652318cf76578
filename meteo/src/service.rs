//! Query translation and forwarding.
//!
//! [`MeteoService`] validates a query, builds the provider path, performs a
//! single outbound GET and classifies the outcome. All validation runs before
//! any I/O; nothing is retried.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;

use crate::client::{ClientConfig, MeteomaticsClient, Upstream};
use crate::error::{MeteoError, Result};
use crate::request::{GridRequest, TimeSeriesRequest};

/// Content type returned when the provider does not declare one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A successful provider payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    /// Response body, relayed verbatim.
    pub body: Bytes,
    /// Content type declared by the provider, or [`DEFAULT_CONTENT_TYPE`].
    pub content_type: String,
}

/// Gateway core: validates queries and forwards them to the provider.
///
/// Cloning is cheap; clones share the same connection context.
///
/// # Example
///
/// ```ignore
/// use meteo::{MeteoServiceBuilder, TimeSeriesRequest};
///
/// let service = MeteoServiceBuilder::new("user", "pass").build()?;
/// let req = TimeSeriesRequest::new(40.0, -3.0, "2024-01-01T00:00:00Z", "2024-01-01T12:00:00Z");
/// let payload = service.timeseries(&req).await?;
/// println!("{} bytes of {}", payload.body.len(), payload.content_type);
/// ```
#[derive(Clone)]
pub struct MeteoService {
    upstream: Arc<dyn Upstream>,
}

impl MeteoService {
    /// Create a service over an existing upstream.
    pub fn new(upstream: Arc<dyn Upstream>) -> Self {
        Self { upstream }
    }

    /// Create a service talking to the Meteomatics API.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = MeteomaticsClient::new(config)?;
        Ok(Self::new(Arc::new(client)))
    }

    /// Fetch a point time series.
    ///
    /// # Errors
    ///
    /// - [`MeteoError::InvalidTimestamp`] if `start` or `end` does not parse
    /// - [`MeteoError::UnsupportedFormat`] if `fmt` is not supported
    /// - [`MeteoError::UpstreamUnreachable`] on transport failure
    /// - [`MeteoError::UpstreamError`] if the provider answers with status >= 400
    pub async fn timeseries(&self, request: &TimeSeriesRequest) -> Result<Payload> {
        let path = request.upstream_path()?;
        self.forward(&path).await
    }

    /// Fetch a bounding-box grid.
    ///
    /// A `valid_time` of `"now"` is forwarded without validation.
    ///
    /// # Errors
    ///
    /// Same as [`Self::timeseries`], with `valid_time` in place of the range.
    pub async fn grid(&self, request: &GridRequest) -> Result<Payload> {
        let path = request.upstream_path()?;
        self.forward(&path).await
    }

    async fn forward(&self, path: &str) -> Result<Payload> {
        tracing::debug!(path = path, "Forwarding to upstream");

        let raw = self.upstream.get_raw(path).await.map_err(|e| {
            tracing::warn!(path = path, error = %e, "Upstream unreachable");
            MeteoError::UpstreamUnreachable(e)
        })?;

        if raw.is_error() {
            let body = String::from_utf8_lossy(&raw.body).into_owned();
            tracing::warn!(path = path, status = raw.status, "Upstream returned error");
            return Err(MeteoError::UpstreamError {
                status: raw.status,
                body,
            });
        }

        let content_type = raw
            .content_type()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        Ok(Payload {
            body: raw.body,
            content_type,
        })
    }
}

impl fmt::Debug for MeteoService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeteoService").finish_non_exhaustive()
    }
}
