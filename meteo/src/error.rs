//! Error types for the meteo gateway core.

use thiserror::Error;

/// Errors that can occur while translating and forwarding a weather query.
#[derive(Error, Debug)]
pub enum MeteoError {
    /// A caller-supplied date-time string could not be parsed.
    #[error("Invalid timestamp: {value}")]
    InvalidTimestamp { value: String },

    /// A coordinate or resolution lies outside its valid range.
    #[error("{field} must be {expected}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },

    /// The requested output format is not one the provider serves.
    #[error("Unsupported format: {fmt} (expected one of json, csv, png, webp, geotiff, netcdf)")]
    UnsupportedFormat { fmt: String },

    /// The provider could not be reached (connection, DNS, timeout).
    #[error("Failed to reach upstream provider: {0}")]
    UpstreamUnreachable(#[source] reqwest::Error),

    /// The provider answered with an error status.
    ///
    /// `body` is the provider's response text, untouched.
    #[error("Upstream returned status {status}: {body}")]
    UpstreamError { status: u16, body: String },

    /// The gateway has no service to answer with.
    #[error("Meteo service not initialized")]
    ServiceUnavailable,

    /// A mandatory credential was absent from the environment.
    #[error("Missing credentials: {var} is not set")]
    MissingCredentials { var: &'static str },

    /// The HTTP client could not be constructed.
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl MeteoError {
    /// Whether the error was caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            MeteoError::InvalidTimestamp { .. }
                | MeteoError::OutOfRange { .. }
                | MeteoError::UnsupportedFormat { .. }
        )
    }
}

/// Result type alias using [`MeteoError`].
pub type Result<T> = std::result::Result<T, MeteoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MeteoError::InvalidTimestamp {
            value: "yesterday".to_string(),
        };
        assert!(err.to_string().contains("yesterday"));

        let err = MeteoError::UnsupportedFormat {
            fmt: "bmp".to_string(),
        };
        assert!(err.to_string().contains("bmp"));

        let err = MeteoError::UpstreamError {
            status: 404,
            body: "not found".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("not found"));

        let err = MeteoError::OutOfRange {
            field: "lat",
            value: 91.0,
            expected: "between -90 and 90",
        };
        assert_eq!(err.to_string(), "lat must be between -90 and 90, got 91");

        let err = MeteoError::MissingCredentials { var: "MM_USER" };
        assert!(err.to_string().contains("MM_USER"));
    }

    #[test]
    fn test_client_error_classification() {
        assert!(MeteoError::InvalidTimestamp {
            value: "x".to_string()
        }
        .is_client_error());
        assert!(MeteoError::UnsupportedFormat {
            fmt: "x".to_string()
        }
        .is_client_error());
        assert!(MeteoError::OutOfRange {
            field: "res_lat",
            value: 0.0,
            expected: "greater than 0",
        }
        .is_client_error());
        assert!(!MeteoError::ServiceUnavailable.is_client_error());
        assert!(!MeteoError::UpstreamError {
            status: 400,
            body: String::new()
        }
        .is_client_error());
    }
}
