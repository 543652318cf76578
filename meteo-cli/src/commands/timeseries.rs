use anyhow::{Context, Result};
use meteo::TimeSeriesRequest;
use std::path::PathBuf;

use super::{write_payload, Connection};

pub async fn run(
    conn: &Connection,
    request: TimeSeriesRequest,
    output: Option<PathBuf>,
) -> Result<()> {
    // Fail on bad input before asking for credentials
    request.check_ranges()?;
    let path = request.upstream_path()?;
    let service = conn.service()?;

    let payload = service
        .timeseries(&request)
        .await
        .with_context(|| format!("Time series query failed ({})", path))?;

    write_payload(&payload, output.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use meteo::MeteoError;

    fn anonymous() -> Connection {
        Connection {
            user: None,
            password: None,
            base_url: "http://localhost:1".to_string(),
            timeout_secs: 1,
        }
    }

    #[tokio::test]
    async fn test_out_of_range_rejected_without_credentials() {
        let request = TimeSeriesRequest::new(91.0, 0.0, "2024-01-01", "2024-01-02");

        let err = run(&anonymous(), request, None).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<MeteoError>(),
            Some(MeteoError::OutOfRange { field: "lat", .. })
        ));
        assert!(!err.to_string().contains("MM_USER"));
    }

    #[tokio::test]
    async fn test_bad_timestamp_rejected_without_credentials() {
        let request = TimeSeriesRequest::new(40.0, -3.0, "yesterday", "2024-01-02");

        let err = run(&anonymous(), request, None).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<MeteoError>(),
            Some(MeteoError::InvalidTimestamp { .. })
        ));
    }

    #[tokio::test]
    async fn test_valid_query_needs_credentials() {
        let request = TimeSeriesRequest::new(40.0, -3.0, "2024-01-01", "2024-01-02");

        let err = run(&anonymous(), request, None).await.unwrap_err();

        assert!(err.to_string().contains("MM_USER"));
    }
}
