use anyhow::{Context, Result};
use meteo::GridRequest;
use std::path::PathBuf;

use super::{write_payload, Connection};

pub async fn run(conn: &Connection, request: GridRequest, output: Option<PathBuf>) -> Result<()> {
    request.check_ranges()?;
    let path = request.upstream_path()?;
    let service = conn.service()?;

    let payload = service
        .grid(&request)
        .await
        .with_context(|| format!("Grid query failed ({})", path))?;

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

    async fn rejected_field(request: GridRequest) -> &'static str {
        let err = run(&anonymous(), request, None).await.unwrap_err();
        match err.downcast_ref::<MeteoError>() {
            Some(MeteoError::OutOfRange { field, .. }) => *field,
            _ => panic!("expected a range error, got {err:#}"),
        }
    }

    #[tokio::test]
    async fn test_coordinates_checked_before_credentials() {
        assert_eq!(
            rejected_field(GridRequest::new(95.0, 0.0, 0.0, 1.0)).await,
            "lat1"
        );
        assert_eq!(
            rejected_field(GridRequest::new(1.0, 0.0, 0.0, 200.0)).await,
            "lon2"
        );
        assert_eq!(
            rejected_field(GridRequest::new(1.0, 0.0, 0.0, 1.0).resolution(0.05, 0.0)).await,
            "res_lon"
        );
    }

    #[tokio::test]
    async fn test_bad_format_rejected_without_credentials() {
        let request = GridRequest::new(1.0, 0.0, 0.0, 1.0).fmt("gif");

        let err = run(&anonymous(), request, None).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<MeteoError>(),
            Some(MeteoError::UnsupportedFormat { .. })
        ));
    }

    #[tokio::test]
    async fn test_valid_query_needs_credentials() {
        let request = GridRequest::new(1.0, 0.0, 0.0, 1.0);

        let err = run(&anonymous(), request, None).await.unwrap_err();

        assert!(err.to_string().contains("MM_USER"));
    }
}
