//! Meteo Service - HTTP gateway for Meteomatics weather queries.
//!
//! Validates time-series and grid queries, forwards them to the provider
//! with credentials attached, and relays the raw payload.
//!
//! ## Environment Variables
//!
//! Variables are also read from a `.env` file in the working directory.
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `MM_USER` | Provider username | Required |
//! | `MM_PASS` | Provider password | Required |
//! | `MM_BASE_URL` | Provider base URL | `https://api.meteomatics.com` |
//! | `MM_TIMEOUT_SECS` | Outbound request timeout | 60 |
//! | `METEO_PORT` | HTTP server port | 8000 |
//! | `RUST_LOG` | Log level (e.g., "info", "debug") | "info" |
//!
//! ## Endpoints
//!
//! - `GET /api/meteo/timeseries?lat=&lon=&start=&end=` - Point time series
//! - `GET /api/meteo/grid?lat1=&lon1=&lat2=&lon2=` - Bounding-box grid
//! - `GET /health` - Health check
//! - `GET /docs` - OpenAPI documentation (Swagger UI)

use std::net::SocketAddr;
use std::sync::Arc;

use meteo::MeteoServiceBuilder;
use meteo_service::{router, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is not an error
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meteo_service=info,meteo=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let port: u16 = std::env::var("METEO_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8000);

    // Refuse to start without credentials
    let builder = match MeteoServiceBuilder::from_env() {
        Ok(builder) => builder,
        Err(e) => {
            tracing::error!(error = %e, "Cannot start without MM_USER/MM_PASS");
            return Err(e.into());
        }
    };

    tracing::info!(
        base_url = %builder.client_config().base_url,
        timeout_secs = builder.client_config().timeout_secs,
        port = port,
        "Starting meteo service"
    );

    let meteo_service = builder.build()?;
    let state = Arc::new(AppState::new(meteo_service));
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Meteo service stopped");

    Ok(())
}

/// Resolve on Ctrl+C so in-flight requests can finish.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
