//! Meteo Service Library
//!
//! HTTP handlers, state and router for the meteo gateway.
//! This library is used by both the meteo-service binary and integration tests.

pub mod handlers;

use std::sync::Arc;

use axum::{routing::get, Router};
use meteo::{MeteoError, MeteoService};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI documentation for the meteo gateway.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Meteo API",
        version = "1.0.0",
        description = "Gateway for Meteomatics time-series and grid queries.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    paths(
        handlers::get_timeseries,
        handlers::get_grid,
        handlers::health_check,
    ),
    components(
        schemas(
            handlers::ErrorResponse,
            handlers::HealthResponse,
        )
    ),
    tags(
        (name = "meteo", description = "Weather query endpoints"),
        (name = "system", description = "System and health endpoints")
    )
)]
pub struct ApiDoc;

/// Application state shared across handlers.
#[derive(Debug, Default)]
pub struct AppState {
    /// Gateway core; `None` until startup has wired it in.
    meteo_service: Option<MeteoService>,
}

impl AppState {
    /// State backed by an initialized service.
    pub fn new(meteo_service: MeteoService) -> Self {
        Self {
            meteo_service: Some(meteo_service),
        }
    }

    /// State with no service, every query answers `ServiceUnavailable`.
    pub fn uninitialized() -> Self {
        Self::default()
    }

    /// The service, or [`MeteoError::ServiceUnavailable`].
    pub fn service(&self) -> Result<&MeteoService, MeteoError> {
        self.meteo_service
            .as_ref()
            .ok_or(MeteoError::ServiceUnavailable)
    }
}

/// Build the gateway router with docs, tracing and CORS layers.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/meteo/timeseries", get(handlers::get_timeseries))
        .route("/api/meteo/grid", get(handlers::get_grid))
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

// Re-export commonly used types for convenience
pub use handlers::{ErrorResponse, GridQuery, HealthResponse, TimeSeriesQuery};

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_uninitialized_state_is_service_unavailable() {
        let app = router(Arc::new(AppState::uninitialized()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/meteo/grid?lat1=1&lon1=1&lat2=0&lon2=2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_openapi_document_served() {
        let app = router(Arc::new(AppState::uninitialized()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_openapi_lists_endpoints() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/meteo/timeseries"));
        assert!(doc.paths.paths.contains_key("/api/meteo/grid"));
        assert!(doc.paths.paths.contains_key("/health"));
    }
}
