//! HTTP request handlers for the meteo gateway.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use meteo::{GridRequest, MeteoError, Payload, TimeSeriesRequest};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::AppState;

fn default_step() -> String {
    meteo::request::DEFAULT_STEP.to_string()
}

fn default_params() -> String {
    meteo::request::DEFAULT_PARAMS.to_string()
}

fn default_timeseries_fmt() -> String {
    "json".to_string()
}

fn default_grid_fmt() -> String {
    "png".to_string()
}

fn default_resolution() -> f64 {
    meteo::request::DEFAULT_RESOLUTION
}

fn default_valid_time() -> String {
    meteo::timestamp::NOW.to_string()
}

/// Query parameters for the time-series endpoint.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TimeSeriesQuery {
    /// Latitude in decimal degrees (-90 to 90).
    pub lat: f64,
    /// Longitude in decimal degrees (-180 to 180).
    pub lon: f64,
    /// Start of the range (ISO-8601, trailing `Z` allowed).
    pub start: String,
    /// End of the range (ISO-8601, trailing `Z` allowed).
    pub end: String,
    /// Sampling step as an ISO-8601 duration. Default `PT1H`.
    #[serde(default = "default_step")]
    pub step: String,
    /// Provider parameter list. Default `t_2m:C`.
    #[serde(default = "default_params")]
    pub params: String,
    /// Output format: json, csv, png, webp, geotiff or netcdf. Default `json`.
    #[serde(default = "default_timeseries_fmt")]
    pub fmt: String,
}

impl TimeSeriesQuery {
    fn into_request(self) -> TimeSeriesRequest {
        TimeSeriesRequest::new(self.lat, self.lon, self.start, self.end)
            .step(self.step)
            .params(self.params)
            .fmt(self.fmt)
    }
}

/// Query parameters for the grid endpoint.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GridQuery {
    /// Latitude of the first corner (-90 to 90).
    pub lat1: f64,
    /// Longitude of the first corner (-180 to 180).
    pub lon1: f64,
    /// Latitude of the second corner (-90 to 90).
    pub lat2: f64,
    /// Longitude of the second corner (-180 to 180).
    pub lon2: f64,
    /// Latitude resolution in degrees (> 0). Default 0.05.
    #[serde(default = "default_resolution")]
    pub res_lat: f64,
    /// Longitude resolution in degrees (> 0). Default 0.05.
    #[serde(default = "default_resolution")]
    pub res_lon: f64,
    /// `now` or an ISO-8601 timestamp. Default `now`.
    #[serde(default = "default_valid_time")]
    pub valid_time: String,
    /// Provider parameter list. Default `t_2m:C`.
    #[serde(default = "default_params")]
    pub params: String,
    /// Output format: json, csv, png, webp, geotiff or netcdf. Default `png`.
    #[serde(default = "default_grid_fmt")]
    pub fmt: String,
}

impl GridQuery {
    fn into_request(self) -> GridRequest {
        GridRequest::new(self.lat1, self.lon1, self.lat2, self.lon2)
            .resolution(self.res_lat, self.res_lon)
            .valid_time(self.valid_time)
            .params(self.params)
            .fmt(self.fmt)
    }
}

/// Error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message. For upstream errors, the provider's body verbatim.
    pub error: String,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// Fetch a point time series from the provider.
///
/// # Returns
///
/// - `200 OK` with the provider payload and its content type
/// - `400 Bad Request` for out-of-range coordinates, bad timestamps or formats
/// - provider status with its body if the provider rejects the query
/// - `502 Bad Gateway` if the provider cannot be reached
#[utoipa::path(
    get,
    path = "/api/meteo/timeseries",
    tag = "meteo",
    params(TimeSeriesQuery),
    responses(
        (status = 200, description = "Raw provider payload with the provider's content type"),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 502, description = "Provider unreachable", body = ErrorResponse),
        (status = 500, description = "Service not initialized", body = ErrorResponse)
    )
)]
pub async fn get_timeseries(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TimeSeriesQuery>,
) -> Response {
    tracing::debug!(
        lat = query.lat,
        lon = query.lon,
        start = %query.start,
        end = %query.end,
        fmt = %query.fmt,
        "Time series query"
    );

    let request = query.into_request();
    if let Err(e) = request.check_ranges() {
        return error_response(e);
    }

    let service = match state.service() {
        Ok(service) => service,
        Err(e) => return error_response(e),
    };

    match service.timeseries(&request).await {
        Ok(payload) => payload_response(payload),
        Err(e) => error_response(e),
    }
}

/// Fetch a bounding-box grid from the provider.
///
/// # Returns
///
/// Same contract as the time-series endpoint.
#[utoipa::path(
    get,
    path = "/api/meteo/grid",
    tag = "meteo",
    params(GridQuery),
    responses(
        (status = 200, description = "Raw provider payload with the provider's content type"),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 502, description = "Provider unreachable", body = ErrorResponse),
        (status = 500, description = "Service not initialized", body = ErrorResponse)
    )
)]
pub async fn get_grid(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GridQuery>,
) -> Response {
    tracing::debug!(
        lat1 = query.lat1,
        lon1 = query.lon1,
        lat2 = query.lat2,
        lon2 = query.lon2,
        valid_time = %query.valid_time,
        fmt = %query.fmt,
        "Grid query"
    );

    let request = query.into_request();
    if let Err(e) = request.check_ranges() {
        return error_response(e);
    }

    let service = match state.service() {
        Ok(service) => service,
        Err(e) => return error_response(e),
    };

    match service.grid(&request).await {
        Ok(payload) => payload_response(payload),
        Err(e) => error_response(e),
    }
}

/// Relay a provider payload with its content type.
fn payload_response(payload: Payload) -> Response {
    tracing::info!(
        content_type = %payload.content_type,
        bytes = payload.body.len(),
        "Upstream payload relayed"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, payload.content_type)],
        payload.body,
    )
        .into_response()
}

/// Map a core error to an HTTP response.
pub(crate) fn error_response(e: MeteoError) -> Response {
    let (status, message) = match e {
        e if e.is_client_error() => (StatusCode::BAD_REQUEST, e.to_string()),
        MeteoError::UpstreamUnreachable(_) => (StatusCode::BAD_GATEWAY, e.to_string()),
        MeteoError::UpstreamError { status, body } => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
            body,
        ),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };

    tracing::warn!(status = status.as_u16(), error = %message, "Meteo query failed");

    (status, Json(ErrorResponse { error: message })).into_response()
}

/// Health check endpoint.
///
/// Returns service status and version.
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses((status = 200, description = "Service is healthy", body = HealthResponse))
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
