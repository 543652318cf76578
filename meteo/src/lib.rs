//! # Meteo - Weather API Gateway Core
//!
//! Validation and translation layer for a gateway in front of the
//! [Meteomatics](https://www.meteomatics.com/) weather API.
//!
//! The provider encodes queries as positional path segments rather than
//! query strings. This crate turns semantic queries (coordinates, time
//! range, parameter list, output format) into those paths, forwards them
//! with credentials attached, and hands back the raw payload.
//!
//! ## Quick Start
//!
//! ```ignore
//! use meteo::{MeteoServiceBuilder, TimeSeriesRequest};
//!
//! let service = MeteoServiceBuilder::from_env()?.build()?;
//!
//! let req = TimeSeriesRequest::new(40.0, -3.0, "2024-01-01T00:00:00Z", "2024-01-01T12:00:00Z")
//!     .params("t_2m:C,precip_1h:mm")
//!     .fmt("csv");
//! let payload = service.timeseries(&req).await?;
//! println!("{} ({} bytes)", payload.content_type, payload.body.len());
//! ```
//!
//! ## Path Syntax
//!
//! - Time series: `/{start}--{end}:{step}/{params}/{lat},{lon}/{fmt}`
//! - Grid: `/{valid_time}/{params}/{lat1},{lon1}_{lat2},{lon2}:{res_lat},{res_lon}/{fmt}`
//!
//! Payloads (JSON, CSV, PNG, WebP, GeoTIFF, NetCDF) are opaque bytes and are
//! never decoded.

pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod request;
pub mod service;
pub mod timestamp;

// Re-export main types at crate root for convenience
pub use client::{ClientConfig, MeteomaticsClient, RawResponse, Upstream};
pub use config::MeteoServiceBuilder;
pub use error::{MeteoError, Result};
pub use format::OutputFormat;
pub use request::{GridRequest, TimeSeriesRequest};
pub use service::{MeteoService, Payload, DEFAULT_CONTENT_TYPE};
