//! Query types and their translation into the provider's path syntax.
//!
//! The provider encodes a query as slash-delimited positional segments:
//!
//! - time series: `/{start}--{end}:{step}/{params}/{lat},{lon}/{fmt}`
//! - grid: `/{valid_time}/{params}/{lat1},{lon1}_{lat2},{lon2}:{res_lat},{res_lon}/{fmt}`
//!
//! Segments are interpolated literally. Coordinates and resolutions are
//! rendered with [`format_number`] so that a given query always produces the
//! same path.

use crate::error::{MeteoError, Result};
use crate::format::OutputFormat;
use crate::timestamp;

/// Default time-series step (one hour, ISO-8601 duration).
pub const DEFAULT_STEP: &str = "PT1H";

/// Default parameter list (2 m air temperature in Celsius).
pub const DEFAULT_PARAMS: &str = "t_2m:C";

/// Default grid resolution in degrees, for both axes.
pub const DEFAULT_RESOLUTION: f64 = 0.05;

/// Render a float as the shortest decimal that round-trips, always keeping
/// a fractional part for integral values.
///
/// # Examples
///
/// ```
/// use meteo::request::format_number;
///
/// assert_eq!(format_number(40.0), "40.0");
/// assert_eq!(format_number(-3.0), "-3.0");
/// assert_eq!(format_number(0.05), "0.05");
/// ```
pub fn format_number(value: f64) -> String {
    format!("{value:?}")
}

fn check_lat(field: &'static str, value: f64) -> Result<()> {
    check(field, value, (-90.0..=90.0).contains(&value), "between -90 and 90")
}

fn check_lon(field: &'static str, value: f64) -> Result<()> {
    check(field, value, (-180.0..=180.0).contains(&value), "between -180 and 180")
}

fn check_positive(field: &'static str, value: f64) -> Result<()> {
    check(field, value, value > 0.0, "greater than 0")
}

fn check(field: &'static str, value: f64, ok: bool, expected: &'static str) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(MeteoError::OutOfRange {
            field,
            value,
            expected,
        })
    }
}

/// A point time-series query.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesRequest {
    /// Latitude in decimal degrees (-90 to 90).
    pub lat: f64,
    /// Longitude in decimal degrees (-180 to 180).
    pub lon: f64,
    /// First instant of the series.
    pub start: String,
    /// Last instant of the series.
    pub end: String,
    /// ISO-8601 duration between samples.
    pub step: String,
    /// Provider parameter list, e.g. `t_2m:C,precip_1h:mm`.
    pub params: String,
    /// Requested output format, as supplied by the caller.
    pub fmt: String,
}

impl TimeSeriesRequest {
    /// Create a query with the default step, parameters and format.
    pub fn new(lat: f64, lon: f64, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            lat,
            lon,
            start: start.into(),
            end: end.into(),
            step: DEFAULT_STEP.to_string(),
            params: DEFAULT_PARAMS.to_string(),
            fmt: OutputFormat::Json.as_str().to_string(),
        }
    }

    /// Set the sampling step.
    pub fn step(mut self, step: impl Into<String>) -> Self {
        self.step = step.into();
        self
    }

    /// Set the parameter list.
    pub fn params(mut self, params: impl Into<String>) -> Self {
        self.params = params.into();
        self
    }

    /// Set the output format.
    pub fn fmt(mut self, fmt: impl Into<String>) -> Self {
        self.fmt = fmt.into();
        self
    }

    /// Check that the point lies on the globe. Bounds are inclusive.
    pub fn check_ranges(&self) -> Result<()> {
        check_lat("lat", self.lat)?;
        check_lon("lon", self.lon)
    }

    /// Validate the query and build the upstream path.
    ///
    /// `start` is checked before `end`, and both before `fmt`; the first
    /// failure is returned.
    pub fn upstream_path(&self) -> Result<String> {
        let start = timestamp::normalize(&self.start)?;
        let end = timestamp::normalize(&self.end)?;
        let fmt: OutputFormat = self.fmt.parse()?;

        Ok(format!(
            "/{}--{}:{}/{}/{},{}/{}",
            start,
            end,
            self.step,
            self.params,
            format_number(self.lat),
            format_number(self.lon),
            fmt
        ))
    }
}

/// A bounding-box grid query.
#[derive(Debug, Clone, PartialEq)]
pub struct GridRequest {
    /// Latitude of the first corner.
    pub lat1: f64,
    /// Longitude of the first corner.
    pub lon1: f64,
    /// Latitude of the second corner.
    pub lat2: f64,
    /// Longitude of the second corner.
    pub lon2: f64,
    /// Latitude step in degrees (> 0).
    pub res_lat: f64,
    /// Longitude step in degrees (> 0).
    pub res_lon: f64,
    /// Either `"now"` or a timestamp.
    pub valid_time: String,
    /// Provider parameter list.
    pub params: String,
    /// Requested output format, as supplied by the caller.
    pub fmt: String,
}

impl GridRequest {
    /// Create a query for the current time with default resolution,
    /// parameters and format (`png`).
    pub fn new(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Self {
        Self {
            lat1,
            lon1,
            lat2,
            lon2,
            res_lat: DEFAULT_RESOLUTION,
            res_lon: DEFAULT_RESOLUTION,
            valid_time: timestamp::NOW.to_string(),
            params: DEFAULT_PARAMS.to_string(),
            fmt: OutputFormat::Png.as_str().to_string(),
        }
    }

    /// Set the grid resolution.
    pub fn resolution(mut self, res_lat: f64, res_lon: f64) -> Self {
        self.res_lat = res_lat;
        self.res_lon = res_lon;
        self
    }

    /// Set the valid time.
    pub fn valid_time(mut self, valid_time: impl Into<String>) -> Self {
        self.valid_time = valid_time.into();
        self
    }

    /// Set the parameter list.
    pub fn params(mut self, params: impl Into<String>) -> Self {
        self.params = params.into();
        self
    }

    /// Set the output format.
    pub fn fmt(mut self, fmt: impl Into<String>) -> Self {
        self.fmt = fmt.into();
        self
    }

    /// The bounding-box segment, `{lat1},{lon1}_{lat2},{lon2}:{res_lat},{res_lon}`.
    pub fn bbox(&self) -> String {
        format!(
            "{},{}_{},{}:{},{}",
            format_number(self.lat1),
            format_number(self.lon1),
            format_number(self.lat2),
            format_number(self.lon2),
            format_number(self.res_lat),
            format_number(self.res_lon)
        )
    }

    /// Check both corners and that the resolution is positive.
    ///
    /// Fields are checked in declaration order; the first failure is
    /// returned.
    pub fn check_ranges(&self) -> Result<()> {
        check_lat("lat1", self.lat1)?;
        check_lon("lon1", self.lon1)?;
        check_lat("lat2", self.lat2)?;
        check_lon("lon2", self.lon2)?;
        check_positive("res_lat", self.res_lat)?;
        check_positive("res_lon", self.res_lon)
    }

    /// Validate the query and build the upstream path.
    pub fn upstream_path(&self) -> Result<String> {
        let valid_time = timestamp::normalize_valid_time(&self.valid_time)?;
        let fmt: OutputFormat = self.fmt.parse()?;

        Ok(format!(
            "/{}/{}/{}/{}",
            valid_time,
            self.params,
            self.bbox(),
            fmt
        ))
    }
}
