//! Output formats served by the provider.
//!
//! The format is the last segment of every upstream path. Only the six
//! formats below are forwarded; anything else is rejected before a request
//! leaves the gateway.

use std::fmt;
use std::str::FromStr;

use crate::error::MeteoError;

/// Payload format requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// JSON document.
    Json,
    /// Comma-separated values.
    Csv,
    /// PNG image.
    Png,
    /// WebP image.
    Webp,
    /// GeoTIFF raster.
    Geotiff,
    /// NetCDF dataset.
    Netcdf,
}

impl OutputFormat {
    /// All supported formats, in the order they are documented.
    pub const fn all() -> &'static [OutputFormat] {
        &[
            OutputFormat::Json,
            OutputFormat::Csv,
            OutputFormat::Png,
            OutputFormat::Webp,
            OutputFormat::Geotiff,
            OutputFormat::Netcdf,
        ]
    }

    /// The path literal for this format.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Png => "png",
            OutputFormat::Webp => "webp",
            OutputFormat::Geotiff => "geotiff",
            OutputFormat::Netcdf => "netcdf",
        }
    }

    /// The MIME type the provider usually answers with.
    ///
    /// Informational only: the gateway always relays the content type the
    /// provider actually declares.
    pub fn typical_mime(&self) -> &'static str {
        match self {
            OutputFormat::Json => "application/json",
            OutputFormat::Csv => "text/csv",
            OutputFormat::Png => "image/png",
            OutputFormat::Webp => "image/webp",
            OutputFormat::Geotiff => "image/tiff",
            OutputFormat::Netcdf => "application/netcdf",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = MeteoError;

    /// Matching is exact: `"PNG"` is not `png`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::all()
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| MeteoError::UnsupportedFormat { fmt: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_supported_formats() {
        for fmt in OutputFormat::all() {
            let parsed: OutputFormat = fmt.as_str().parse().unwrap();
            assert_eq!(parsed, *fmt);
        }
        assert_eq!(OutputFormat::all().len(), 6);
    }

    #[test]
    fn test_parse_unsupported_format() {
        let err = "bmp".parse::<OutputFormat>().unwrap_err();
        match err {
            MeteoError::UnsupportedFormat { fmt } => assert_eq!(fmt, "bmp"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("PNG".parse::<OutputFormat>().is_err());
        assert!(" json".parse::<OutputFormat>().is_err());
        assert!("".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(OutputFormat::Geotiff.to_string(), "geotiff");
        assert_eq!(format!("/{}", OutputFormat::Netcdf), "/netcdf");
    }
}
