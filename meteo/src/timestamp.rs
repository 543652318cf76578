//! ISO-8601 timestamp validation.
//!
//! Timestamps are checked but never reformatted: the provider receives the
//! caller's literal, except that a trailing `Z` is spelled as `+00:00`.
//!
//! # Accepted Shapes
//!
//! - Date: `YYYY-MM-DD` or basic `YYYYMMDD`
//! - Date and time, separated by `T` or a space
//! - Time: `HH`, `HH:MM`, `HH:MM:SS` or basic `HHMM`, `HHMMSS`, with an
//!   optional fraction (`.` or `,`) after the seconds
//! - Offset after a time: `Z`, `±HH`, `±HH:MM`, `±HHMM`, `±HH:MM:SS`, `±HHMMSS`
//!
//! Only an uppercase `Z` designates UTC. Ordinal and week dates are rejected.

use chrono::{FixedOffset, NaiveDate, NaiveTime};

use crate::error::{MeteoError, Result};

/// Literal accepted by the grid endpoint in place of a timestamp.
pub const NOW: &str = "now";

/// Validate a caller-supplied timestamp and return its normalized form.
///
/// A trailing `Z` is replaced with `+00:00`; everything else is kept as
/// written.
///
/// # Errors
///
/// [`MeteoError::InvalidTimestamp`] carrying `value` exactly as supplied.
///
/// # Examples
///
/// ```
/// use meteo::timestamp::normalize;
///
/// assert_eq!(
///     normalize("2024-01-01T00:00:00Z").unwrap(),
///     "2024-01-01T00:00:00+00:00"
/// );
/// assert!(normalize("yesterday").is_err());
/// ```
pub fn normalize(value: &str) -> Result<String> {
    let normalized = match value.strip_suffix('Z') {
        Some(head) => format!("{head}+00:00"),
        None => value.to_string(),
    };

    if is_iso_datetime(&normalized) {
        Ok(normalized)
    } else {
        Err(MeteoError::InvalidTimestamp {
            value: value.to_string(),
        })
    }
}

/// Validate a grid `valid_time`, passing [`NOW`] through untouched.
pub fn normalize_valid_time(value: &str) -> Result<String> {
    if value == NOW {
        return Ok(NOW.to_string());
    }
    normalize(value)
}

fn is_iso_datetime(s: &str) -> bool {
    parse_iso(s).is_some()
}

fn parse_iso(s: &str) -> Option<()> {
    if !s.is_ascii() {
        return None;
    }

    // Extended dates have a dash after the year
    let date_len = if s.as_bytes().get(4) == Some(&b'-') {
        10
    } else {
        8
    };
    parse_date(s.get(..date_len)?)?;

    let rest = &s[date_len..];
    if rest.is_empty() {
        return Some(());
    }

    let rest = rest.strip_prefix('T').or_else(|| rest.strip_prefix(' '))?;
    let (time, offset) = match rest.find(|c: char| c == '+' || c == '-') {
        Some(i) => (&rest[..i], Some(&rest[i + 1..])),
        None => (rest, None),
    };

    parse_time(time)?;
    if let Some(offset) = offset {
        parse_offset(offset)?;
    }
    Some(())
}

fn parse_date(date: &str) -> Option<NaiveDate> {
    let (year, month, day) = if date.len() == 10 {
        if &date[4..5] != "-" || &date[7..8] != "-" {
            return None;
        }
        (&date[..4], &date[5..7], &date[8..10])
    } else {
        (&date[..4], &date[4..6], &date[6..8])
    };

    NaiveDate::from_ymd_opt(digits(year)? as i32, digits(month)?, digits(day)?)
}

fn parse_time(time: &str) -> Option<NaiveTime> {
    let (clock, fraction) = match time.find(|c: char| c == '.' || c == ',') {
        Some(i) => (&time[..i], Some(&time[i + 1..])),
        None => (time, None),
    };

    let parts = clock_parts(clock)?;
    if let Some(fraction) = fraction {
        // A fraction only follows seconds
        if parts.len() != 3 {
            return None;
        }
        digits(fraction)?;
    }

    let field = |i: usize| parts.get(i).copied().unwrap_or(0);
    NaiveTime::from_hms_opt(field(0), field(1), field(2))
}

fn parse_offset(offset: &str) -> Option<FixedOffset> {
    let parts = clock_parts(offset)?;
    let field = |i: usize| parts.get(i).copied().unwrap_or(0);
    let (hours, minutes, seconds) = (field(0), field(1), field(2));
    if minutes >= 60 || seconds >= 60 {
        return None;
    }
    FixedOffset::east_opt((hours * 3600 + minutes * 60 + seconds) as i32)
}

/// Split `HH[:MM[:SS]]` or `HH[MM[SS]]` into its two-digit fields.
fn clock_parts(clock: &str) -> Option<Vec<u32>> {
    let fields: Vec<&str> = if clock.contains(':') {
        clock.split(':').collect()
    } else if matches!(clock.len(), 2 | 4 | 6) {
        (0..clock.len())
            .step_by(2)
            .map(|i| &clock[i..i + 2])
            .collect()
    } else {
        return None;
    };

    if fields.len() > 3 || fields.iter().any(|f| f.len() != 2) {
        return None;
    }
    fields.into_iter().map(digits).collect()
}

fn digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
