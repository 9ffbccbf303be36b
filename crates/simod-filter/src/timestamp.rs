//! Lenient ISO 8601 timestamp parsing for event log time columns.
//!
//! Accepted shapes, tried in order:
//!
//! - RFC 3339 with `T` or space separator and an offset or `Z`
//!   (`2024-01-01T08:00:00+02:00`, `2024-01-01 08:00:00Z`)
//! - Basic-format offsets (`2024-01-01T08:00:00+0200`)
//! - Local date-times with optional fractional seconds or without seconds
//!   (`2024-01-01T08:00:00.250`, `2024-01-01 08:00`)
//! - Plain dates (`2024-01-01`), read as midnight
//!
//! Values without an offset are read as UTC. Anything else is unparsable,
//! which callers treat as "cannot be evaluated", never as an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use simod_model::CellValue;

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

const LOCAL_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(value, format) {
            return Some(parsed.with_timezone(&Utc));
        }
    }
    for format in LOCAL_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc())
}

/// Parses a cell as a timestamp. Only text cells can hold one.
pub fn parse_cell_timestamp(value: &CellValue) -> Option<DateTime<Utc>> {
    match value {
        CellValue::Text(text) => parse_timestamp(text),
        _ => None,
    }
}
