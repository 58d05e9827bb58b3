//! Document and cell value types shared by the fetcher, mapper and writer.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;

/// All timestamps are normalized to this zone and then stripped of zone info,
/// so every datetime in the pipeline is naive local wall-clock.
pub const LOCAL_TZ: Tz = chrono_tz::America::Santiago;

/// Reserved key under which a fetched document carries its own identifier.
pub const DOC_ID_KEY: &str = "id";

/// A fetched document: field name → decoded value.
pub type Document = HashMap<String, DocValue>;

//==============================================================================
// Document values
//==============================================================================

/// A decoded document field value.
#[derive(Debug, Clone, PartialEq)]
pub enum DocValue {
    Null,
    Text(String),
    Integer(i64),
    Double(f64),
    Bool(bool),
    /// Naive local wall-clock; zone info was stripped at fetch time.
    Timestamp(NaiveDateTime),
    GeoPoint {
        latitude: f64,
        longitude: f64,
    },
    Array(Vec<DocValue>),
    Map(HashMap<String, DocValue>),
}

impl DocValue {
    pub fn is_null(&self) -> bool {
        matches!(self, DocValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DocValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DocValue::Integer(i) => Some(*i as f64),
            DocValue::Double(f) => Some(*f),
            _ => None,
        }
    }

    /// Permissive datetime view: timestamps pass through, text is tried
    /// against RFC 3339 and common date layouts, everything else is `None`.
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            DocValue::Timestamp(dt) => Some(*dt),
            DocValue::Text(raw) => parse_datetime(raw),
            _ => None,
        }
    }
}

fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&LOCAL_TZ).naive_local());
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Latitude of a geo-point-shaped value. Accepts both the structured point
/// and a plain map exposing `latitude`/`longitude` keys.
pub fn latitude_of(value: Option<&DocValue>) -> Option<f64> {
    match value? {
        DocValue::GeoPoint { latitude, .. } => Some(*latitude),
        DocValue::Map(fields) => fields.get("latitude").and_then(DocValue::as_f64),
        _ => None,
    }
}

/// Longitude counterpart of [`latitude_of`].
pub fn longitude_of(value: Option<&DocValue>) -> Option<f64> {
    match value? {
        DocValue::GeoPoint { longitude, .. } => Some(*longitude),
        DocValue::Map(fields) => fields.get("longitude").and_then(DocValue::as_f64),
        _ => None,
    }
}

//==============================================================================
// Destination cells
//==============================================================================

/// A destination spreadsheet cell value. `Empty` is written out as an
/// explicit empty cell, never skipped.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl From<&DocValue> for CellValue {
    fn from(value: &DocValue) -> Self {
        match value {
            DocValue::Null => CellValue::Empty,
            DocValue::Text(s) => CellValue::Text(s.clone()),
            DocValue::Integer(i) => CellValue::Int(*i),
            DocValue::Double(f) => CellValue::Float(*f),
            DocValue::Bool(b) => CellValue::Bool(*b),
            DocValue::Timestamp(dt) => CellValue::DateTime(*dt),
            // structured values have no scalar cell rendition
            DocValue::GeoPoint { .. } | DocValue::Array(_) | DocValue::Map(_) => CellValue::Empty,
        }
    }
}
