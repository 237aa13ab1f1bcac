//! Conversion of raw string columns into typed columns.
//!
//! Both modes share the same repair policy for missing (empty) cells:
//! look for the nearest non-empty neighbor in the configured direction,
//! parse it, and fall back to the default when there is none.

use crate::data::datatable::{DataColumn, DataType, DataValue};
use crate::data::neighbor_search::find_first_entry;
use crate::error::{LoadError, Result};
use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 2^63, the first f64 outside the i64 range
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Target type for numeric columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericKind {
    Integer,
    #[default]
    Float,
}

impl NumericKind {
    pub fn data_type(&self) -> DataType {
        match self {
            NumericKind::Integer => DataType::Integer,
            NumericKind::Float => DataType::Float,
        }
    }

    fn parse(&self, value: &str) -> Result<DataValue> {
        match self {
            NumericKind::Integer => value
                .parse::<i64>()
                .map(DataValue::Integer)
                .map_err(|_| LoadError::parse_failure(value, "integer")),
            NumericKind::Float => value
                .parse::<f64>()
                .map(DataValue::Float)
                .map_err(|_| LoadError::parse_failure(value, "float")),
        }
    }

    fn cast_default(&self, default: f64) -> Result<DataValue> {
        match self {
            NumericKind::Float => Ok(DataValue::Float(default)),
            NumericKind::Integer => {
                if default.fract() != 0.0 || !default.is_finite() {
                    return Err(LoadError::Validation(format!(
                        "Default {} is not a valid integer",
                        default
                    )));
                }
                if default < -I64_BOUND || default >= I64_BOUND {
                    return Err(LoadError::Validation(format!(
                        "Default {} is outside the integer range",
                        default
                    )));
                }
                Ok(DataValue::Integer(default as i64))
            }
        }
    }
}

/// Settings for numeric conversion
#[derive(Debug, Clone, PartialEq)]
pub struct NumericOptions {
    /// Used when a gap has no neighbor; `None` leaves the cell null
    pub default: Option<f64>,
    pub kind: NumericKind,
    /// Search forward (next value) instead of backward for gap repair
    pub use_next: bool,
}

impl Default for NumericOptions {
    fn default() -> Self {
        Self {
            default: None,
            kind: NumericKind::Float,
            use_next: true,
        }
    }
}

/// Settings for datetime conversion
#[derive(Debug, Clone, PartialEq)]
pub struct TemporalOptions {
    /// Used when a gap has no neighbor; `None` means the time of the call
    pub default: Option<NaiveDateTime>,
    /// chrono format string, required
    pub format: String,
    pub use_next: bool,
}

impl Default for TemporalOptions {
    fn default() -> Self {
        Self {
            default: None,
            format: String::new(),
            use_next: true,
        }
    }
}

/// Parse a datetime with `format`. Date-only formats resolve to midnight.
pub fn parse_datetime(value: &str, format: &str) -> Result<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
        return Ok(dt);
    }

    NaiveDate::parse_from_str(value, format)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| LoadError::parse_failure(value, format!("datetime '{}'", format)))
}

/// Convert a raw column to integers or floats
pub fn to_numeric<S: AsRef<str>>(
    name: &str,
    col: &[S],
    options: &NumericOptions,
) -> Result<DataColumn> {
    let kind = options.kind;
    let fallback = options
        .default
        .map(|d| kind.cast_default(d))
        .transpose()?
        .unwrap_or(DataValue::Null);

    let mut repaired = 0usize;
    let mut values = Vec::with_capacity(col.len());
    for (index, raw) in col.iter().enumerate() {
        let raw = raw.as_ref();
        let value = if !raw.is_empty() {
            kind.parse(raw)?
        } else {
            repaired += 1;
            match find_first_entry(col, index, options.use_next)? {
                Some(neighbor) => kind.parse(neighbor)?,
                None => fallback.clone(),
            }
        };
        values.push(value);
    }

    debug!(
        "Converted column '{}' to {}: {} rows, {} gaps repaired",
        name,
        kind.data_type(),
        values.len(),
        repaired
    );

    Ok(DataColumn::new(name, kind.data_type(), values))
}

/// Convert a raw column to datetimes using `options.format`
pub fn to_datetime<S: AsRef<str>>(
    name: &str,
    col: &[S],
    options: &TemporalOptions,
) -> Result<DataColumn> {
    if options.format.is_empty() {
        return Err(LoadError::Validation(
            "A datetime format must be specified".to_string(),
        ));
    }

    let fallback = options
        .default
        .unwrap_or_else(|| Local::now().naive_local());

    let mut repaired = 0usize;
    let mut values = Vec::with_capacity(col.len());
    for (index, raw) in col.iter().enumerate() {
        let raw = raw.as_ref();
        let value = if !raw.is_empty() {
            parse_datetime(raw, &options.format)?
        } else {
            repaired += 1;
            match find_first_entry(col, index, options.use_next)? {
                Some(neighbor) => parse_datetime(neighbor, &options.format)?,
                None => fallback,
            }
        };
        values.push(DataValue::DateTime(value));
    }

    debug!(
        "Converted column '{}' to datetime: {} rows, {} gaps repaired",
        name,
        values.len(),
        repaired
    );

    Ok(DataColumn::new(name, DataType::DateTime, values))
}
