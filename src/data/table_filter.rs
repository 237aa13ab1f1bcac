//! Inclusive range filtering over typed tables

use crate::data::datatable::{DataTable, DataValue};
use crate::data::datavalue_compare::within_bounds;
use crate::error::{LoadError, Result};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Per-column minimum and maximum values. Both maps must name the same columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterBounds {
    pub min: HashMap<String, DataValue>,
    pub max: HashMap<String, DataValue>,
}

impl FilterBounds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `[min, max]` range for `column`
    pub fn with_range(
        mut self,
        column: impl Into<String>,
        min: DataValue,
        max: DataValue,
    ) -> Self {
        let column = column.into();
        self.min.insert(column.clone(), min);
        self.max.insert(column, max);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.min.is_empty() && self.max.is_empty()
    }
}

fn validate(table: &DataTable, bounds: &FilterBounds) -> Result<()> {
    for (side, map) in [("min", &bounds.min), ("max", &bounds.max)] {
        for (name, bound) in map {
            let column = table.get_column(name).ok_or_else(|| {
                LoadError::Validation(format!("Unknown column '{}' in {} bounds", name, side))
            })?;
            if !column.data_type.is_compatible_with(&bound.data_type()) {
                return Err(LoadError::TypeMismatch(format!(
                    "Invalid type for {} in {} bounds: expected {}, got {}",
                    name,
                    side,
                    column.data_type,
                    bound.data_type()
                )));
            }
        }
    }

    let min_keys: BTreeSet<_> = bounds.min.keys().collect();
    let max_keys: BTreeSet<_> = bounds.max.keys().collect();
    if min_keys != max_keys {
        return Err(LoadError::Validation(
            "min and max bounds must name the same columns".to_string(),
        ));
    }

    Ok(())
}

/// Keep the rows whose value lies in `[min, max]` for every bounded column.
///
/// Each row is tested once against all bounds, so a row matching several
/// bounded columns appears once. Null cells never match.
pub fn filter_data(table: &DataTable, bounds: &FilterBounds) -> Result<DataTable> {
    validate(table, bounds)?;

    let checks: Vec<_> = bounds
        .min
        .iter()
        .filter_map(|(name, min)| {
            let column = table.get_column(name)?;
            let max = bounds.max.get(name)?;
            Some((column, min, max))
        })
        .collect();

    let rows: Vec<usize> = (0..table.row_count())
        .filter(|&row| {
            checks
                .iter()
                .all(|(column, min, max)| within_bounds(&column.values[row], min, max))
        })
        .collect();

    debug!(
        "Filtered '{}' with {} bounded columns: {} of {} rows kept",
        table.name,
        checks.len(),
        rows.len(),
        table.row_count()
    );

    Ok(table.select_rows(&rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::datatable::{DataColumn, DataType};
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2019, 5, 6)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn people() -> DataTable {
        let mut table = DataTable::new("people");
        table
            .add_column(DataColumn::new(
                "age",
                DataType::Float,
                vec![
                    DataValue::Float(10.0),
                    DataValue::Float(20.0),
                    DataValue::Float(30.0),
                ],
            ))
            .unwrap();
        table
            .add_column(DataColumn::new(
                "seen",
                DataType::DateTime,
                vec![
                    DataValue::DateTime(at(10, 48)),
                    DataValue::DateTime(at(10, 50)),
                    DataValue::DateTime(at(10, 55)),
                ],
            ))
            .unwrap();
        table
    }

    #[test]
    fn test_single_range() {
        let bounds =
            FilterBounds::new().with_range("age", DataValue::Integer(15), DataValue::Integer(25));
        let filtered = filter_data(&people(), &bounds).unwrap();
        assert_eq!(filtered.row_count(), 1);
        assert_eq!(
            filtered.get_value_by_name(0, "age"),
            Some(&DataValue::Float(20.0))
        );
        assert_eq!(
            filtered.get_value_by_name(0, "seen"),
            Some(&DataValue::DateTime(at(10, 50)))
        );
    }

    #[test]
    fn test_multiple_ranges_intersect_without_duplicates() {
        let bounds = FilterBounds::new()
            .with_range("age", DataValue::Float(0.0), DataValue::Float(25.0))
            .with_range(
                "seen",
                DataValue::DateTime(at(10, 49)),
                DataValue::DateTime(at(11, 0)),
            );
        let filtered = filter_data(&people(), &bounds).unwrap();
        assert_eq!(filtered.row_count(), 1);
        assert_eq!(
            filtered.get_value_by_name(0, "age"),
            Some(&DataValue::Float(20.0))
        );
    }

    #[test]
    fn test_empty_bounds_keep_everything() {
        let table = people();
        let filtered = filter_data(&table, &FilterBounds::new()).unwrap();
        assert_eq!(filtered, table);
    }

    #[test]
    fn test_type_mismatch() {
        let bounds = FilterBounds::new().with_range(
            "age",
            DataValue::DateTime(at(0, 0)),
            DataValue::DateTime(at(1, 0)),
        );
        let err = filter_data(&people(), &bounds).unwrap_err();
        assert!(matches!(err, LoadError::TypeMismatch(_)));
    }

    #[test]
    fn test_mismatched_keys() {
        let mut bounds = FilterBounds::new();
        bounds.min.insert("age".into(), DataValue::Float(1.0));
        let err = filter_data(&people(), &bounds).unwrap_err();
        assert!(matches!(err, LoadError::Validation(_)));
    }

    #[test]
    fn test_unknown_column() {
        let bounds =
            FilterBounds::new().with_range("height", DataValue::Float(1.0), DataValue::Float(2.0));
        let err = filter_data(&people(), &bounds).unwrap_err();
        assert!(matches!(err, LoadError::Validation(_)));
    }
}
