use crate::error::{LoadError, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Format used when rendering datetime cells as text
pub const DISPLAY_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Represents the data type of a typed column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Integer,
    Float,
    DateTime,
    Null,
}

impl DataType {
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Integer | DataType::Float)
    }

    /// Whether values of `other` may be compared against a column of this type.
    /// Integer and float are interchangeable, everything else must match exactly.
    pub fn is_compatible_with(&self, other: &DataType) -> bool {
        self == other || (self.is_numeric() && other.is_numeric())
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Integer => "integer",
            DataType::Float => "float",
            DataType::DateTime => "datetime",
            DataType::Null => "null",
        };
        write!(f, "{}", name)
    }
}

/// A single cell value in a typed column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataValue {
    Integer(i64),
    Float(f64),
    DateTime(NaiveDateTime),
    Null,
}

impl DataValue {
    pub fn is_null(&self) -> bool {
        matches!(self, DataValue::Null)
    }

    pub fn data_type(&self) -> DataType {
        match self {
            DataValue::Integer(_) => DataType::Integer,
            DataValue::Float(_) => DataType::Float,
            DataValue::DateTime(_) => DataType::DateTime,
            DataValue::Null => DataType::Null,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DataValue::Integer(i) => Some(*i as f64),
            DataValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Render with an explicit datetime format; `Null` renders empty
    pub fn format_with(&self, datetime_format: &str) -> String {
        match self {
            DataValue::DateTime(dt) => dt.format(datetime_format).to_string(),
            other => other.to_string(),
        }
    }

    /// Plain JSON representation used by exporters
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            DataValue::Integer(i) => serde_json::Value::from(*i),
            DataValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            DataValue::DateTime(dt) => {
                serde_json::Value::String(dt.format(DISPLAY_DATETIME_FORMAT).to_string())
            }
            DataValue::Null => serde_json::Value::Null,
        }
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Integer(i) => write!(f, "{}", i),
            DataValue::Float(fl) => write!(f, "{}", fl),
            DataValue::DateTime(dt) => write!(f, "{}", dt.format(DISPLAY_DATETIME_FORMAT)),
            DataValue::Null => write!(f, ""),
        }
    }
}

/// A named column of raw strings, one per row. Empty means missing.
#[derive(Debug, Clone, PartialEq)]
pub struct RawColumn {
    pub name: String,
    pub values: Vec<String>,
}

impl RawColumn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Raw string columns as read from a delimited file, in source order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub columns: Vec<RawColumn>,
}

impl RawTable {
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn get_column(&self, name: &str) -> Option<&RawColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map(|c| c.len()).unwrap_or(0)
    }
}

/// A typed column: every non-null value shares `data_type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataColumn {
    pub name: String,
    pub data_type: DataType,
    pub values: Vec<DataValue>,
}

impl DataColumn {
    pub fn new(name: impl Into<String>, data_type: DataType, values: Vec<DataValue>) -> Self {
        Self {
            name: name.into(),
            data_type,
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }

    pub fn get(&self, index: usize) -> Option<&DataValue> {
        self.values.get(index)
    }
}

/// Column-oriented table of typed values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataTable {
    pub name: String,
    pub columns: Vec<DataColumn>,
    pub metadata: HashMap<String, String>,
}

impl DataTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            metadata: HashMap::new(),
        }
    }

    /// Append a column. It must be as long as the existing ones and its name unused.
    pub fn add_column(&mut self, column: DataColumn) -> Result<&mut Self> {
        if self.get_column_index(&column.name).is_some() {
            return Err(LoadError::Validation(format!(
                "Column '{}' already exists in table '{}'",
                column.name, self.name
            )));
        }
        if !self.columns.is_empty() && column.len() != self.row_count() {
            return Err(LoadError::Validation(format!(
                "Column '{}' has {} values but table has {} rows",
                column.name,
                column.len(),
                self.row_count()
            )));
        }
        self.columns.push(column);
        Ok(self)
    }

    pub fn get_column(&self, name: &str) -> Option<&DataColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn get_column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Get column names as a vector
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Get a value at specific row and column
    pub fn get_value(&self, row: usize, col: usize) -> Option<&DataValue> {
        self.columns.get(col)?.get(row)
    }

    /// Get a value by row index and column name
    pub fn get_value_by_name(&self, row: usize, col_name: &str) -> Option<&DataValue> {
        self.get_column(col_name)?.get(row)
    }

    /// Get a single row as strings
    pub fn get_row_as_strings(&self, index: usize) -> Option<Vec<String>> {
        if index >= self.row_count() {
            return None;
        }
        Some(
            self.columns
                .iter()
                .map(|c| c.values[index].to_string())
                .collect(),
        )
    }

    /// New table with the same columns holding only the given rows, in the given order
    pub fn select_rows(&self, indices: &[usize]) -> DataTable {
        let columns = self
            .columns
            .iter()
            .map(|c| {
                let values = indices
                    .iter()
                    .filter_map(|&i| c.values.get(i).cloned())
                    .collect();
                DataColumn::new(c.name.clone(), c.data_type, values)
            })
            .collect();

        DataTable {
            name: self.name.clone(),
            columns,
            metadata: self.metadata.clone(),
        }
    }

    /// Get table statistics
    pub fn get_stats(&self) -> DataTableStats {
        DataTableStats {
            row_count: self.row_count(),
            column_count: self.column_count(),
            null_count: self.columns.iter().map(|c| c.null_count()).sum(),
        }
    }

    /// Generate a debug dump string for display
    pub fn debug_dump(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("DataTable: {}\n", self.name));
        output.push_str(&format!(
            "Rows: {} | Columns: {}\n",
            self.row_count(),
            self.column_count()
        ));

        if !self.metadata.is_empty() {
            let mut keys: Vec<_> = self.metadata.keys().collect();
            keys.sort();
            output.push_str("Metadata:\n");
            for key in keys {
                output.push_str(&format!("  {}: {}\n", key, self.metadata[key]));
            }
        }

        output.push_str("\nColumns:\n");
        for column in &self.columns {
            output.push_str(&format!("  {} ({})", column.name, column.data_type));
            let nulls = column.null_count();
            if nulls > 0 {
                output.push_str(&format!(" - {} nulls", nulls));
            }
            output.push('\n');
        }

        output
    }
}

/// Statistics about a DataTable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataTableStats {
    pub row_count: usize,
    pub column_count: usize,
    pub null_count: usize,
}
