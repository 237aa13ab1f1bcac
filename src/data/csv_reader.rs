/// Delimited text to raw string columns
use crate::data::datatable::{RawColumn, RawTable};
use crate::error::{LoadError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

/// What to do with rows that have fewer fields than there are columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RaggedRows {
    /// Fill the missing trailing cells with empty (missing) values
    #[default]
    Pad,
    /// Fail the read with a validation error
    Reject,
}

/// Options controlling how a delimited file is split into columns
#[derive(Debug, Clone, PartialEq)]
pub struct ReadOptions {
    pub delimiter: u8,
    /// First row holds column names
    pub header: bool,
    /// Explicit names, taking precedence over the header row
    pub column_names: Option<Vec<String>>,
    pub ragged_rows: RaggedRows,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            header: false,
            column_names: None,
            ragged_rows: RaggedRows::Pad,
        }
    }
}

/// A short row that was padded while reading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaggedRow {
    pub line: u64,
    pub fields: usize,
    pub expected: usize,
}

/// Result of reading a file: raw columns plus any rows that had to be padded
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRead {
    pub table: RawTable,
    pub ragged_rows: Vec<RaggedRow>,
}

fn open(path: &Path) -> Result<File> {
    if !path.is_file() {
        return Err(LoadError::not_found(path));
    }
    File::open(path).map_err(|e| LoadError::NotFound {
        path: path.to_path_buf(),
        source: Some(e),
    })
}

/// Read `path` into raw string columns
pub fn read_file<P: AsRef<Path>>(path: P, options: &ReadOptions) -> Result<RawRead> {
    let path = path.as_ref();
    info!("Reading {} into raw columns", path.display());

    let file = open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(file);
    let mut records = reader.records();

    let explicit = options
        .column_names
        .as_ref()
        .filter(|names| !names.is_empty());

    // The first record is either the header or data row 0
    let mut pending = None;
    let names: Vec<String> = match explicit {
        Some(names) => {
            // The header text would not parse as a typed value
            if options.header {
                records.next().transpose()?;
            }
            names.clone()
        }
        None => {
            let first = records.next().transpose()?.ok_or_else(|| {
                LoadError::Validation(format!(
                    "{} is empty, cannot resolve column names",
                    path.display()
                ))
            })?;
            if options.header {
                first.iter().map(|s| s.to_string()).collect()
            } else {
                let synthesized = (0..first.len()).map(|i| i.to_string()).collect();
                pending = Some(first);
                synthesized
            }
        }
    };

    if names.is_empty() {
        return Err(LoadError::Validation(
            "Column names must be a non-empty list".to_string(),
        ));
    }

    // Duplicate names share one column; position -> column slot
    let mut columns: Vec<RawColumn> = Vec::new();
    let mut slot_by_name: HashMap<&str, usize> = HashMap::new();
    let mut slots = Vec::with_capacity(names.len());
    for name in &names {
        let slot = *slot_by_name.entry(name.as_str()).or_insert_with(|| {
            columns.push(RawColumn::new(name.clone()));
            columns.len() - 1
        });
        slots.push(slot);
    }
    if columns.len() != names.len() {
        debug!(
            "{} duplicate column names collapsed",
            names.len() - columns.len()
        );
    }

    let mut ragged_rows = Vec::new();
    for record in pending.map(Ok).into_iter().chain(records) {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.len() < names.len() {
            match options.ragged_rows {
                RaggedRows::Reject => {
                    return Err(LoadError::Validation(format!(
                        "Line {} has {} fields but {} columns were expected",
                        line,
                        record.len(),
                        names.len()
                    )));
                }
                RaggedRows::Pad => {
                    debug!(
                        "Line {} has {} fields, padding to {}",
                        line,
                        record.len(),
                        names.len()
                    );
                    ragged_rows.push(RaggedRow {
                        line,
                        fields: record.len(),
                        expected: names.len(),
                    });
                }
            }
        }

        let mut cells = vec![String::new(); columns.len()];
        for (position, field) in record.iter().take(names.len()).enumerate() {
            cells[slots[position]] = field.to_string();
        }
        for (column, cell) in columns.iter_mut().zip(cells) {
            column.values.push(cell);
        }
    }

    let table = RawTable { columns };
    info!(
        "Read {}: {} rows, {} columns",
        path.display(),
        table.row_count(),
        table.columns.len()
    );

    Ok(RawRead { table, ragged_rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn values(table: &RawTable, name: &str) -> Vec<String> {
        table.get_column(name).unwrap().values.clone()
    }

    #[test]
    fn test_header_row_gives_names() {
        let file = write_temp("a,b\n1,2\n3,4\n");
        let options = ReadOptions {
            header: true,
            ..Default::default()
        };
        let read = read_file(file.path(), &options).unwrap();
        assert_eq!(read.table.column_names(), vec!["a", "b"]);
        assert_eq!(values(&read.table, "a"), vec!["1", "3"]);
        assert_eq!(values(&read.table, "b"), vec!["2", "4"]);
    }

    #[test]
    fn test_synthesized_names_keep_first_row() {
        let file = write_temp("1,2,3\n4,5,6\n");
        let read = read_file(file.path(), &ReadOptions::default()).unwrap();
        assert_eq!(read.table.column_names(), vec!["0", "1", "2"]);
        assert_eq!(values(&read.table, "0"), vec!["1", "4"]);
        assert_eq!(read.table.row_count(), 2);
    }

    #[test]
    fn test_explicit_names_take_precedence() {
        let file = write_temp("a,b\n1,2\n");
        let options = ReadOptions {
            header: true,
            column_names: Some(vec!["x".into(), "y".into()]),
            ..Default::default()
        };
        let read = read_file(file.path(), &options).unwrap();
        assert_eq!(read.table.column_names(), vec!["x", "y"]);
        assert_eq!(values(&read.table, "x"), vec!["1"]);

        let options = ReadOptions {
            header: false,
            column_names: Some(vec!["x".into(), "y".into()]),
            ..Default::default()
        };
        let read = read_file(file.path(), &options).unwrap();
        assert_eq!(values(&read.table, "x"), vec!["a", "1"]);
    }

    #[test]
    fn test_custom_delimiter() {
        let file = write_temp("1;2\n3;4\n");
        let options = ReadOptions {
            delimiter: b';',
            ..Default::default()
        };
        let read = read_file(file.path(), &options).unwrap();
        assert_eq!(values(&read.table, "1"), vec!["2", "4"]);
    }

    #[test]
    fn test_duplicate_names_last_write_wins() {
        let file = write_temp("1,2,3\n");
        let options = ReadOptions {
            column_names: Some(vec!["a".into(), "b".into(), "a".into()]),
            ..Default::default()
        };
        let read = read_file(file.path(), &options).unwrap();
        assert_eq!(read.table.column_names(), vec!["a", "b"]);
        assert_eq!(values(&read.table, "a"), vec!["3"]);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let file = write_temp("a,b,c\n1,2,3\n4\n5,6,7,8\n");
        let options = ReadOptions {
            header: true,
            ..Default::default()
        };
        let read = read_file(file.path(), &options).unwrap();
        assert_eq!(values(&read.table, "b"), vec!["2", "", "6"]);
        assert_eq!(values(&read.table, "c"), vec!["3", "", "7"]);
        assert_eq!(read.ragged_rows.len(), 1);
        assert_eq!(read.ragged_rows[0].fields, 1);
        assert_eq!(read.ragged_rows[0].expected, 3);
    }

    #[test]
    fn test_short_rows_rejected() {
        let file = write_temp("a,b\n1\n");
        let options = ReadOptions {
            header: true,
            ragged_rows: RaggedRows::Reject,
            ..Default::default()
        };
        let err = read_file(file.path(), &options).unwrap_err();
        assert!(matches!(err, LoadError::Validation(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = read_file("/definitely/not/here.csv", &ReadOptions::default()).unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
    }

    #[test]
    fn test_empty_file_without_names() {
        let file = write_temp("");
        let err = read_file(file.path(), &ReadOptions::default()).unwrap_err();
        assert!(matches!(err, LoadError::Validation(_)));
    }
}
