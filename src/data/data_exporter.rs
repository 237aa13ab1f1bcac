use crate::data::datatable::{DataTable, DISPLAY_DATETIME_FORMAT};
use crate::error::Result;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Writes typed tables to files
pub struct DataExporter;

impl DataExporter {
    /// Export as CSV with a header row. Nulls become empty fields.
    pub fn export_csv<P: AsRef<Path>>(table: &DataTable, path: P, delimiter: u8) -> Result<()> {
        let path = path.as_ref();
        let mut writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_path(path)?;

        writer.write_record(table.column_names())?;
        for row in 0..table.row_count() {
            let record: Vec<String> = table
                .columns
                .iter()
                .map(|c| c.values[row].format_with(DISPLAY_DATETIME_FORMAT))
                .collect();
            writer.write_record(&record)?;
        }
        writer.flush()?;

        info!("Exported {} rows to {}", table.row_count(), path.display());
        Ok(())
    }

    /// Build a JSON array with one object per row
    pub fn to_json_rows(table: &DataTable) -> Value {
        let rows = (0..table.row_count())
            .map(|row| {
                let mut object = Map::new();
                for column in &table.columns {
                    object.insert(column.name.clone(), column.values[row].to_json());
                }
                Value::Object(object)
            })
            .collect();
        Value::Array(rows)
    }

    /// Export as a pretty-printed JSON array of row objects
    pub fn export_json<P: AsRef<Path>>(table: &DataTable, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        let json = serde_json::to_string_pretty(&Self::to_json_rows(table))
            .map_err(std::io::Error::from)?;
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        info!("Exported {} rows to {}", table.row_count(), path.display());
        Ok(())
    }
}
