use crate::data::csv_reader::{RaggedRows, ReadOptions};
use crate::data::type_converter::{parse_datetime, NumericKind, NumericOptions, TemporalOptions};
use crate::data::type_inference::DEFAULT_TEST_SIZE;
use crate::error::LoadError;
use crate::session::LoadOptions;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Datetime format used when none is configured
pub const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub read: ReadConfig,
    pub convert: ConvertConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadConfig {
    /// Single ASCII field separator
    pub delimiter: char,

    /// First row holds column names
    pub header: bool,

    /// Explicit column names, overriding the header row
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_names: Option<Vec<String>>,

    /// "pad" or "reject" rows with fewer fields than columns
    pub ragged_rows: RaggedRows,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Non-empty cells sampled when classifying a column
    pub test_size: usize,

    /// Repair gaps from the next value (true) or the previous one (false)
    pub use_next: bool,

    /// "float" or "integer"
    pub numeric_kind: NumericKind,

    /// Fallback for numeric gaps without a neighbor; unset leaves them empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric_default: Option<f64>,

    /// chrono format for datetime columns
    pub datetime_format: String,

    /// Fallback for datetime gaps, written in `datetime_format`; unset means now
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime_default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// chrono format for rendering datetime cells
    pub datetime_format: String,
}

impl Default for ReadConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            header: false,
            column_names: None,
            ragged_rows: RaggedRows::Pad,
        }
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            test_size: DEFAULT_TEST_SIZE,
            use_next: true,
            numeric_kind: NumericKind::Float,
            numeric_default: None,
            datetime_format: DEFAULT_DATETIME_FORMAT.to_string(),
            datetime_default: None,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            datetime_format: DEFAULT_DATETIME_FORMAT.to_string(),
        }
    }
}

impl Config {
    /// Load from the default location, falling back to defaults when absent
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        if !config_path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&config_path)
    }

    /// Load from an explicit TOML file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Write the commented default config to `path`, refusing to overwrite
    pub fn write_default(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config already exists at {}", path.display());
        }

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, Self::create_default_with_comments())?;
        Ok(())
    }

    /// Get the default config file path
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("csv-inspect").join("config.toml"))
    }

    /// Resolve into pipeline options
    pub fn to_load_options(&self) -> std::result::Result<LoadOptions, LoadError> {
        let delimiter = u8::try_from(self.read.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                LoadError::Validation(format!(
                    "Delimiter '{}' must be a single ASCII character",
                    self.read.delimiter
                ))
            })?;

        let datetime_default = self
            .convert
            .datetime_default
            .as_deref()
            .map(|s| parse_datetime(s, &self.convert.datetime_format))
            .transpose()?;

        Ok(LoadOptions {
            read: ReadOptions {
                delimiter,
                header: self.read.header,
                column_names: self.read.column_names.clone(),
                ragged_rows: self.read.ragged_rows,
            },
            numeric: NumericOptions {
                default: self.convert.numeric_default,
                kind: self.convert.numeric_kind,
                use_next: self.convert.use_next,
            },
            temporal: TemporalOptions {
                default: datetime_default,
                format: self.convert.datetime_format.clone(),
                use_next: self.convert.use_next,
            },
            test_size: self.convert.test_size,
        })
    }

    /// Create a default config file with comments
    pub fn create_default_with_comments() -> String {
        r#"# csv-inspect configuration
# Location: ~/.config/csv-inspect/config.toml (Linux)

[read]
# Single ASCII field separator
delimiter = ","

# Treat the first row as column names
header = false

# Explicit names override the header row
# column_names = ["time", "power"]

# "pad" fills short rows with missing values, "reject" fails the load
ragged_rows = "pad"

[convert]
# Non-empty cells sampled to decide whether a column is numeric
test_size = 10

# Repair a missing cell from the next value (true) or the previous one (false)
use_next = true

# "float" or "integer"
numeric_kind = "float"

# Value for numeric gaps with no neighbor; leave unset to keep them empty
# numeric_default = 0.0

# chrono format for datetime columns
datetime_format = "%Y-%m-%d %H:%M:%S"

# Value for datetime gaps with no neighbor; unset means the load time
# datetime_default = "2000-01-01 00:00:00"

[display]
datetime_format = "%Y-%m-%d %H:%M:%S"
"#
        .to_string()
    }
}
