use std::path::PathBuf;

/// Errors raised while loading, converting or filtering tables
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Not found: {}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    #[error("Cannot parse '{value}' as {expected}")]
    ParseFailure { value: String, expected: String },

    #[error("Index {index} is out of range for sequence of length {len}")]
    Range { index: usize, len: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl LoadError {
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        LoadError::NotFound {
            path: path.into(),
            source: None,
        }
    }

    pub fn parse_failure(value: &str, expected: impl Into<String>) -> Self {
        LoadError::ParseFailure {
            value: value.to_string(),
            expected: expected.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LoadError>;
