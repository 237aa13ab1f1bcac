//! Loading pipeline and the per-session table cache.
//!
//! A [`TableSession`] owns a [`TableCache`] and a notice sink. Loading a path
//! runs parse, classify and convert once; later loads of the same path return
//! the cached table without touching the file again.

use crate::data::csv_reader::{read_file, ReadOptions};
use crate::data::datatable::DataTable;
use crate::data::type_converter::{to_datetime, to_numeric, NumericOptions, TemporalOptions};
use crate::data::type_inference::{classify_column, ColumnKind, DEFAULT_TEST_SIZE};
use crate::error::Result;
use crate::notice::{Notice, NoticeSink, TracingNotices};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Everything needed to turn a file into a typed table
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOptions {
    pub read: ReadOptions,
    pub numeric: NumericOptions,
    pub temporal: TemporalOptions,
    /// Non-empty cells sampled when classifying a column
    pub test_size: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            read: ReadOptions::default(),
            numeric: NumericOptions::default(),
            temporal: TemporalOptions::default(),
            test_size: DEFAULT_TEST_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub total_rows: usize,
}

/// Fully converted tables keyed by source path
#[derive(Debug, Default)]
pub struct TableCache {
    tables: HashMap<String, Arc<DataTable>>,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Arc<DataTable>> {
        self.tables.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.tables.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, table: DataTable) -> Arc<DataTable> {
        let table = Arc::new(table);
        self.tables.insert(key.into(), Arc::clone(&table));
        table
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn clear(&mut self) {
        self.tables.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.tables.len(),
            total_rows: self.tables.values().map(|t| t.row_count()).sum(),
        }
    }
}

/// Cache key for a path: the path text as given by the caller
pub fn cache_key(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Parse, classify and convert a file without consulting any cache
pub fn build_table(
    path: &Path,
    options: &LoadOptions,
    sink: &dyn NoticeSink,
) -> Result<DataTable> {
    let key = cache_key(path);
    let read = read_file(path, &options.read)?;

    for ragged in &read.ragged_rows {
        sink.notify(Notice::RaggedRowPadded {
            path: key.clone(),
            line: ragged.line,
            fields: ragged.fields,
            expected: ragged.expected,
        });
    }

    let mut table = DataTable::new(key.clone());
    for raw in &read.table.columns {
        let kind = classify_column(&raw.values, options.test_size);
        debug!("Column '{}' classified as {:?}", raw.name, kind);

        let column = match kind {
            ColumnKind::Numeric => to_numeric(&raw.name, &raw.values, &options.numeric)?,
            ColumnKind::Temporal => to_datetime(&raw.name, &raw.values, &options.temporal)?,
        };
        table.add_column(column)?;
    }

    table.metadata.insert("source".to_string(), key);
    table
        .metadata
        .insert("padded_rows".to_string(), read.ragged_rows.len().to_string());

    Ok(table)
}

/// Owns the table cache and the notice sink for one run
pub struct TableSession {
    cache: TableCache,
    notices: Box<dyn NoticeSink>,
}

impl Default for TableSession {
    fn default() -> Self {
        Self::new()
    }
}

impl TableSession {
    /// Session reporting notices through `tracing`
    pub fn new() -> Self {
        Self::with_sink(Box::new(TracingNotices))
    }

    pub fn with_sink(notices: Box<dyn NoticeSink>) -> Self {
        Self {
            cache: TableCache::new(),
            notices,
        }
    }

    pub fn cache(&self) -> &TableCache {
        &self.cache
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Load `path` as a typed table, serving repeated paths from the cache.
    ///
    /// The cache key is the path alone, so a second call with different
    /// options still returns the first result. Failed loads are not cached.
    pub fn load<P: AsRef<Path>>(
        &mut self,
        path: P,
        options: &LoadOptions,
    ) -> Result<Arc<DataTable>> {
        let path = path.as_ref();
        let key = cache_key(path);

        if let Some(table) = self.cache.get(&key) {
            self.notices.notify(Notice::CacheHit { path: key });
            return Ok(table);
        }

        let table = build_table(path, options, self.notices.as_ref())?;
        info!(
            "Loaded {}: {} rows, {} columns",
            key,
            table.row_count(),
            table.column_count()
        );
        Ok(self.cache.insert(key, table))
    }
}
