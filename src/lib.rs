//! Load delimited text files into typed, column-oriented tables.
//!
//! Columns are classified as numeric or datetime, converted, and missing
//! cells are repaired from their nearest non-empty neighbor. Loaded tables
//! are cached per path inside a [`session::TableSession`].

pub mod config;
pub mod data;
pub mod dir_check;
pub mod error;
pub mod notice;
pub mod session;
pub mod table_display;
pub mod utils;

pub use data::datatable::{DataColumn, DataTable, DataType, DataValue, RawColumn, RawTable};
pub use data::table_filter::{filter_data, FilterBounds};
pub use error::{LoadError, Result};
pub use session::{LoadOptions, TableCache, TableSession};
