//! Data layer: raw parsing, classification, typed conversion and filtering
//!
//! Raw string columns flow through the classifier and the converter to
//! become a column-oriented `DataTable`.

// Core data modules
pub mod datatable;
pub mod datavalue_compare;

// Loading pipeline stages
pub mod csv_reader;
pub mod neighbor_search;
pub mod type_converter;
pub mod type_inference;

// Operations on typed tables
pub mod data_exporter;
pub mod table_filter;
