//! Configuration module
//!
//! TOML-backed settings that resolve into pipeline load options.

pub mod config;

pub use config::Config;
