//! Configuration module for the audit
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every key has a default, so the tool runs without one.
//!
//! # Example
//!
//! ```no_run
//! use seo_audit::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("audit.toml")).unwrap();
//! println!("Report file: {}", config.output.file_name);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, FetcherConfig, OutputConfig, UserAgentConfig, DEFAULT_REPORT_FILE_NAME,
    DEFAULT_TIMEOUT_SECS,
};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default, parse_config};
