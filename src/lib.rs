//! SEO Audit: a batch traffic-light SEO checker
//!
//! This crate reads a list of URLs, fetches each page once, extracts basic SEO
//! signals (status, indexability, title and meta tags), classifies every URL
//! as red, yellow or green, and writes the results to a spreadsheet.

pub mod audit;
pub mod config;
pub mod input;
pub mod model;
pub mod output;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for audit operations
///
/// Per-URL failures never show up here: they are folded into the
/// `AuditResult` of that URL. Only batch-level failures are errors.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read URL list {}: {source}", .path.display())]
    InputRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Select a valid URL file: {} does not exist or is not a file", .path.display())]
    InvalidInputPath { path: PathBuf },

    #[error("Failed to write report {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        source: output::OutputError,
    },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Audit cancelled after {processed} of {total} URLs")]
    Cancelled { processed: usize, total: usize },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for audit operations
pub type Result<T> = std::result::Result<T, AuditError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use audit::{run_audit, AuditOutcome, BatchRunner, ProgressEvent, ProgressSink};
pub use config::Config;
pub use model::{AuditResult, HttpStatus, Semaphore};
