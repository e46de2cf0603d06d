//! Report writer trait and error types
//!
//! This module defines the interface the audit uses to persist its results,
//! and the errors a writer can report.

use crate::model::AuditResult;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while writing a report
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to build spreadsheet: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for report writers
///
/// A writer persists the full, ordered result list in one go. It must
/// replace any existing file at `path` and write the header even when
/// `results` is empty.
pub trait ReportWriter {
    /// Writes all results to `path`
    ///
    /// # Arguments
    ///
    /// * `results` - One record per audited URL, in input order
    /// * `path` - Destination file, overwritten if present
    fn write_report(&self, results: &[AuditResult], path: &Path) -> OutputResult<()>;
}
