//! Output module for audit reports
//!
//! This module handles:
//! - Writing audit results to a spreadsheet
//! - Locating the report next to the URL list
//! - Aggregating and printing audit statistics

pub mod stats;
mod traits;
mod xlsx;

pub use stats::{print_statistics, AuditStatistics};
pub use traits::{OutputError, OutputResult, ReportWriter};
pub use xlsx::{render_workbook, report_row, ReportCell, XlsxReportWriter, REPORT_HEADERS};

use std::path::{Path, PathBuf};

/// Returns the report path for a URL list: `file_name` in the list's directory
///
/// A bare input file name yields a path relative to the working directory.
pub fn report_path_for(input_path: &Path, file_name: &str) -> PathBuf {
    input_path
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(file_name)
}
