//! Spreadsheet report generation
//!
//! This module renders audit results as an `.xlsx` workbook with a single
//! sheet: one header row followed by one row per audited URL.

use crate::model::{AuditResult, HttpStatus, FETCH_ERROR_MARKER};
use crate::output::traits::{OutputResult, ReportWriter};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

/// Column headers, in report order
pub const REPORT_HEADERS: [&str; 7] = [
    "URL",
    "Status",
    "Indexable",
    "Title",
    "MetaTitle",
    "MetaDescription",
    "Semaforo",
];

/// Column widths, matching `REPORT_HEADERS`
const COLUMN_WIDTHS: [f64; 7] = [50.0, 8.0, 10.0, 40.0, 40.0, 60.0, 10.0];

/// Longest string Excel accepts in a cell
const MAX_CELL_CHARS: usize = 32_767;

/// A single spreadsheet cell
#[derive(Debug, Clone, PartialEq)]
pub enum ReportCell {
    Text(String),
    Number(f64),
}

impl ReportCell {
    fn text(value: &str) -> Self {
        match value.char_indices().nth(MAX_CELL_CHARS) {
            Some((cut, _)) => Self::Text(value[..cut].to_string()),
            None => Self::Text(value.to_string()),
        }
    }
}

/// Formats one audit result as a report row
///
/// - `Status` is numeric, or the literal `Error` after a failed fetch
/// - `Indexable` is `SI` or `NO`
/// - `Semaforo` is the semaphore glyph
pub fn report_row(result: &AuditResult) -> [ReportCell; 7] {
    let status = match result.status() {
        HttpStatus::Code(code) => ReportCell::Number(f64::from(code)),
        HttpStatus::FetchError => ReportCell::text(FETCH_ERROR_MARKER),
    };

    [
        ReportCell::text(result.url()),
        status,
        ReportCell::text(if result.indexable() { "SI" } else { "NO" }),
        ReportCell::text(result.title()),
        ReportCell::text(result.meta_title()),
        ReportCell::text(result.meta_description()),
        ReportCell::text(result.semaphore().marker()),
    ]
}

/// Renders the workbook to an in-memory `.xlsx` file
pub fn render_workbook(results: &[AuditResult]) -> OutputResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    write_header(worksheet)?;

    for (i, result) in results.iter().enumerate() {
        // Row 0 is the header
        let row = (i + 1) as u32;
        for (col, cell) in report_row(result).iter().enumerate() {
            let col = col as u16;
            match cell {
                ReportCell::Text(value) => {
                    worksheet.write_string(row, col, value)?;
                }
                ReportCell::Number(value) => {
                    worksheet.write_number(row, col, *value)?;
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_header(worksheet: &mut Worksheet) -> OutputResult<()> {
    let bold = Format::new().set_bold();

    for (col, (header, width)) in REPORT_HEADERS.iter().zip(COLUMN_WIDTHS).enumerate() {
        let col = col as u16;
        worksheet.write_string_with_format(0, col, *header, &bold)?;
        worksheet.set_column_width(col, width)?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    Ok(())
}

/// Writes audit results as an `.xlsx` spreadsheet
#[derive(Debug, Default, Clone, Copy)]
pub struct XlsxReportWriter;

impl XlsxReportWriter {
    pub fn new() -> Self {
        Self
    }
}

impl ReportWriter for XlsxReportWriter {
    fn write_report(&self, results: &[AuditResult], path: &Path) -> OutputResult<()> {
        let bytes = render_workbook(results)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}
