//! URL list input
//!
//! The input is plain UTF-8 text with one URL per line. Lines are trimmed,
//! blank lines are dropped, and everything else is kept verbatim: there is
//! no comment syntax, no header and no de-duplication.

use crate::AuditError;
use std::path::Path;

/// Reads the URL list from a file
///
/// # Returns
///
/// * `Ok(Vec<String>)` - The URLs, in file order
/// * `Err(AuditError::InputRead)` - The file is missing, unreadable, or not UTF-8
pub fn read_url_list(path: &Path) -> Result<Vec<String>, AuditError> {
    let content = std::fs::read_to_string(path).map_err(|source| AuditError::InputRead {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(parse_url_list(&content))
}

/// Splits URL list text into trimmed, non-blank lines
pub fn parse_url_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Returns true if the entry parses as an absolute http(s) URL
///
/// Entries failing this check are still audited; they simply end up as
/// fetch errors. Used by the dry run to point them out up front.
pub fn looks_fetchable(entry: &str) -> bool {
    match url::Url::parse(entry) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}
