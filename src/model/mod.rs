//! Data model for audit results
//!
//! # Components
//!
//! - `AuditResult`: one record per input URL
//! - `HttpStatus`: a status code or the fetch-error sentinel
//! - `Semaphore`: the red/yellow/green verdict

mod result;
mod semaphore;

// Re-export main types
pub use result::{AuditResult, HttpStatus, FETCH_ERROR_MARKER};
pub use semaphore::Semaphore;
