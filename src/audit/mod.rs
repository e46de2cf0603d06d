//! Audit module for per-URL analysis
//!
//! This module contains the core audit logic, including:
//! - HTTP fetching with a fixed timeout
//! - HTML parsing and SEO field extraction
//! - Semaphore classification
//! - The sequential batch loop and progress reporting

mod classifier;
mod extractor;
mod fetcher;
mod progress;
mod runner;

pub use classifier::classify;
pub use extractor::{extract, ExtractedFields};
pub use fetcher::{build_http_client, FetchOutcome, PageFetcher};
pub use progress::{ConsoleProgressSink, ProgressEvent, ProgressSink, SilentProgressSink};
pub use runner::{run_audit, AuditOutcome, BatchRunner};
