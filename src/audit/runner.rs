//! Batch runner - main audit orchestration logic
//!
//! This module contains the loop that walks the URL list and coordinates
//! fetching, extraction and classification for every URL, plus `run_audit`,
//! which wraps the loop with reading the list and writing the report.

use crate::audit::extractor::extract;
use crate::audit::fetcher::{FetchOutcome, PageFetcher};
use crate::audit::progress::{ProgressEvent, ProgressSink};
use crate::config::Config;
use crate::input::read_url_list;
use crate::model::{AuditResult, HttpStatus};
use crate::output::{report_path_for, AuditStatistics, ReportWriter, XlsxReportWriter};
use crate::AuditError;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;

/// Sequential audit of a URL list
pub struct BatchRunner {
    fetcher: PageFetcher,
    cancel: CancellationToken,
}

impl BatchRunner {
    /// Creates a runner that can only be stopped by finishing
    pub fn new(fetcher: PageFetcher) -> Self {
        Self {
            fetcher,
            cancel: CancellationToken::new(),
        }
    }

    /// Attaches a cancellation token, checked between URLs
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Audits every URL, in order, one at a time
    ///
    /// A progress event is emitted before each URL is fetched. Per-URL
    /// failures are recorded in that URL's result and never stop the batch,
    /// so on success the output has exactly one record per input URL, in
    /// input order.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<AuditResult>)` - One record per input URL
    /// * `Err(AuditError::Cancelled)` - The token was cancelled between URLs
    pub async fn run(
        &self,
        urls: &[String],
        progress: &dyn ProgressSink,
    ) -> Result<Vec<AuditResult>, AuditError> {
        let total = urls.len();
        let mut results = Vec::with_capacity(total);

        tracing::info!("Starting audit of {} URLs", total);

        for (i, url) in urls.iter().enumerate() {
            if self.cancel.is_cancelled() {
                tracing::warn!("Audit cancelled after {} of {} URLs", i, total);
                return Err(AuditError::Cancelled {
                    processed: i,
                    total,
                });
            }

            progress.url_started(&ProgressEvent {
                index: i + 1,
                total,
                url: url.clone(),
            });

            let result = self.audit_url(url).await;
            tracing::debug!(
                "{} -> status {}, indexable {}, {}",
                url,
                result.status(),
                result.indexable(),
                result.semaphore()
            );
            results.push(result);
        }

        Ok(results)
    }

    /// Audits a single URL
    async fn audit_url(&self, url: &str) -> AuditResult {
        match self.fetcher.fetch(url).await {
            FetchOutcome::Page {
                status: 200,
                body: Some(body),
            } => AuditResult::from_page(url, HttpStatus::Code(200), extract(&body)),
            FetchOutcome::Page { status, .. } => AuditResult::from_status(url, status),
            FetchOutcome::Failed => AuditResult::from_fetch_error(url),
        }
    }
}

/// Everything produced by one complete audit
#[derive(Debug, Clone)]
pub struct AuditOutcome {
    /// One record per input URL, in input order
    pub results: Vec<AuditResult>,

    /// Where the spreadsheet was written
    pub report_path: PathBuf,

    /// Aggregate counts over `results`
    pub statistics: AuditStatistics,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl AuditOutcome {
    /// Wall-clock duration of the batch, in seconds
    pub fn duration_seconds(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }
}

/// Runs a complete audit
///
/// This function orchestrates the whole batch:
///
/// 1. Read the URL list (fails before any fetch if it cannot be read)
/// 2. Build the HTTP client
/// 3. Audit every URL in order, reporting progress
/// 4. Write the spreadsheet next to the URL list, replacing any old one
///
/// # Arguments
///
/// * `input_path` - The line-delimited URL list
/// * `config` - Fetcher, user agent and output settings
/// * `progress` - Receives one event per URL
/// * `cancel` - Cooperative cancellation, checked between URLs
///
/// # Example
///
/// ```no_run
/// use seo_audit::audit::{run_audit, ConsoleProgressSink};
/// use seo_audit::config::Config;
/// use std::path::Path;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let outcome = run_audit(
///     Path::new("urls.txt"),
///     &Config::default(),
///     &ConsoleProgressSink,
///     CancellationToken::new(),
/// )
/// .await?;
/// println!("Report: {}", outcome.report_path.display());
/// # Ok(())
/// # }
/// ```
pub async fn run_audit(
    input_path: &Path,
    config: &Config,
    progress: &dyn ProgressSink,
    cancel: CancellationToken,
) -> Result<AuditOutcome, AuditError> {
    let urls = read_url_list(input_path)?;
    tracing::info!("Read {} URLs from {}", urls.len(), input_path.display());

    let fetcher = PageFetcher::from_config(&config.fetcher, &config.user_agent)?;
    let runner = BatchRunner::new(fetcher).with_cancellation(cancel);

    let started_at = Utc::now();
    let results = runner.run(&urls, progress).await?;
    let finished_at = Utc::now();

    let report_path = report_path_for(input_path, &config.output.file_name);
    XlsxReportWriter::new()
        .write_report(&results, &report_path)
        .map_err(|source| AuditError::OutputWrite {
            path: report_path.clone(),
            source,
        })?;
    tracing::info!("Report written to {}", report_path.display());

    let statistics = AuditStatistics::from_results(&results);

    Ok(AuditOutcome {
        results,
        report_path,
        statistics,
        started_at,
        finished_at,
    })
}
