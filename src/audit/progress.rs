//! Progress reporting for the batch runner
//!
//! The runner never touches display state directly; it reports each URL to a
//! `ProgressSink` supplied by the caller.

use std::fmt;
use std::io::Write;

/// Notification that processing of one URL is starting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    /// 1-based position of the URL in the input list
    pub index: usize,

    /// Number of URLs in the batch
    pub total: usize,

    /// The URL about to be fetched
    pub url: String,
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}/{}] Processing: {}", self.index, self.total, self.url)
    }
}

/// Receives progress events from the batch runner
///
/// Events arrive synchronously, in input order, before the corresponding
/// URL is fetched.
pub trait ProgressSink: Send + Sync {
    fn url_started(&self, event: &ProgressEvent);
}

impl<F> ProgressSink for F
where
    F: Fn(&ProgressEvent) + Send + Sync,
{
    fn url_started(&self, event: &ProgressEvent) {
        self(event)
    }
}

/// Writes one line per URL to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleProgressSink;

impl ProgressSink for ConsoleProgressSink {
    fn url_started(&self, event: &ProgressEvent) {
        let mut stdout = std::io::stdout().lock();
        // Flushed per line so the log keeps pace with slow fetches
        let _ = writeln!(stdout, "{}", event);
        let _ = stdout.flush();
    }
}

/// Discards all events
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgressSink;

impl ProgressSink for SilentProgressSink {
    fn url_started(&self, _event: &ProgressEvent) {}
}
