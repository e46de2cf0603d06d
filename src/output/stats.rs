//! Statistics over a finished audit
//!
//! This module aggregates audit results into counts and prints them in the
//! closing summary.

use crate::model::{AuditResult, Semaphore};
use std::collections::BTreeMap;

/// Audit statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditStatistics {
    /// Number of URLs audited
    pub total: u64,

    /// Count of URLs per semaphore
    pub by_semaphore: BTreeMap<&'static str, u64>,

    /// Count of URLs per HTTP status code
    pub by_status_code: BTreeMap<u16, u64>,

    /// URLs whose fetch failed before a status was obtained
    pub fetch_errors: u64,

    /// URLs reported as not indexable, for any reason
    pub non_indexable: u64,
}

impl AuditStatistics {
    /// Aggregates a result list
    pub fn from_results(results: &[AuditResult]) -> Self {
        let mut stats = Self::default();

        for result in results {
            stats.total += 1;
            *stats
                .by_semaphore
                .entry(result.semaphore().label())
                .or_insert(0) += 1;

            match result.status().code() {
                Some(code) => *stats.by_status_code.entry(code).or_insert(0) += 1,
                None => stats.fetch_errors += 1,
            }

            if !result.indexable() {
                stats.non_indexable += 1;
            }
        }

        stats
    }

    /// Number of URLs with the given semaphore
    pub fn count(&self, semaphore: Semaphore) -> u64 {
        self.by_semaphore
            .get(semaphore.label())
            .copied()
            .unwrap_or(0)
    }

    /// Share of green URLs, as a percentage
    pub fn green_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.count(Semaphore::Green) as f64 / self.total as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &AuditStatistics) {
    println!("=== Audit Statistics ===\n");

    println!("Overview:");
    println!("  URLs audited: {}", stats.total);
    println!("  Not indexable: {}", stats.non_indexable);
    println!("  Fetch errors: {}", stats.fetch_errors);
    println!("  Green rate: {:.1}%", stats.green_rate());
    println!();

    println!("Semaphore:");
    for semaphore in Semaphore::all() {
        let count = stats.count(semaphore);
        let percentage = if stats.total > 0 {
            (count as f64 / stats.total as f64) * 100.0
        } else {
            0.0
        };
        println!(
            "  {} {}: {} ({:.1}%)",
            semaphore.marker(),
            semaphore.label(),
            count,
            percentage
        );
    }
    println!();

    if !stats.by_status_code.is_empty() {
        println!("Status Codes:");
        for (code, count) in &stats.by_status_code {
            println!("  {}: {}", code, count);
        }
        println!();
    }
}
