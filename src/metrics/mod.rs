//! Metrics collection module
//!
//! Counts API calls and failures over one search run.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters shared by every page task of a run
#[derive(Debug, Default)]
pub struct SearchMetrics {
    page_fetches: AtomicU64,
    page_failures: AtomicU64,
    matches_emitted: AtomicU64,
    lookups: AtomicU64,
    lookup_failures: AtomicU64,
}

impl SearchMetrics {
    /// Create a new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a search page request (probe included)
    pub fn record_page_fetch(&self) {
        self.page_fetches.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed search page request
    pub fn record_page_failure(&self) {
        self.page_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a match handed to the sink
    pub fn record_match(&self) {
        self.matches_emitted.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a user or channel lookup and whether it succeeded
    pub fn record_lookup(&self, ok: bool) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        if !ok {
            self.lookup_failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Point-in-time copy of every counter
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            page_fetches: self.page_fetches.load(Ordering::Relaxed),
            page_failures: self.page_failures.load(Ordering::Relaxed),
            matches_emitted: self.matches_emitted.load(Ordering::Relaxed),
            lookups: self.lookups.load(Ordering::Relaxed),
            lookup_failures: self.lookup_failures.load(Ordering::Relaxed),
        }
    }
}

/// Counter values at one point in time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub page_fetches: u64,
    pub page_failures: u64,
    pub matches_emitted: u64,
    pub lookups: u64,
    pub lookup_failures: u64,
}

impl MetricsSnapshot {
    /// Percentage of lookups that succeeded
    pub fn lookup_reliability(&self) -> f64 {
        if self.lookups == 0 {
            100.0
        } else {
            ((self.lookups - self.lookup_failures) as f64 / self.lookups as f64) * 100.0
        }
    }
}
