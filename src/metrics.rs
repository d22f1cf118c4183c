use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters describing an ingestion run.
#[derive(Default)]
pub struct IngestMetrics {
    successful: AtomicU64,
    failed: AtomicU64,
}

impl IngestMetrics {
    /// Create an empty metrics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a document accepted by the backend.
    pub fn record_success(&self) {
        self.successful.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a document that was missing or rejected.
    pub fn record_failure(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Return a snapshot of the current counters.
    pub fn snapshot(&self) -> IngestionSummary {
        let successful = self.successful.load(Ordering::Relaxed);
        let failed = self.failed.load(Ordering::Relaxed);
        IngestionSummary {
            successful,
            failed,
            total: successful + failed,
        }
    }
}

/// Totals reported at the end of an ingestion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IngestionSummary {
    /// Documents the backend accepted.
    pub successful: u64,
    /// Documents that were missing on disk or rejected by the backend.
    pub failed: u64,
    /// Documents attempted.
    pub total: u64,
}

impl IngestionSummary {
    /// True when documents were attempted but none were accepted.
    pub fn nothing_ingested(&self) -> bool {
        self.total > 0 && self.successful == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_successes_and_failures() {
        let metrics = IngestMetrics::new();
        metrics.record_success();
        metrics.record_failure();
        metrics.record_success();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.successful, 2);
        assert_eq!(snapshot.failed, 1);
        assert_eq!(snapshot.total, 3);
        assert!(!snapshot.nothing_ingested());
    }

    #[test]
    fn empty_run_is_not_a_failure() {
        let snapshot = IngestMetrics::new().snapshot();
        assert_eq!(snapshot.total, 0);
        assert!(!snapshot.nothing_ingested());
    }

    #[test]
    fn all_failures_flag_the_run() {
        let metrics = IngestMetrics::new();
        metrics.record_failure();
        assert!(metrics.snapshot().nothing_ingested());
    }
}
