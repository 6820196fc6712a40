//! Shared progress tracking for concurrent item completions.

use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use super::outcome::{OutcomeEntry, OutcomeStatus};

/// Point-in-time view of a run's aggregate counts. `processed` is always the
/// sum of the three sub-counts and never exceeds `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub total: u32,
    pub processed: u32,
    pub succeeded: u32,
    pub failed: u32,
    pub skipped: u32,
}

impl ProgressSnapshot {
    pub fn is_complete(&self) -> bool {
        self.processed == self.total
    }

    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        (self.processed as f64 / self.total as f64 * 100.0).min(100.0)
    }
}

/// Owns the outcome log and the run counters for a single migration run.
/// The counter bump happens while the log lock is held, so an entry and its
/// snapshot update land together; items completing at the same instant within
/// a window cannot lose updates.
#[derive(Debug)]
pub struct ProgressTracker {
    total: u32,
    succeeded: AtomicU32,
    failed: AtomicU32,
    skipped: AtomicU32,
    log: Mutex<Vec<OutcomeEntry>>,
}

impl ProgressTracker {
    pub fn new(total: u32) -> Self {
        Self {
            total,
            succeeded: AtomicU32::new(0),
            failed: AtomicU32::new(0),
            skipped: AtomicU32::new(0),
            log: Mutex::new(Vec::with_capacity(total as usize)),
        }
    }

    /// Appends an entry and bumps the matching counter, returning the
    /// post-update snapshot. Entries land in completion order.
    pub async fn record(&self, entry: OutcomeEntry) -> ProgressSnapshot {
        let mut log = self.log.lock().await;
        let counter = match entry.status {
            OutcomeStatus::Success => &self.succeeded,
            OutcomeStatus::Failed => &self.failed,
            OutcomeStatus::Skipped => &self.skipped,
        };
        counter.fetch_add(1, Ordering::SeqCst);
        debug!(
            source_id = %entry.source_id,
            status = ?entry.status,
            processed = log.len() + 1,
            total = self.total,
            "Recorded item outcome"
        );
        log.push(entry);
        self.snapshot()
    }

    /// Consistent cumulative counts; monotonically non-decreasing across
    /// observations during a run.
    pub fn snapshot(&self) -> ProgressSnapshot {
        let succeeded = self.succeeded.load(Ordering::SeqCst);
        let failed = self.failed.load(Ordering::SeqCst);
        let skipped = self.skipped.load(Ordering::SeqCst);
        ProgressSnapshot {
            total: self.total,
            processed: succeeded + failed + skipped,
            succeeded,
            failed,
            skipped,
        }
    }

    /// Stable copy of the log at observation time; safe to call while items
    /// are still completing.
    pub async fn log_snapshot(&self) -> Vec<OutcomeEntry> {
        self.log.lock().await.clone()
    }

    /// Consumes the tracker at end of run, yielding the full log.
    pub async fn into_log(self) -> Vec<OutcomeEntry> {
        self.log.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[tokio::test]
    async fn record_updates_counts_and_log_together() {
        let tracker = ProgressTracker::new(3);
        assert_eq!(tracker.snapshot(), ProgressSnapshot { total: 3, ..Default::default() });

        let snap = tracker.record(OutcomeEntry::success("f1", "a", "c1", "a")).await;
        assert_eq!(snap.processed, 1);
        assert_eq!(snap.succeeded, 1);

        let snap = tracker.record(OutcomeEntry::failed("f2", "b", "boom")).await;
        assert_eq!(snap.failed, 1);

        let snap = tracker.record(OutcomeEntry::skipped("f3", "c", "c3", "c")).await;
        assert_eq!(snap.skipped, 1);
        assert_eq!(snap.processed, 3);
        assert!(snap.is_complete());
        assert_eq!(tracker.log_snapshot().await.len(), 3);
    }

    #[tokio::test]
    async fn concurrent_records_lose_no_updates() {
        let tracker = Arc::new(ProgressTracker::new(100));
        let mut handles = Vec::new();
        for i in 0..100 {
            let tracker = Arc::clone(&tracker);
            handles.push(tokio::spawn(async move {
                let entry = OutcomeEntry::success(format!("f{i}"), "x", "c", "x");
                tracker.record(entry).await
            }));
        }
        for handle in handles {
            let snap = handle.await.unwrap();
            assert_eq!(snap.succeeded + snap.failed + snap.skipped, snap.processed);
            assert!(snap.processed <= snap.total);
        }
        let final_snap = tracker.snapshot();
        assert_eq!(final_snap.succeeded, 100);
        assert_eq!(final_snap.processed, 100);
        assert_eq!(tracker.log_snapshot().await.len(), 100);
    }

    #[test]
    fn percent_handles_empty_run() {
        assert_eq!(ProgressSnapshot { total: 0, ..Default::default() }.percent(), 100.0);
    }
}
