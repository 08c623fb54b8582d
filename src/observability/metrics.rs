//! Metrics registry for the screener
//!
//! - Counters only, monotonic
//! - Reset only on process start
//! - Thread-safe but lock-free

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Query counters
///
/// All counters use Relaxed atomics; values are exact once the writers
/// have finished.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Successful query count
    queries_executed: AtomicU64,
    /// Rejected query count
    queries_rejected: AtomicU64,
    /// Records examined by the filter
    records_scanned: AtomicU64,
    /// Records that satisfied every condition
    records_matched: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one executed query with its scan and match counts
    pub fn record_execution(&self, scanned: usize, matched: usize) {
        self.queries_executed.fetch_add(1, Ordering::Relaxed);
        self.records_scanned
            .fetch_add(scanned as u64, Ordering::Relaxed);
        self.records_matched
            .fetch_add(matched as u64, Ordering::Relaxed);
    }

    /// Increment queries rejected
    pub fn increment_queries_rejected(&self) {
        self.queries_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            queries_executed: self.queries_executed.load(Ordering::Relaxed),
            queries_rejected: self.queries_rejected.load(Ordering::Relaxed),
            records_scanned: self.records_scanned.load(Ordering::Relaxed),
            records_matched: self.records_matched.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MetricsSnapshot {
    pub queries_executed: u64,
    pub queries_rejected: u64,
    pub records_scanned: u64,
    pub records_matched: u64,
}

impl MetricsSnapshot {
    /// Counters as string log fields
    pub fn log_fields(&self) -> [(&'static str, String); 4] {
        [
            ("queries_executed", self.queries_executed.to_string()),
            ("queries_rejected", self.queries_rejected.to_string()),
            ("records_matched", self.records_matched.to_string()),
            ("records_scanned", self.records_scanned.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registry_has_zero_values() {
        let registry = MetricsRegistry::new();
        assert_eq!(registry.snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn test_record_execution() {
        let registry = MetricsRegistry::new();

        registry.record_execution(120, 7);
        registry.record_execution(120, 0);
        registry.increment_queries_rejected();

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.queries_executed, 2);
        assert_eq!(snapshot.queries_rejected, 1);
        assert_eq!(snapshot.records_scanned, 240);
        assert_eq!(snapshot.records_matched, 7);
    }

    #[test]
    fn test_snapshot_serializes() {
        let registry = MetricsRegistry::new();
        registry.record_execution(10, 3);

        let parsed = serde_json::to_value(registry.snapshot()).unwrap();
        assert_eq!(parsed["queries_executed"], 1);
        assert_eq!(parsed["records_matched"], 3);
    }

    #[test]
    fn test_thread_safety() {
        use std::sync::Arc;
        use std::thread;

        let registry = Arc::new(MetricsRegistry::new());
        let mut handles = vec![];

        for _ in 0..10 {
            let reg = Arc::clone(&registry);
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    reg.record_execution(2, 1);
                    reg.increment_queries_rejected();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.queries_executed, 1000);
        assert_eq!(snapshot.queries_rejected, 1000);
        assert_eq!(snapshot.records_scanned, 2000);
        assert_eq!(snapshot.records_matched, 1000);
    }
}
