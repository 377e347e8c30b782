//! Sink metrics
//!
//! Atomic counters shared between the producer handle and the worker.
//! Drops caused by delivery failure are visible through `write_errors`;
//! `events_dropped` counts only queue-capacity and shutdown discards.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Metrics for the DynamoDB sink
#[derive(Debug, Default)]
pub struct DynamoSinkMetrics {
    /// Events accepted into the queue
    pub events_enqueued: AtomicU64,

    /// Events rejected by the minimum-level filter
    pub events_filtered: AtomicU64,

    /// Events dropped at capacity, after close, or at shutdown timeout
    pub events_dropped: AtomicU64,

    /// Batches successfully written to the store
    pub batches_written: AtomicU64,

    /// Records successfully written (sum over batches)
    pub records_written: AtomicU64,

    /// Failed batch deliveries
    pub write_errors: AtomicU64,
}

impl DynamoSinkMetrics {
    /// Create new metrics with all counters at zero
    pub const fn new() -> Self {
        Self {
            events_enqueued: AtomicU64::new(0),
            events_filtered: AtomicU64::new(0),
            events_dropped: AtomicU64::new(0),
            batches_written: AtomicU64::new(0),
            records_written: AtomicU64::new(0),
            write_errors: AtomicU64::new(0),
        }
    }

    /// Record an accepted event
    #[inline]
    pub fn record_enqueued(&self) {
        self.events_enqueued.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an event below the minimum level
    #[inline]
    pub fn record_filtered(&self) {
        self.events_filtered.fetch_add(1, Ordering::Relaxed);
    }

    /// Record dropped events
    #[inline]
    pub fn record_dropped(&self, count: u64) {
        self.events_dropped.fetch_add(count, Ordering::Relaxed);
    }

    /// Record a successfully written batch
    #[inline]
    pub fn record_batch_written(&self, records: u64) {
        self.batches_written.fetch_add(1, Ordering::Relaxed);
        self.records_written.fetch_add(records, Ordering::Relaxed);
    }

    /// Record a failed delivery
    #[inline]
    pub fn record_write_error(&self) {
        self.write_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            events_enqueued: self.events_enqueued.load(Ordering::Relaxed),
            events_filtered: self.events_filtered.load(Ordering::Relaxed),
            events_dropped: self.events_dropped.load(Ordering::Relaxed),
            batches_written: self.batches_written.load(Ordering::Relaxed),
            records_written: self.records_written.load(Ordering::Relaxed),
            write_errors: self.write_errors.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time snapshot of sink metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub events_enqueued: u64,
    pub events_filtered: u64,
    pub events_dropped: u64,
    pub batches_written: u64,
    pub records_written: u64,
    pub write_errors: u64,
}

/// Handle for observing sink metrics
///
/// Holds an `Arc` to the metrics, so it stays valid after `run()` has
/// consumed the sink.
#[derive(Debug, Clone)]
pub struct DynamoSinkMetricsHandle {
    table: String,
    metrics: Arc<DynamoSinkMetrics>,
}

impl DynamoSinkMetricsHandle {
    pub(crate) fn new(table: String, metrics: Arc<DynamoSinkMetrics>) -> Self {
        Self { table, metrics }
    }

    /// The table this sink writes to
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Get a snapshot of the current counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

#[cfg(test)]
#[path = "metrics_test.rs"]
mod metrics_test;
