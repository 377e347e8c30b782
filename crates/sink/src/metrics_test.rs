//! Tests for sink metrics

use std::sync::Arc;

use super::*;

#[test]
fn test_new_is_zeroed() {
    let metrics = DynamoSinkMetrics::new();
    assert_eq!(metrics.snapshot(), MetricsSnapshot::default());
}

#[test]
fn test_record_operations() {
    let metrics = DynamoSinkMetrics::new();

    metrics.record_enqueued();
    metrics.record_enqueued();
    metrics.record_filtered();
    metrics.record_dropped(3);
    metrics.record_batch_written(100);
    metrics.record_batch_written(50);
    metrics.record_write_error();

    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.events_enqueued, 2);
    assert_eq!(snapshot.events_filtered, 1);
    assert_eq!(snapshot.events_dropped, 3);
    assert_eq!(snapshot.batches_written, 2);
    assert_eq!(snapshot.records_written, 150);
    assert_eq!(snapshot.write_errors, 1);
}

#[test]
fn test_handle_reads_shared_counters() {
    let metrics = Arc::new(DynamoSinkMetrics::new());
    let handle = DynamoSinkMetricsHandle::new("logs".to_string(), Arc::clone(&metrics));

    assert_eq!(handle.table(), "logs");
    assert_eq!(handle.snapshot().events_enqueued, 0);

    metrics.record_enqueued();
    assert_eq!(handle.snapshot().events_enqueued, 1);
}

#[test]
fn test_handle_clone_shares_state() {
    let metrics = Arc::new(DynamoSinkMetrics::new());
    let handle = DynamoSinkMetricsHandle::new("logs".to_string(), Arc::clone(&metrics));
    let clone = handle.clone();

    metrics.record_write_error();
    assert_eq!(clone.snapshot().write_errors, 1);
}
