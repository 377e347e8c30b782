//! Tests for the producer-side handle

use std::sync::Arc;
use std::time::Duration;

use shiplog_event::{Level, LogEvent};
use tokio::sync::mpsc;

use super::*;
use crate::metrics::DynamoSinkMetrics;

fn test_handle(
    capacity: usize,
    min_level: Level,
) -> (SinkHandle, mpsc::Receiver<LogEvent>, Arc<DynamoSinkMetrics>) {
    let (tx, rx) = mpsc::channel(capacity);
    let metrics = Arc::new(DynamoSinkMetrics::new());
    let warner = Arc::new(DropWarner::new(Duration::from_secs(10)));
    let handle = SinkHandle::new(tx, min_level, Arc::clone(&metrics), warner);
    (handle, rx, metrics)
}

fn event(level: Level) -> LogEvent {
    LogEvent::builder("test").level(level).build()
}

#[tokio::test]
async fn test_emit_enqueues() {
    let (handle, mut rx, metrics) = test_handle(10, Level::Trace);

    handle.emit(event(Level::Info));

    assert_eq!(rx.try_recv().unwrap().message(), "test");
    assert_eq!(metrics.snapshot().events_enqueued, 1);
}

#[tokio::test]
async fn test_emit_filters_below_min_level() {
    let (handle, mut rx, metrics) = test_handle(10, Level::Warn);

    handle.emit(event(Level::Info));
    handle.emit(event(Level::Debug));
    handle.emit(event(Level::Error));

    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.events_filtered, 2);
    assert_eq!(snapshot.events_enqueued, 1);
    assert_eq!(rx.try_recv().unwrap().level(), Level::Error);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_emit_at_capacity_drops_newest() {
    let (handle, mut rx, metrics) = test_handle(2, Level::Trace);

    handle.emit(event(Level::Info));
    handle.emit(event(Level::Info));
    handle.emit(event(Level::Info)); // queue full, dropped

    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.events_enqueued, 2);
    assert_eq!(snapshot.events_dropped, 1);

    // The two accepted events are still there, in order
    assert!(rx.try_recv().is_ok());
    assert!(rx.try_recv().is_ok());
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_emit_after_worker_gone_drops() {
    let (handle, rx, metrics) = test_handle(10, Level::Trace);
    drop(rx);

    assert!(handle.is_closed());
    handle.emit(event(Level::Info));

    assert_eq!(metrics.snapshot().events_dropped, 1);
}

#[tokio::test]
async fn test_clones_share_the_queue() {
    let (handle, mut rx, metrics) = test_handle(10, Level::Trace);
    let clone = handle.clone();

    handle.emit(event(Level::Info));
    clone.emit(event(Level::Info));

    assert_eq!(metrics.snapshot().events_enqueued, 2);
    assert!(rx.try_recv().is_ok());
    assert!(rx.try_recv().is_ok());
}

#[test]
fn test_drop_warner_rate_limits() {
    let warner = DropWarner::new(Duration::from_secs(60));

    // First drop warns, the rest are suppressed within the interval
    assert!(warner.warn("queue at capacity"));
    assert!(!warner.warn("queue at capacity"));
    assert!(!warner.warn("queue at capacity"));
}

#[test]
fn test_drop_warner_zero_interval_always_warns() {
    let warner = DropWarner::new(Duration::ZERO);

    assert!(warner.warn("x"));
    assert!(warner.warn("x"));
}
