//! Producer-side sink handle
//!
//! The only surface application code touches. `emit` never blocks and
//! never returns an error; when the queue is full the newest event is
//! dropped and counted, with a rate-limited warning so a stuck store
//! cannot flood the diagnostic log.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use shiplog_event::{Level, LogEvent};
use tokio::sync::mpsc;

use crate::metrics::DynamoSinkMetrics;

/// Minimum interval between queue-drop warnings
pub(crate) const DROP_WARN_INTERVAL: Duration = Duration::from_secs(10);

/// Cloneable handle for emitting events into the sink
///
/// Dropping every clone closes the queue and triggers worker shutdown.
#[derive(Clone)]
pub struct SinkHandle {
    sender: mpsc::Sender<LogEvent>,
    min_level: Level,
    metrics: Arc<DynamoSinkMetrics>,
    drop_warner: Arc<DropWarner>,
}

impl SinkHandle {
    pub(crate) fn new(
        sender: mpsc::Sender<LogEvent>,
        min_level: Level,
        metrics: Arc<DynamoSinkMetrics>,
        drop_warner: Arc<DropWarner>,
    ) -> Self {
        Self {
            sender,
            min_level,
            metrics,
            drop_warner,
        }
    }

    /// Emit one event
    ///
    /// Events below the minimum level are counted and discarded. At
    /// capacity, or after the worker has gone away, the event is dropped
    /// (drop-newest) and counted. Callers are never blocked either way.
    pub fn emit(&self, event: LogEvent) {
        if event.level() < self.min_level {
            self.metrics.record_filtered();
            return;
        }
        match self.sender.try_send(event) {
            Ok(()) => self.metrics.record_enqueued(),
            Err(mpsc::error::TrySendError::Full(_)) => {
                self.metrics.record_dropped(1);
                self.drop_warner.warn("queue at capacity");
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.metrics.record_dropped(1);
                self.drop_warner.warn("sink already shut down");
            }
        }
    }

    /// Whether the worker has gone away
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// The minimum severity this handle accepts
    pub fn min_level(&self) -> Level {
        self.min_level
    }
}

impl std::fmt::Debug for SinkHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SinkHandle")
            .field("min_level", &self.min_level)
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Rate-limited drop diagnostics
///
/// Warns at most once per interval; drops in between are counted and
/// reported with the next warning.
pub(crate) struct DropWarner {
    min_interval: Duration,
    last_warn: Mutex<Option<Instant>>,
    suppressed: AtomicU64,
}

impl DropWarner {
    pub(crate) fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_warn: Mutex::new(None),
            suppressed: AtomicU64::new(0),
        }
    }

    /// Report one dropped event; returns true if a warning was logged
    pub(crate) fn warn(&self, reason: &str) -> bool {
        let should_log = {
            let mut last = self.last_warn.lock();
            let now = Instant::now();
            match *last {
                None => {
                    *last = Some(now);
                    true
                }
                Some(prev) if now.duration_since(prev) >= self.min_interval => {
                    *last = Some(now);
                    true
                }
                _ => false,
            }
        };

        if should_log {
            let suppressed = self.suppressed.swap(0, Ordering::Relaxed);
            if suppressed > 0 {
                tracing::warn!(
                    reason = %reason,
                    suppressed,
                    "dropping log events (rate-limited)"
                );
            } else {
                tracing::warn!(reason = %reason, "dropping log event");
            }
            true
        } else {
            self.suppressed.fetch_add(1, Ordering::Relaxed);
            false
        }
    }
}

#[cfg(test)]
#[path = "handle_test.rs"]
mod handle_test;
