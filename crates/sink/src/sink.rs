//! DynamoDB sink worker
//!
//! A single task owns the receiving end of the queue, drains a bounded
//! slice on each timer tick, and bulk-writes it through the store.
//! Delivery failures are logged and the batch is discarded; the loop
//! keeps running and producers never notice. When the last handle drops,
//! whatever is still pending is flushed within a bounded grace period.

use std::collections::VecDeque;
use std::sync::Arc;

use shiplog_event::LogEvent;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use crate::config::DynamoConfig;
use crate::error::SinkError;
use crate::handle::{DropWarner, SinkHandle, DROP_WARN_INTERVAL};
use crate::metrics::{DynamoSinkMetrics, DynamoSinkMetricsHandle, MetricsSnapshot};
use crate::record::LogRecord;
use crate::store::{DynamoStore, LogStore};

/// Batching sink that writes log events to a DynamoDB table
///
/// Constructed together with its [`SinkHandle`]; consumed by [`run`].
///
/// [`run`]: DynamoDbSink::run
pub struct DynamoDbSink<S = DynamoStore> {
    receiver: mpsc::Receiver<LogEvent>,
    config: DynamoConfig,
    store: S,
    pending: VecDeque<LogEvent>,
    metrics: Arc<DynamoSinkMetrics>,
    drop_warner: Arc<DropWarner>,
}

impl DynamoDbSink<DynamoStore> {
    /// Build a sink against DynamoDB
    ///
    /// Builds the client from the config (default AWS provider chain for
    /// anything not overridden) and, when `auto_create_table` is set,
    /// provisions the table first. Any provisioning failure other than
    /// already-exists aborts construction.
    pub async fn connect(config: DynamoConfig) -> Result<(SinkHandle, Self), SinkError> {
        let store = DynamoStore::from_config(&config).await;
        Self::with_store(config, store).await
    }
}

impl<S: LogStore> DynamoDbSink<S> {
    /// Build a sink over a custom store implementation
    ///
    /// Runs the same provisioning step as [`connect`] when
    /// `auto_create_table` is set.
    ///
    /// [`connect`]: DynamoDbSink::connect
    pub async fn with_store(config: DynamoConfig, store: S) -> Result<(SinkHandle, Self), SinkError> {
        if config.batch_size == 0 {
            return Err(SinkError::Config("batch_size must be greater than zero".into()));
        }
        if config.queue_capacity == 0 {
            return Err(SinkError::Config(
                "queue_capacity must be greater than zero".into(),
            ));
        }

        if config.auto_create_table {
            store
                .ensure_table(&config.table)
                .await
                .map_err(|source| SinkError::Provision {
                    table: config.table.clone(),
                    source,
                })?;
        }

        let (sender, receiver) = mpsc::channel(config.queue_capacity);
        let metrics = Arc::new(DynamoSinkMetrics::new());
        let drop_warner = Arc::new(DropWarner::new(DROP_WARN_INTERVAL));
        let handle = SinkHandle::new(
            sender,
            config.min_level,
            Arc::clone(&metrics),
            Arc::clone(&drop_warner),
        );
        let sink = Self {
            receiver,
            pending: VecDeque::new(),
            store,
            metrics,
            drop_warner,
            config,
        };
        Ok((handle, sink))
    }

    /// Get a metrics handle that survives `run()`
    pub fn metrics_handle(&self) -> DynamoSinkMetricsHandle {
        DynamoSinkMetricsHandle::new(self.config.table.clone(), Arc::clone(&self.metrics))
    }

    /// Get reference to the config
    pub fn config(&self) -> &DynamoConfig {
        &self.config
    }

    /// Run the sink until every handle has been dropped
    ///
    /// On each tick of the flush interval, up to `batch_size` pending
    /// events are drained and delivered; the next tick is not armed until
    /// the delivery attempt finishes, and ticks that fall due meanwhile
    /// are coalesced. Returns the final metrics snapshot.
    pub async fn run(mut self) -> MetricsSnapshot {
        tracing::info!(
            table = %self.config.table,
            batch_size = self.config.batch_size,
            flush_interval_ms = self.config.flush_interval.as_millis() as u64,
            "dynamodb sink starting"
        );

        // First tick a full period out, so a burst right after startup is
        // batched rather than split by the interval's immediate tick.
        let mut flush_interval = tokio::time::interval_at(
            tokio::time::Instant::now() + self.config.flush_interval,
            self.config.flush_interval,
        );
        flush_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                maybe = self.receiver.recv() => {
                    match maybe {
                        Some(event) => self.buffer(event),
                        // All handles dropped and the channel is drained.
                        None => break,
                    }
                }
                _ = flush_interval.tick() => {
                    let batch = self.drain(self.config.batch_size);
                    if !batch.is_empty() {
                        self.deliver(batch).await;
                    }
                }
            }
        }

        self.final_flush().await;

        let snapshot = self.metrics.snapshot();
        tracing::info!(
            table = %self.config.table,
            records = snapshot.records_written,
            batches = snapshot.batches_written,
            errors = snapshot.write_errors,
            dropped = snapshot.events_dropped,
            "dynamodb sink shutting down"
        );
        snapshot
    }

    /// Append to the pending buffer, dropping the newest at capacity
    fn buffer(&mut self, event: LogEvent) {
        if self.pending.len() >= self.config.queue_capacity {
            self.metrics.record_dropped(1);
            self.drop_warner.warn("pending buffer at capacity");
            return;
        }
        self.pending.push_back(event);
    }

    /// Remove up to `max` events from the front of the pending buffer
    fn drain(&mut self, max: usize) -> Vec<LogEvent> {
        let take = max.min(self.pending.len());
        self.pending.drain(..take).collect()
    }

    /// Convert and bulk-write one batch
    ///
    /// Failure is counted, logged with the table and cause, and the batch
    /// is discarded. No retry.
    async fn deliver(&mut self, batch: Vec<LogEvent>) {
        let count = batch.len() as u64;
        let records: Vec<LogRecord> = batch.iter().map(LogRecord::from_event).collect();

        match self.store.put_batch(&self.config.table, records).await {
            Ok(()) => {
                self.metrics.record_batch_written(count);
                tracing::debug!(table = %self.config.table, count, "flushed batch");
            }
            Err(e) => {
                self.metrics.record_write_error();
                tracing::error!(
                    table = %self.config.table,
                    error = %e,
                    count,
                    "failed to write batch, discarding events"
                );
            }
        }
    }

    /// Final drain-and-deliver pass, bounded by the shutdown timeout
    async fn final_flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }

        let deadline = self.config.shutdown_timeout;
        let flush = async {
            // Events stay in the pending buffer until the delivery attempt
            // completes, so a timeout mid-flight counts them as discarded.
            while !self.pending.is_empty() {
                let take = self.config.batch_size.min(self.pending.len());
                let batch: Vec<LogEvent> = self.pending.iter().take(take).cloned().collect();
                self.deliver(batch).await;
                self.pending.drain(..take);
            }
        };

        let timed_out = tokio::time::timeout(deadline, flush).await.is_err();
        if timed_out {
            let remaining = self.pending.len() as u64;
            self.metrics.record_dropped(remaining);
            tracing::error!(
                table = %self.config.table,
                remaining,
                "shutdown flush timed out, discarding remaining events"
            );
        }
    }
}

#[cfg(test)]
#[path = "sink_test.rs"]
mod sink_test;
