//! Shiplog - DynamoDB Sink
//!
//! Ships structured log events to a DynamoDB table in periodic batches
//! without ever blocking the emitting call sites.
//!
//! # Architecture
//!
//! ```text
//! [producers] --emit--> [SinkHandle] --channel--> [worker task] --BatchWriteItem--> [DynamoDB]
//! ```
//!
//! Producers hold a cheap, cloneable [`SinkHandle`] and call
//! [`SinkHandle::emit`], which never blocks and never fails. A single
//! worker task ([`DynamoDbSink::run`]) drains the queue on a timer and
//! bulk-writes each batch. Delivery failures are reported through
//! `tracing` and the sink metrics; they never reach producers.
//!
//! Dropping every handle closes the queue and triggers a final,
//! timeout-bounded flush of whatever is still pending.
//!
//! # Example
//!
//! ```ignore
//! use shiplog_event::LogEvent;
//! use shiplog_sink::{DynamoConfig, DynamoDbSink};
//!
//! let config = DynamoConfig::default()
//!     .with_table("app_logs")
//!     .with_auto_create_table(true);
//!
//! let (handle, sink) = DynamoDbSink::connect(config).await?;
//! let worker = tokio::spawn(sink.run());
//!
//! handle.emit(LogEvent::builder("service started").build());
//!
//! drop(handle);
//! let snapshot = worker.await?;
//! ```

mod config;
mod error;
mod handle;
mod metrics;
mod record;
mod sink;
mod store;

pub use config::{
    DynamoConfig, DEFAULT_BATCH_SIZE, DEFAULT_FLUSH_INTERVAL, DEFAULT_QUEUE_CAPACITY,
    DEFAULT_SHUTDOWN_TIMEOUT, DEFAULT_TABLE,
};
pub use error::SinkError;
pub use handle::SinkHandle;
pub use metrics::{DynamoSinkMetrics, DynamoSinkMetricsHandle, MetricsSnapshot};
pub use record::{LogRecord, PARTITION_KEY};
pub use sink::DynamoDbSink;
pub use store::{DynamoStore, LogStore, StoreError, MAX_BATCH_WRITE_ITEMS};
