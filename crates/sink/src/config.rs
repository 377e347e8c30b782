//! Sink configuration
//!
//! Captured once at construction and read-only afterwards; the sink owns
//! its config for the life of the process.

use std::time::Duration;

use shiplog_event::Level;

/// Default table name
pub const DEFAULT_TABLE: &str = "logs";

/// Default maximum events per delivered batch
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Default batch period
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_secs(5);

/// Default bound on pending events (drop-newest beyond this)
pub const DEFAULT_QUEUE_CAPACITY: usize = 100_000;

/// Default grace period for the final flush on shutdown
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for the DynamoDB sink
#[derive(Debug, Clone)]
pub struct DynamoConfig {
    /// Target table name
    pub table: String,

    /// AWS region; default provider chain when unset
    pub region: Option<String>,

    /// Endpoint override (e.g. local DynamoDB)
    pub endpoint: Option<String>,

    /// Static access key; default provider chain when unset
    pub access_key: Option<String>,

    /// Static secret key
    pub secret_key: Option<String>,

    /// Maximum events per delivered batch
    pub batch_size: usize,

    /// Batch period between flushes
    pub flush_interval: Duration,

    /// Bound on pending events; the newest event is dropped beyond it
    pub queue_capacity: usize,

    /// Create the table during construction if it does not exist
    pub auto_create_table: bool,

    /// Minimum severity accepted at the handle
    pub min_level: Level,

    /// Grace period for the final flush when the last handle drops
    pub shutdown_timeout: Duration,
}

impl Default for DynamoConfig {
    fn default() -> Self {
        Self {
            table: DEFAULT_TABLE.into(),
            region: None,
            endpoint: None,
            access_key: None,
            secret_key: None,
            batch_size: DEFAULT_BATCH_SIZE,
            flush_interval: DEFAULT_FLUSH_INTERVAL,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            auto_create_table: false,
            min_level: Level::Info,
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
        }
    }
}

impl DynamoConfig {
    /// Set the target table name
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Set the AWS region
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set an endpoint override (e.g. "http://localhost:8000")
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set static credentials
    pub fn with_credentials(
        mut self,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.access_key = Some(access_key.into());
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Set the maximum events per delivered batch
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    /// Set the batch period
    pub fn with_flush_interval(mut self, interval: Duration) -> Self {
        self.flush_interval = interval;
        self
    }

    /// Set the pending-event bound
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Create the table during construction if missing
    pub fn with_auto_create_table(mut self, auto: bool) -> Self {
        self.auto_create_table = auto;
        self
    }

    /// Set the minimum severity accepted at the handle
    pub fn with_min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    /// Set the shutdown flush grace period
    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
