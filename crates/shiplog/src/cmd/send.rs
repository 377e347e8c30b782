//! Synthetic event generator
//!
//! Drives a sink end to end: emits structured events through the handle,
//! shuts down by dropping it, and prints the final metrics snapshot.

use std::time::Duration;

use anyhow::Result;
use clap::Args;
use shiplog_event::{Level, LogEvent};
use shiplog_sink::{DynamoConfig, DynamoDbSink};

use super::ConnectionArgs;

#[derive(Args, Debug)]
pub struct SendArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Number of events to emit
    #[arg(long, default_value_t = 100)]
    pub count: usize,

    /// Maximum events per delivered batch
    #[arg(long, default_value_t = shiplog_sink::DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Batch period in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub flush_interval_ms: u64,

    /// Minimum severity to ship
    #[arg(long, default_value = "info")]
    pub min_level: Level,

    /// Create the table first if it does not exist
    #[arg(long)]
    pub auto_create_table: bool,
}

pub async fn run(args: SendArgs) -> Result<()> {
    let config = args
        .connection
        .apply(DynamoConfig::default())
        .with_batch_size(args.batch_size)
        .with_flush_interval(Duration::from_millis(args.flush_interval_ms))
        .with_min_level(args.min_level)
        .with_auto_create_table(args.auto_create_table);

    let table = config.table.clone();
    let (handle, sink) = DynamoDbSink::connect(config).await?;
    let worker = tokio::spawn(sink.run());

    tracing::info!(table = %table, count = args.count, "emitting events");
    for i in 0..args.count {
        handle.emit(sample_event(i));
    }

    // Dropping the last handle closes the queue; the worker flushes what
    // remains and returns its final snapshot.
    drop(handle);
    let snapshot = worker.await?;

    println!(
        "shipped {} records in {} batches ({} errors, {} dropped, {} filtered)",
        snapshot.records_written,
        snapshot.batches_written,
        snapshot.write_errors,
        snapshot.events_dropped,
        snapshot.events_filtered,
    );

    Ok(())
}

/// A small mix of routine and failing events
fn sample_event(i: usize) -> LogEvent {
    if i % 10 == 9 {
        LogEvent::builder("payment {payment_id} failed for order {order_id}")
            .level(Level::Error)
            .property("payment_id", format!("pay-{}", i))
            .property("order_id", format!("ord-{}", i))
            .exception("io error: connection reset by peer")
            .build()
    } else {
        LogEvent::builder("order {order_id} accepted in {elapsed_ms}ms")
            .level(Level::Info)
            .property("order_id", format!("ord-{}", i))
            .property("elapsed_ms", (i % 40 + 3) as i64)
            .build()
    }
}
