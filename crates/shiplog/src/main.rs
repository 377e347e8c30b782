//! Shiplog - ship structured log events to DynamoDB
//!
//! # Usage
//!
//! ```bash
//! # Create the log table (idempotent)
//! shiplog provision --table app_logs --region us-east-1
//!
//! # Emit synthetic events through a live sink
//! shiplog send --table app_logs --count 500
//! shiplog send --endpoint http://localhost:8000 --auto-create-table
//! ```

mod cmd;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Shiplog - ship structured log events to DynamoDB
#[derive(Parser, Debug)]
#[command(name = "shiplog")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the log table if it does not exist
    Provision(cmd::provision::ProvisionArgs),

    /// Emit synthetic log events through a live sink
    Send(cmd::send::SendArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    match cli.command {
        Command::Provision(args) => cmd::provision::run(args).await,
        Command::Send(args) => cmd::send::run(args).await,
    }
}

/// Initialize the tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();

    Ok(())
}
