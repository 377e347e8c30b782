//! Table provisioning command
//!
//! One-shot, idempotent: creates the log table with the minimal schema
//! (string hash key `Id`, 1/1 provisioned throughput). A table that
//! already exists is success.

use anyhow::{Context, Result};
use clap::Args;
use owo_colors::OwoColorize;
use shiplog_sink::{DynamoConfig, DynamoStore, LogStore};

use super::ConnectionArgs;

#[derive(Args, Debug)]
pub struct ProvisionArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,
}

pub async fn run(args: ProvisionArgs) -> Result<()> {
    let config = args.connection.apply(DynamoConfig::default());

    print!("Ensuring table '{}' exists... ", config.table);
    let store = DynamoStore::from_config(&config).await;
    store
        .ensure_table(&config.table)
        .await
        .with_context(|| format!("could not provision table '{}'", config.table))?;
    println!("{}", "✓".green());

    Ok(())
}
