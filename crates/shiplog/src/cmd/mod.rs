//! CLI subcommands

pub mod provision;
pub mod send;

use shiplog_sink::DynamoConfig;

/// Connection flags shared by every subcommand
#[derive(clap::Args, Debug)]
pub struct ConnectionArgs {
    /// Target table name
    #[arg(long, default_value = shiplog_sink::DEFAULT_TABLE)]
    pub table: String,

    /// AWS region (default provider chain when omitted)
    #[arg(long)]
    pub region: Option<String>,

    /// Endpoint override, e.g. http://localhost:8000 for local DynamoDB
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Static access key (default provider chain when omitted)
    #[arg(long, requires = "secret_key")]
    pub access_key: Option<String>,

    /// Static secret key
    #[arg(long, requires = "access_key")]
    pub secret_key: Option<String>,
}

impl ConnectionArgs {
    /// Fold the connection flags into a sink config
    pub fn apply(&self, mut config: DynamoConfig) -> DynamoConfig {
        config = config.with_table(self.table.clone());
        if let Some(region) = &self.region {
            config = config.with_region(region.clone());
        }
        if let Some(endpoint) = &self.endpoint {
            config = config.with_endpoint(endpoint.clone());
        }
        if let (Some(access_key), Some(secret_key)) = (&self.access_key, &self.secret_key) {
            config = config.with_credentials(access_key.clone(), secret_key.clone());
        }
        config
    }
}
