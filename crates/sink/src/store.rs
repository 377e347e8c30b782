//! Remote store client and the bulk-write seam
//!
//! [`LogStore`] is the sink's only view of the remote store, so tests can
//! substitute a scripted implementation. [`DynamoStore`] is the real one,
//! built on the AWS SDK.

use std::future::Future;

use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::config::Credentials;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, KeySchemaElement, KeyType, ProvisionedThroughput, PutRequest,
    ScalarAttributeType, WriteRequest,
};
use aws_sdk_dynamodb::Client;

use crate::config::DynamoConfig;
use crate::record::{LogRecord, PARTITION_KEY};

/// `BatchWriteItem` accepts at most this many items per call
pub const MAX_BATCH_WRITE_ITEMS: usize = 25;

/// Errors from the remote store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Table creation failed for a reason other than already-exists
    #[error("create table failed: {0}")]
    CreateTable(String),

    /// A bulk write call failed outright
    #[error("batch write failed: {0}")]
    BatchWrite(String),

    /// The store accepted the call but left items unwritten
    #[error("batch write left {count} items unprocessed")]
    Unprocessed {
        /// Items the store reported back as unprocessed
        count: usize,
    },
}

/// Remote store abstraction: bulk writes plus one-time provisioning
///
/// `put_batch` is one logical bulk operation with a binary outcome: the
/// whole batch either lands or the error describes why it did not.
/// Partial acceptance counts as failure.
pub trait LogStore: Send + Sync {
    /// Write all records as one logical bulk operation
    fn put_batch(
        &self,
        table: &str,
        records: Vec<LogRecord>,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Ensure the target table exists; "already exists" is success
    fn ensure_table(&self, table: &str) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// DynamoDB-backed store
#[derive(Debug, Clone)]
pub struct DynamoStore {
    client: Client,
}

impl DynamoStore {
    /// Build a store from sink configuration
    ///
    /// Anything not overridden in the config comes from the default AWS
    /// provider chain (environment, profile, instance metadata).
    pub async fn from_config(config: &DynamoConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let (Some(access_key), Some(secret_key)) = (&config.access_key, &config.secret_key) {
            loader = loader.credentials_provider(Credentials::new(
                access_key.clone(),
                secret_key.clone(),
                None,
                None,
                "shiplog",
            ));
        }
        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint.clone());
        }
        let shared = loader.load().await;
        Self {
            client: Client::new(&shared),
        }
    }

    /// Wrap an existing client
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl LogStore for DynamoStore {
    /// Bulk-write the records in `MAX_BATCH_WRITE_ITEMS`-sized calls
    ///
    /// Calls run sequentially; any call error or any unprocessed items
    /// fails the whole batch.
    async fn put_batch(&self, table: &str, records: Vec<LogRecord>) -> Result<(), StoreError> {
        let mut unprocessed = 0usize;

        for chunk in records.chunks(MAX_BATCH_WRITE_ITEMS) {
            let mut writes = Vec::with_capacity(chunk.len());
            for record in chunk {
                let put = PutRequest::builder()
                    .set_item(Some(record.to_item()))
                    .build()
                    .map_err(|e| StoreError::BatchWrite(e.to_string()))?;
                writes.push(WriteRequest::builder().put_request(put).build());
            }

            let output = self
                .client
                .batch_write_item()
                .request_items(table, writes)
                .send()
                .await
                .map_err(|e| StoreError::BatchWrite(DisplayErrorContext(e).to_string()))?;

            if let Some(items) = output.unprocessed_items() {
                unprocessed += items.values().map(Vec::len).sum::<usize>();
            }
        }

        if unprocessed > 0 {
            return Err(StoreError::Unprocessed { count: unprocessed });
        }
        Ok(())
    }

    /// Create the table with the minimal log schema
    ///
    /// Key schema is a single string hash key (`Id`) with 1/1 provisioned
    /// throughput. `ResourceInUseException` means the table already
    /// exists and is treated as success.
    async fn ensure_table(&self, table: &str) -> Result<(), StoreError> {
        let key_schema = KeySchemaElement::builder()
            .attribute_name(PARTITION_KEY)
            .key_type(KeyType::Hash)
            .build()
            .map_err(|e| StoreError::CreateTable(e.to_string()))?;
        let attribute = AttributeDefinition::builder()
            .attribute_name(PARTITION_KEY)
            .attribute_type(ScalarAttributeType::S)
            .build()
            .map_err(|e| StoreError::CreateTable(e.to_string()))?;
        let throughput = ProvisionedThroughput::builder()
            .read_capacity_units(1)
            .write_capacity_units(1)
            .build()
            .map_err(|e| StoreError::CreateTable(e.to_string()))?;

        let result = self
            .client
            .create_table()
            .table_name(table)
            .key_schema(key_schema)
            .attribute_definitions(attribute)
            .provisioned_throughput(throughput)
            .send()
            .await;

        match result {
            Ok(_) => {
                tracing::info!(table = %table, "table created");
                Ok(())
            }
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_resource_in_use_exception()) =>
            {
                tracing::debug!(table = %table, "table already exists");
                Ok(())
            }
            Err(err) => Err(StoreError::CreateTable(DisplayErrorContext(err).to_string())),
        }
    }
}
