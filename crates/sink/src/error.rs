//! Sink construction errors
//!
//! Everything after construction is swallowed at the batch boundary and
//! reported through `tracing`; only construction can fail loudly.

use crate::store::StoreError;

/// Errors surfaced while constructing a sink
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// Table provisioning failed for a reason other than already-exists
    #[error("provisioning failed for table {table}: {source}")]
    Provision {
        /// The table being provisioned
        table: String,
        #[source]
        source: StoreError,
    },

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(String),
}
