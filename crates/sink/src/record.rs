//! Wire record mapping
//!
//! Converts one [`LogEvent`] into the DynamoDB item the sink writes.
//! Identifiers are minted fresh on every conversion; a batch that fails
//! delivery is discarded, so re-converting the same event can only happen
//! through a new enqueue and legitimately gets a new identity.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::SecondsFormat;
use serde_json::Value;
use shiplog_event::{property_text, LogEvent};
use uuid::Uuid;

/// Partition key attribute in the log table schema
pub const PARTITION_KEY: &str = "Id";

/// One DynamoDB item, mapped from a single log event
#[derive(Debug, Clone)]
pub struct LogRecord {
    id: Uuid,
    timestamp: String,
    level: &'static str,
    template: String,
    message: String,
    exception: String,
    properties: String,
}

impl LogRecord {
    /// Map an event into a record, minting a new identifier
    pub fn from_event(event: &LogEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: event
                .timestamp()
                .to_rfc3339_opts(SecondsFormat::Micros, true),
            level: event.level().as_str(),
            template: event.template().to_string(),
            message: event.message().to_string(),
            exception: event.exception().unwrap_or_default().to_string(),
            properties: flatten_properties(event.properties()),
        }
    }

    /// The record's unique identifier
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The rendered message carried by this record
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Attribute map for `BatchWriteItem`
    ///
    /// `Exception` is always present (empty string when the event had
    /// none); `Properties` is omitted entirely when the event carried no
    /// properties.
    pub fn to_item(&self) -> HashMap<String, AttributeValue> {
        let mut item = HashMap::with_capacity(7);
        item.insert(
            PARTITION_KEY.to_string(),
            AttributeValue::S(self.id.to_string()),
        );
        item.insert(
            "Timestamp".to_string(),
            AttributeValue::S(self.timestamp.clone()),
        );
        item.insert("Level".to_string(), AttributeValue::S(self.level.to_string()));
        item.insert(
            "MessageTemplate".to_string(),
            AttributeValue::S(self.template.clone()),
        );
        item.insert(
            "Message".to_string(),
            AttributeValue::S(self.message.clone()),
        );
        item.insert(
            "Exception".to_string(),
            AttributeValue::S(self.exception.clone()),
        );
        if !self.properties.is_empty() {
            item.insert(
                "Properties".to_string(),
                AttributeValue::S(self.properties.clone()),
            );
        }
        item
    }
}

/// Space-joined `key:value` pairs in event insertion order
fn flatten_properties(properties: &[(String, Value)]) -> String {
    let mut out = String::new();
    for (key, value) in properties {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(key);
        out.push(':');
        out.push_str(&property_text(value));
    }
    out
}

#[cfg(test)]
#[path = "record_test.rs"]
mod record_test;
