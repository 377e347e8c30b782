//! Log event model and builder
//!
//! A [`LogEvent`] is immutable once built. The builder renders the message
//! template eagerly so the sink worker never has to touch property values
//! again.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::level::Level;

/// A single structured log event
///
/// Carries both the raw message template and the rendered message, plus an
/// insertion-ordered property list. Produced by application code, consumed
/// once by the sink worker.
#[derive(Debug, Clone)]
pub struct LogEvent {
    timestamp: DateTime<Utc>,
    level: Level,
    template: String,
    message: String,
    exception: Option<String>,
    properties: Vec<(String, Value)>,
}

impl LogEvent {
    /// Start building an event from a message template
    pub fn builder(template: impl Into<String>) -> LogEventBuilder {
        LogEventBuilder::new(template)
    }

    /// The time at which the event occurred
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Severity of the event
    pub fn level(&self) -> Level {
        self.level
    }

    /// The raw message template
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The rendered message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Attached exception text, if any
    pub fn exception(&self) -> Option<&str> {
        self.exception.as_deref()
    }

    /// Properties in insertion order
    pub fn properties(&self) -> &[(String, Value)] {
        &self.properties
    }
}

/// Builder for [`LogEvent`]
///
/// # Example
///
/// ```
/// use shiplog_event::{Level, LogEvent};
///
/// let event = LogEvent::builder("user {user} logged in from {ip}")
///     .level(Level::Info)
///     .property("user", "alice")
///     .property("ip", "10.0.0.7")
///     .build();
///
/// assert_eq!(event.message(), "user alice logged in from 10.0.0.7");
/// ```
#[derive(Debug)]
pub struct LogEventBuilder {
    timestamp: Option<DateTime<Utc>>,
    level: Level,
    template: String,
    exception: Option<String>,
    properties: Vec<(String, Value)>,
}

impl LogEventBuilder {
    /// Create a builder for the given message template
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            timestamp: None,
            level: Level::default(),
            template: template.into(),
            exception: None,
            properties: Vec::new(),
        }
    }

    /// Set the severity (default: info)
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Attach a property; insertion order is preserved
    pub fn property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.push((key.into(), value.into()));
        self
    }

    /// Attach exception text
    pub fn exception(mut self, exception: impl Into<String>) -> Self {
        self.exception = Some(exception.into());
        self
    }

    /// Override the event timestamp (default: now)
    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Render the template and freeze the event
    pub fn build(self) -> LogEvent {
        let message = render_template(&self.template, &self.properties);
        LogEvent {
            timestamp: self.timestamp.unwrap_or_else(Utc::now),
            level: self.level,
            template: self.template,
            message,
            exception: self.exception,
            properties: self.properties,
        }
    }
}

/// Display text for a property value: strings bare, everything else as JSON
pub fn property_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Replace `{key}` placeholders with property text
///
/// Placeholders with no matching property are left verbatim, as is an
/// unterminated `{`.
fn render_template(template: &str, properties: &[(String, Value)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) => {
                let key = &after[..end];
                match properties.iter().find(|(k, _)| k == key) {
                    Some((_, value)) => out.push_str(&property_text(value)),
                    None => {
                        out.push('{');
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
#[path = "event_test.rs"]
mod event_test;
