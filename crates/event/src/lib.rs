//! Shiplog - Event Model
//!
//! The data model shared by producers and the sink: a severity [`Level`],
//! an immutable [`LogEvent`], and a builder that renders `{key}` message
//! templates from the event's properties.
//!
//! Events are cheap to build on the hot path; everything network-shaped
//! (record mapping, bulk writes) lives in the sink crate.
//!
//! # Example
//!
//! ```
//! use shiplog_event::{Level, LogEvent};
//!
//! let event = LogEvent::builder("order {order_id} accepted")
//!     .level(Level::Info)
//!     .property("order_id", "ord-42")
//!     .build();
//!
//! assert_eq!(event.message(), "order ord-42 accepted");
//! ```

mod event;
mod level;

pub use event::{property_text, LogEvent, LogEventBuilder};
pub use level::{Level, ParseLevelError};
