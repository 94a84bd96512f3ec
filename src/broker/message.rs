use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scalar application property value.
///
/// Broker application properties map string keys to scalars; structured
/// values belong in the message body instead. The untagged representation
/// round-trips naturally through JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

pub type PropertyMap = HashMap<String, PropertyValue>;

/// A message as it exists inside the broker.
///
/// Every field except `delivery_count` is immutable once the broker accepts
/// the message. The sequence number is broker-assigned, unique, and
/// monotonically increasing within the owning entity's lifetime.
#[derive(Debug, Clone, Serialize)]
pub struct MessageRecord {
    pub id: String,
    pub body: serde_json::Value,
    pub properties: PropertyMap,
    pub enqueued_at: DateTime<Utc>,
    pub sequence_number: u64,
    pub delivery_count: u32,
}

/// A message constructed by the caller for sending.
///
/// It has no identity until the broker accepts it; the broker assigns the
/// id, timestamp, and sequence number on enqueue.
#[derive(Debug, Clone)]
pub struct OutboundMessage {
    pub body: serde_json::Value,
    pub properties: PropertyMap,
}

impl OutboundMessage {
    /// Creates an outbound message with an empty property map.
    pub fn new(body: serde_json::Value) -> Self {
        Self {
            body,
            properties: PropertyMap::new(),
        }
    }

    pub fn with_properties(body: serde_json::Value, properties: PropertyMap) -> Self {
        Self { body, properties }
    }
}
