use serde::{Deserialize, Serialize};

use crate::broker::{MessageRecord, PropertyMap};

/// Request body for creating a queue.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQueueRequest {
    pub queue_name: String,
}

/// Request body for creating a topic.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTopicRequest {
    pub topic_name: String,
}

/// Request body for creating a subscription under a topic.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubscriptionRequest {
    pub topic_name: String,
    pub subscription_name: String,
}

/// Query string for deleting a queue or topic (`?name=`).
#[derive(Debug, Deserialize)]
pub struct NameQuery {
    pub name: Option<String>,
}

/// Query string for listing subscriptions (`?topic=`).
#[derive(Debug, Deserialize)]
pub struct TopicQuery {
    pub topic: Option<String>,
}

/// Query string for deleting a subscription (`?topic=&name=`).
#[derive(Debug, Deserialize)]
pub struct SubscriptionQuery {
    pub topic: Option<String>,
    pub name: Option<String>,
}

/// Query string for peeking messages.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeekQuery {
    pub entity_type: Option<String>,
    pub entity_name: Option<String>,
    pub subscription_name: Option<String>,
    pub max_messages: Option<usize>,
}

/// Query string for the delete-messages request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurgeQuery {
    pub entity_type: Option<String>,
    pub entity_name: Option<String>,
    pub subscription_name: Option<String>,
    pub purge_all: Option<bool>,
}

/// Request body for sending a message.
///
/// `message` is the opaque payload (string or structured JSON);
/// `properties` is the optional application property map.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub entity_type: Option<String>,
    pub entity_name: Option<String>,
    pub subscription_name: Option<String>,
    pub message: serde_json::Value,
    pub properties: Option<PropertyMap>,
}

/// Generic success acknowledgement.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub success: bool,
    pub message: String,
}

impl StatusResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Response for the delete-messages request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurgeResponse {
    pub success: bool,
    pub deleted_count: u64,
    pub message: String,
}

/// A message record as the dashboard UI consumes it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    pub message_id: String,
    pub body: serde_json::Value,
    pub properties: PropertyMap,
    pub enqueued_time_utc: chrono::DateTime<chrono::Utc>,
    pub sequence_number: u64,
    pub delivery_count: u32,
}

impl From<MessageRecord> for MessageView {
    fn from(record: MessageRecord) -> Self {
        Self {
            message_id: record.id,
            body: record.body,
            properties: record.properties,
            enqueued_time_utc: record.enqueued_at,
            sequence_number: record.sequence_number,
            delivery_count: record.delivery_count,
        }
    }
}
