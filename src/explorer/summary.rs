use serde::Serialize;

use crate::broker::{EntityStatus, RuntimeMetrics};

/// A queue listing entry: the queue name plus a fresh metrics snapshot.
///
/// Serialized field names match what the dashboard UI consumes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueSummary {
    pub name: String,
    pub message_count: u64,
    pub active_message_count: u64,
    pub dead_letter_message_count: u64,
    pub status: EntityStatus,
}

/// A topic listing entry.
///
/// Topics carry no runtime counters of their own; the interesting numbers
/// live on their subscriptions.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicSummary {
    pub name: String,
    pub status: EntityStatus,
    pub subscription_count: usize,
}

/// A subscription listing entry, scoped to one topic.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionSummary {
    pub name: String,
    pub message_count: u64,
    pub active_message_count: u64,
    pub dead_letter_message_count: u64,
    pub status: EntityStatus,
}

impl QueueSummary {
    pub fn new(name: String, status: EntityStatus, metrics: RuntimeMetrics) -> Self {
        Self {
            name,
            message_count: metrics.total_count,
            active_message_count: metrics.active_count,
            dead_letter_message_count: metrics.dead_letter_count,
            status,
        }
    }
}

impl SubscriptionSummary {
    pub fn new(name: String, status: EntityStatus, metrics: RuntimeMetrics) -> Self {
        Self {
            name,
            message_count: metrics.total_count,
            active_message_count: metrics.active_count,
            dead_letter_message_count: metrics.dead_letter_count,
            status,
        }
    }
}
