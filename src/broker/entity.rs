use serde::{Deserialize, Serialize};

use crate::utils::error::{BrokerError, BrokerResult};

/// The administrative status of a broker entity.
///
/// The broker reports this alongside each queue, topic, and subscription.
/// A `Disabled` entity still exists but does not accept or deliver messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityStatus {
    Active,
    Disabled,
}

/// A read-only snapshot of an entity's runtime counters.
///
/// Fetched fresh from the broker on every listing call and never cached;
/// the numbers go stale the moment they are read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RuntimeMetrics {
    pub total_count: u64,
    pub active_count: u64,
    pub dead_letter_count: u64,
}

/// The name and status of an entity as returned by broker enumeration calls.
#[derive(Debug, Clone)]
pub struct EntityInfo {
    pub name: String,
    pub status: EntityStatus,
}

/// Identifies the target of a message operation (peek, send, purge).
///
/// A queue is addressed by a single name; a subscription is addressed by its
/// topic plus the subscription name. The variant structure makes an invalid
/// combination unrepresentable, so every operation boundary can match on it
/// exhaustively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityRef {
    Queue { name: String },
    TopicSubscription { topic: String, subscription: String },
}

impl EntityRef {
    pub fn queue(name: impl Into<String>) -> Self {
        Self::Queue { name: name.into() }
    }

    pub fn subscription(topic: impl Into<String>, subscription: impl Into<String>) -> Self {
        Self::TopicSubscription {
            topic: topic.into(),
            subscription: subscription.into(),
        }
    }

    /// Builds an `EntityRef` from the loose wire representation
    /// (`entityType` + `entityName` + optional `subscriptionName`).
    ///
    /// Rejected combinations:
    /// - an unknown entity kind
    /// - an empty primary name
    /// - kind `queue` with a subscription name supplied
    /// - kind `subscription` without a subscription name
    pub fn from_parts(kind: &str, name: &str, subscription: Option<&str>) -> BrokerResult<Self> {
        if name.is_empty() {
            return Err(BrokerError::validation("entity name is required"));
        }
        match kind {
            "queue" => match subscription {
                None => Ok(Self::queue(name)),
                Some(_) => Err(BrokerError::validation(
                    "a queue operation does not take a subscription name",
                )),
            },
            "subscription" => match subscription {
                Some(sub) if !sub.is_empty() => Ok(Self::subscription(name, sub)),
                _ => Err(BrokerError::validation(
                    "a subscription operation requires both a topic and a subscription name",
                )),
            },
            other => Err(BrokerError::validation(format!(
                "unknown entity type '{other}'"
            ))),
        }
    }

    /// The entity name a sender is opened on.
    ///
    /// Messages destined for a subscription are sent to its topic; fan-out
    /// to the individual subscriptions is the broker's job.
    pub fn send_target(&self) -> &str {
        match self {
            Self::Queue { name } => name,
            Self::TopicSubscription { topic, .. } => topic,
        }
    }
}

impl std::fmt::Display for EntityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Queue { name } => write!(f, "queue '{name}'"),
            Self::TopicSubscription {
                topic,
                subscription,
            } => write!(f, "subscription '{topic}/{subscription}'"),
        }
    }
}

/// Identifies an entity for create/delete administration calls.
///
/// Unlike [`EntityRef`], this also covers bare topics, which are managed
/// directly but are never the target of a message operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManagedEntity {
    Queue { name: String },
    Topic { name: String },
    Subscription { topic: String, name: String },
}

impl ManagedEntity {
    pub fn queue(name: impl Into<String>) -> Self {
        Self::Queue { name: name.into() }
    }

    pub fn topic(name: impl Into<String>) -> Self {
        Self::Topic { name: name.into() }
    }

    pub fn subscription(topic: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Subscription {
            topic: topic.into(),
            name: name.into(),
        }
    }
}
