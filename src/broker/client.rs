use std::time::Duration;

use async_trait::async_trait;

use crate::broker::entity::{EntityInfo, EntityRef, RuntimeMetrics};
use crate::broker::message::{MessageRecord, OutboundMessage};
use crate::utils::error::BrokerResult;

/// The mode a receiver handle is opened in.
///
/// `PeekLock` supports non-destructive peeking; `ReceiveAndDelete` removes
/// each message permanently as it is handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiveMode {
    PeekLock,
    ReceiveAndDelete,
}

/// A scoped sender handle for a single entity.
///
/// Opened per call and closed on every exit path, success or failure.
#[async_trait]
pub trait MessageSender: Send {
    /// Submits a message and blocks until the broker acknowledges receipt.
    async fn send(&mut self, message: OutboundMessage) -> BrokerResult<()>;

    /// Releases the handle. Consumes it so a closed sender cannot be reused.
    async fn close(self: Box<Self>) -> BrokerResult<()>;
}

/// A scoped receiver handle for a single entity.
///
/// The peek cursor belongs to the handle: a fresh receiver peeks from the
/// head of the entity again.
#[async_trait]
pub trait MessageReceiver: Send {
    /// Non-destructive read of up to `max_count` messages in enqueue order.
    ///
    /// Returns fewer messages if the entity holds fewer, and an empty
    /// vector if it is empty; neither is an error. Peeking never changes
    /// delivery counts or removes messages.
    async fn peek(&mut self, max_count: usize) -> BrokerResult<Vec<MessageRecord>>;

    /// Bounded destructive receive: up to `max_count` messages, waiting at
    /// most `wait` for anything to become available.
    ///
    /// Only valid on a handle opened in `ReceiveAndDelete` mode. An empty
    /// result means the entity was empty for the full wait window.
    async fn receive(
        &mut self,
        max_count: usize,
        wait: Duration,
    ) -> BrokerResult<Vec<MessageRecord>>;

    /// Releases the handle. Consumes it so a closed receiver cannot be reused.
    async fn close(self: Box<Self>) -> BrokerResult<()>;
}

/// The capability set the dashboard needs from a broker backend.
///
/// Everything the explorer does goes through this trait, so any backend
/// implementing it (the in-memory emulator, or a networked client) can sit
/// behind the same HTTP surface.
#[async_trait]
pub trait BrokerClient: Send + Sync {
    async fn list_queues(&self) -> BrokerResult<Vec<EntityInfo>>;
    async fn queue_metrics(&self, name: &str) -> BrokerResult<RuntimeMetrics>;
    async fn create_queue(&self, name: &str) -> BrokerResult<()>;
    async fn delete_queue(&self, name: &str) -> BrokerResult<()>;

    async fn list_topics(&self) -> BrokerResult<Vec<EntityInfo>>;
    async fn create_topic(&self, name: &str) -> BrokerResult<()>;
    async fn delete_topic(&self, name: &str) -> BrokerResult<()>;

    async fn list_subscriptions(&self, topic: &str) -> BrokerResult<Vec<EntityInfo>>;
    async fn subscription_metrics(
        &self,
        topic: &str,
        subscription: &str,
    ) -> BrokerResult<RuntimeMetrics>;
    async fn create_subscription(&self, topic: &str, subscription: &str) -> BrokerResult<()>;
    async fn delete_subscription(&self, topic: &str, subscription: &str) -> BrokerResult<()>;

    /// Opens a sender on a queue or topic name.
    async fn open_sender(&self, target: &str) -> BrokerResult<Box<dyn MessageSender>>;

    /// Opens a receiver on a queue or topic subscription.
    async fn open_receiver(
        &self,
        entity: &EntityRef,
        mode: ReceiveMode,
    ) -> BrokerResult<Box<dyn MessageReceiver>>;
}
