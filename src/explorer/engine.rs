use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::broker::{
    BrokerClient, EntityRef, ManagedEntity, MessageReceiver, MessageRecord, MessageSender,
    OutboundMessage, ReceiveMode,
};
use crate::config::PurgeSettings;
use crate::explorer::summary::{QueueSummary, SubscriptionSummary, TopicSummary};
use crate::utils::error::{BrokerError, BrokerResult};

/// The entity browser and purge coordinator.
///
/// Translates browsing/management intents into calls against a broker
/// backend, normalizing the results. It keeps no state of its own between
/// calls: every operation opens the handles it needs, uses them, and closes
/// them on every exit path. The one non-trivial piece of control flow is
/// [`Explorer::purge_all`], the drain-until-empty loop.
#[derive(Clone)]
pub struct Explorer {
    client: Arc<dyn BrokerClient>,
    purge: PurgeSettings,
}

impl Explorer {
    pub fn new(client: Arc<dyn BrokerClient>, purge: PurgeSettings) -> Self {
        Self { client, purge }
    }

    /// Enumerates all queues with a fresh metrics snapshot per queue.
    ///
    /// The whole call fails if any underlying fetch fails; partial listings
    /// are never returned.
    pub async fn list_queues(&self) -> BrokerResult<Vec<QueueSummary>> {
        let mut summaries = Vec::new();
        for info in self.client.list_queues().await? {
            let metrics = self.client.queue_metrics(&info.name).await?;
            summaries.push(QueueSummary::new(info.name, info.status, metrics));
        }
        Ok(summaries)
    }

    /// Enumerates all topics with their subscription counts.
    pub async fn list_topics(&self) -> BrokerResult<Vec<TopicSummary>> {
        let mut summaries = Vec::new();
        for info in self.client.list_topics().await? {
            let subscription_count = self.client.list_subscriptions(&info.name).await?.len();
            summaries.push(TopicSummary {
                name: info.name,
                status: info.status,
                subscription_count,
            });
        }
        Ok(summaries)
    }

    /// Enumerates the subscriptions of one topic with fresh metrics.
    pub async fn list_subscriptions(&self, topic: &str) -> BrokerResult<Vec<SubscriptionSummary>> {
        let mut summaries = Vec::new();
        for info in self.client.list_subscriptions(topic).await? {
            let metrics = self
                .client
                .subscription_metrics(topic, &info.name)
                .await?;
            summaries.push(SubscriptionSummary::new(info.name, info.status, metrics));
        }
        Ok(summaries)
    }

    /// Creates an entity. Not idempotent: creating an existing name
    /// surfaces `EntityAlreadyExists`.
    pub async fn create_entity(&self, entity: &ManagedEntity) -> BrokerResult<()> {
        match entity {
            ManagedEntity::Queue { name } => self.client.create_queue(name).await?,
            ManagedEntity::Topic { name } => self.client.create_topic(name).await?,
            ManagedEntity::Subscription { topic, name } => {
                self.client.create_subscription(topic, name).await?
            }
        }
        info!("created {:?}", entity);
        Ok(())
    }

    /// Deletes an entity; deleting an absent one surfaces `EntityNotFound`.
    pub async fn delete_entity(&self, entity: &ManagedEntity) -> BrokerResult<()> {
        match entity {
            ManagedEntity::Queue { name } => self.client.delete_queue(name).await?,
            ManagedEntity::Topic { name } => self.client.delete_topic(name).await?,
            ManagedEntity::Subscription { topic, name } => {
                self.client.delete_subscription(topic, name).await?
            }
        }
        info!("deleted {:?}", entity);
        Ok(())
    }

    /// Non-destructive read of up to `max_count` messages in enqueue order.
    ///
    /// An empty result is not an error; it just means the entity holds no
    /// messages past the broker's peek cursor.
    pub async fn peek_messages(
        &self,
        entity: &EntityRef,
        max_count: usize,
    ) -> BrokerResult<Vec<MessageRecord>> {
        let mut receiver = self
            .client
            .open_receiver(entity, ReceiveMode::PeekLock)
            .await?;
        let peeked = receiver.peek(max_count).await;
        let closed = receiver.close().await;
        let records = peeked?;
        closed?;
        debug!("peeked {} messages from {}", records.len(), entity);
        Ok(records)
    }

    /// Sends one message, blocking until the broker acknowledges receipt.
    ///
    /// The sender handle is released regardless of outcome.
    pub async fn send_message(
        &self,
        entity: &EntityRef,
        message: OutboundMessage,
    ) -> BrokerResult<()> {
        let mut sender = self.client.open_sender(entity.send_target()).await?;
        let sent = sender.send(message).await;
        let closed = sender.close().await;
        sent?;
        closed?;
        debug!("sent message to {}", entity);
        Ok(())
    }

    /// Opens and immediately releases a destructive receiver without
    /// draining anything.
    ///
    /// The delete-messages request with the purge flag off does exactly
    /// this: the entity is checked to exist and no message is touched.
    pub async fn probe(&self, entity: &EntityRef) -> BrokerResult<()> {
        let receiver = self
            .client
            .open_receiver(entity, ReceiveMode::ReceiveAndDelete)
            .await?;
        receiver.close().await
    }

    /// Drains an entity with repeated bounded destructive receives until a
    /// receive returns no messages, and reports how many were removed.
    ///
    /// Batch size and per-batch wait come from [`PurgeSettings`]. The drain
    /// is not atomic against concurrent producers: a message enqueued
    /// mid-drain may or may not be purged. A mid-drain receive failure
    /// discards the partial count and surfaces `ReceiveFailed`; the
    /// receiver handle is released on every exit path.
    pub async fn purge_all(&self, entity: &EntityRef) -> BrokerResult<u64> {
        let mut receiver = self
            .client
            .open_receiver(entity, ReceiveMode::ReceiveAndDelete)
            .await?;
        let wait = Duration::from_millis(self.purge.wait_timeout_ms);
        let mut deleted: u64 = 0;

        loop {
            match receiver.receive(self.purge.batch_size, wait).await {
                Ok(batch) if batch.is_empty() => break,
                Ok(batch) => {
                    deleted += batch.len() as u64;
                    debug!("purge drained batch of {} from {}", batch.len(), entity);
                }
                Err(err) => {
                    let _ = receiver.close().await;
                    return Err(match err {
                        failed @ BrokerError::ReceiveFailed(_) => failed,
                        other => BrokerError::ReceiveFailed(other.to_string()),
                    });
                }
            }
        }

        receiver.close().await?;
        info!("purged {} messages from {}", deleted, entity);
        Ok(deleted)
    }
}
