use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use crate::broker::client::{BrokerClient, MessageReceiver, MessageSender, ReceiveMode};
use crate::broker::entity::{EntityInfo, EntityRef, EntityStatus, RuntimeMetrics};
use crate::broker::message::{MessageRecord, OutboundMessage};
use crate::utils::error::{BrokerError, BrokerResult};

/// The state of a single message store (a queue, or one subscription of a
/// topic): the pending messages plus the entity-lifetime sequence counter.
#[derive(Debug, Default)]
struct MessageStore {
    messages: VecDeque<MessageRecord>,
    next_sequence: u64,
}

impl MessageStore {
    fn enqueue(&mut self, message: &OutboundMessage) {
        let record = MessageRecord {
            id: uuid::Uuid::new_v4().to_string(),
            body: message.body.clone(),
            properties: message.properties.clone(),
            enqueued_at: Utc::now(),
            sequence_number: self.next_sequence,
            delivery_count: 0,
        };
        self.next_sequence += 1;
        self.messages.push_back(record);
    }

    fn metrics(&self) -> RuntimeMetrics {
        let count = self.messages.len() as u64;
        RuntimeMetrics {
            total_count: count,
            active_count: count,
            // The emulator has no dead-letter path; the counter exists so
            // listings carry the full shape.
            dead_letter_count: 0,
        }
    }
}

#[derive(Debug, Default)]
struct TopicState {
    subscriptions: HashMap<String, MessageStore>,
}

/// The whole emulator state behind one lock.
///
/// The lock is never held across an await point; every operation takes it,
/// mutates, and releases before suspending.
#[derive(Debug, Default)]
struct Shared {
    queues: HashMap<String, MessageStore>,
    topics: HashMap<String, TopicState>,
    destructive_receive_calls: u64,
}

impl Shared {
    fn store_mut(&mut self, entity: &EntityRef) -> BrokerResult<&mut MessageStore> {
        match entity {
            EntityRef::Queue { name } => self
                .queues
                .get_mut(name)
                .ok_or_else(|| BrokerError::EntityNotFound(name.clone())),
            EntityRef::TopicSubscription {
                topic,
                subscription,
            } => self
                .topics
                .get_mut(topic)
                .ok_or_else(|| BrokerError::EntityNotFound(topic.clone()))?
                .subscriptions
                .get_mut(subscription)
                .ok_or_else(|| {
                    BrokerError::EntityNotFound(format!("{topic}/{subscription}"))
                }),
        }
    }

    fn contains(&self, entity: &EntityRef) -> bool {
        match entity {
            EntityRef::Queue { name } => self.queues.contains_key(name),
            EntityRef::TopicSubscription {
                topic,
                subscription,
            } => self
                .topics
                .get(topic)
                .is_some_and(|t| t.subscriptions.contains_key(subscription)),
        }
    }
}

/// An in-process broker emulator.
///
/// Holds queues and topics in memory behind a mutex and implements the full
/// [`BrokerClient`] capability set. It is the default backend for local
/// development and the substitute client used by the test suite. It provides
/// no durability and no dead-lettering.
#[derive(Debug, Clone, Default)]
pub struct MemoryBroker {
    inner: Arc<Mutex<Shared>>,
}

impl MemoryBroker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of destructive receive calls served so far.
    ///
    /// Diagnostics counter; the drain tests use it to check how many
    /// batches a purge took.
    pub fn destructive_receive_calls(&self) -> u64 {
        self.inner.lock().unwrap().destructive_receive_calls
    }

    fn active_info(name: &str) -> EntityInfo {
        EntityInfo {
            name: name.to_string(),
            // The emulator has no disable operation, so everything it holds
            // is reported Active.
            status: EntityStatus::Active,
        }
    }

    fn sorted_infos<'a>(names: impl Iterator<Item = &'a String>) -> Vec<EntityInfo> {
        let mut infos: Vec<EntityInfo> = names.map(|n| Self::active_info(n)).collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        infos
    }
}

#[async_trait]
impl BrokerClient for MemoryBroker {
    async fn list_queues(&self) -> BrokerResult<Vec<EntityInfo>> {
        let shared = self.inner.lock().unwrap();
        Ok(Self::sorted_infos(shared.queues.keys()))
    }

    async fn queue_metrics(&self, name: &str) -> BrokerResult<RuntimeMetrics> {
        let shared = self.inner.lock().unwrap();
        shared
            .queues
            .get(name)
            .map(MessageStore::metrics)
            .ok_or_else(|| BrokerError::EntityNotFound(name.to_string()))
    }

    async fn create_queue(&self, name: &str) -> BrokerResult<()> {
        let mut shared = self.inner.lock().unwrap();
        if shared.queues.contains_key(name) {
            return Err(BrokerError::EntityAlreadyExists(name.to_string()));
        }
        shared.queues.insert(name.to_string(), MessageStore::default());
        Ok(())
    }

    async fn delete_queue(&self, name: &str) -> BrokerResult<()> {
        let mut shared = self.inner.lock().unwrap();
        shared
            .queues
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| BrokerError::EntityNotFound(name.to_string()))
    }

    async fn list_topics(&self) -> BrokerResult<Vec<EntityInfo>> {
        let shared = self.inner.lock().unwrap();
        Ok(Self::sorted_infos(shared.topics.keys()))
    }

    async fn create_topic(&self, name: &str) -> BrokerResult<()> {
        let mut shared = self.inner.lock().unwrap();
        if shared.topics.contains_key(name) {
            return Err(BrokerError::EntityAlreadyExists(name.to_string()));
        }
        shared.topics.insert(name.to_string(), TopicState::default());
        Ok(())
    }

    async fn delete_topic(&self, name: &str) -> BrokerResult<()> {
        let mut shared = self.inner.lock().unwrap();
        shared
            .topics
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| BrokerError::EntityNotFound(name.to_string()))
    }

    async fn list_subscriptions(&self, topic: &str) -> BrokerResult<Vec<EntityInfo>> {
        let shared = self.inner.lock().unwrap();
        let state = shared
            .topics
            .get(topic)
            .ok_or_else(|| BrokerError::EntityNotFound(topic.to_string()))?;
        Ok(Self::sorted_infos(state.subscriptions.keys()))
    }

    async fn subscription_metrics(
        &self,
        topic: &str,
        subscription: &str,
    ) -> BrokerResult<RuntimeMetrics> {
        let shared = self.inner.lock().unwrap();
        shared
            .topics
            .get(topic)
            .and_then(|t| t.subscriptions.get(subscription))
            .map(MessageStore::metrics)
            .ok_or_else(|| BrokerError::EntityNotFound(format!("{topic}/{subscription}")))
    }

    async fn create_subscription(&self, topic: &str, subscription: &str) -> BrokerResult<()> {
        let mut shared = self.inner.lock().unwrap();
        let state = shared
            .topics
            .get_mut(topic)
            .ok_or_else(|| BrokerError::EntityNotFound(topic.to_string()))?;
        if state.subscriptions.contains_key(subscription) {
            return Err(BrokerError::EntityAlreadyExists(format!(
                "{topic}/{subscription}"
            )));
        }
        state
            .subscriptions
            .insert(subscription.to_string(), MessageStore::default());
        Ok(())
    }

    async fn delete_subscription(&self, topic: &str, subscription: &str) -> BrokerResult<()> {
        let mut shared = self.inner.lock().unwrap();
        let state = shared
            .topics
            .get_mut(topic)
            .ok_or_else(|| BrokerError::EntityNotFound(topic.to_string()))?;
        state
            .subscriptions
            .remove(subscription)
            .map(|_| ())
            .ok_or_else(|| BrokerError::EntityNotFound(format!("{topic}/{subscription}")))
    }

    async fn open_sender(&self, target: &str) -> BrokerResult<Box<dyn MessageSender>> {
        let shared = self.inner.lock().unwrap();
        if !shared.queues.contains_key(target) && !shared.topics.contains_key(target) {
            return Err(BrokerError::EntityNotFound(target.to_string()));
        }
        Ok(Box::new(MemorySender {
            inner: Arc::clone(&self.inner),
            target: target.to_string(),
        }))
    }

    async fn open_receiver(
        &self,
        entity: &EntityRef,
        mode: ReceiveMode,
    ) -> BrokerResult<Box<dyn MessageReceiver>> {
        let shared = self.inner.lock().unwrap();
        if !shared.contains(entity) {
            return Err(BrokerError::EntityNotFound(entity.to_string()));
        }
        Ok(Box::new(MemoryReceiver {
            inner: Arc::clone(&self.inner),
            entity: entity.clone(),
            mode,
            peek_cursor: 0,
        }))
    }
}

/// Sender handle over the shared emulator state.
struct MemorySender {
    inner: Arc<Mutex<Shared>>,
    target: String,
}

#[async_trait]
impl MessageSender for MemorySender {
    async fn send(&mut self, message: OutboundMessage) -> BrokerResult<()> {
        let mut shared = self.inner.lock().unwrap();
        if let Some(queue) = shared.queues.get_mut(&self.target) {
            queue.enqueue(&message);
            return Ok(());
        }
        if let Some(topic) = shared.topics.get_mut(&self.target) {
            // Topic fan-out: every subscription gets its own copy with its
            // own sequence number.
            for store in topic.subscriptions.values_mut() {
                store.enqueue(&message);
            }
            return Ok(());
        }
        // The entity disappeared between open and send.
        Err(BrokerError::SendRejected(format!(
            "entity '{}' no longer exists",
            self.target
        )))
    }

    async fn close(self: Box<Self>) -> BrokerResult<()> {
        Ok(())
    }
}

/// Receiver handle over the shared emulator state.
///
/// The peek cursor lives here, so each freshly opened receiver peeks from
/// the head of the entity again.
struct MemoryReceiver {
    inner: Arc<Mutex<Shared>>,
    entity: EntityRef,
    mode: ReceiveMode,
    peek_cursor: usize,
}

impl MemoryReceiver {
    fn drain(&self, max_count: usize) -> BrokerResult<Vec<MessageRecord>> {
        let mut shared = self.inner.lock().unwrap();
        let store = shared.store_mut(&self.entity)?;
        let take = max_count.min(store.messages.len());
        Ok(store.messages.drain(..take).collect())
    }
}

#[async_trait]
impl MessageReceiver for MemoryReceiver {
    async fn peek(&mut self, max_count: usize) -> BrokerResult<Vec<MessageRecord>> {
        let mut shared = self.inner.lock().unwrap();
        let store = shared.store_mut(&self.entity)?;
        let records: Vec<MessageRecord> = store
            .messages
            .iter()
            .skip(self.peek_cursor)
            .take(max_count)
            .cloned()
            .collect();
        self.peek_cursor += records.len();
        Ok(records)
    }

    async fn receive(
        &mut self,
        max_count: usize,
        wait: Duration,
    ) -> BrokerResult<Vec<MessageRecord>> {
        if self.mode != ReceiveMode::ReceiveAndDelete {
            return Err(BrokerError::ReceiveFailed(
                "receiver was not opened in receive-and-delete mode".to_string(),
            ));
        }
        self.inner.lock().unwrap().destructive_receive_calls += 1;

        let batch = self.drain(max_count)?;
        if !batch.is_empty() || wait.is_zero() {
            return Ok(batch);
        }
        // Nothing available: honor the bounded wait, then check once more.
        tokio::time::sleep(wait).await;
        self.drain(max_count)
    }

    async fn close(self: Box<Self>) -> BrokerResult<()> {
        Ok(())
    }
}
