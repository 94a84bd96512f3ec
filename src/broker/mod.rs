//! The `broker` module defines the boundary to the message broker.
//!
//! It contains the data model shared by every operation (entity references,
//! runtime metrics, message records), the [`BrokerClient`] capability trait
//! with its scoped sender/receiver handles, and [`memory::MemoryBroker`],
//! the in-process emulator backend.

pub mod client;
pub mod entity;
pub mod memory;
pub mod message;

pub use client::{BrokerClient, MessageReceiver, MessageSender, ReceiveMode};
pub use entity::{EntityInfo, EntityRef, EntityStatus, ManagedEntity, RuntimeMetrics};
pub use message::{MessageRecord, OutboundMessage, PropertyMap, PropertyValue};
