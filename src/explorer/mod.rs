//! The `explorer` module is the heart of the dashboard: the entity browser
//! and purge coordinator.
//!
//! It mediates between the HTTP layer and the broker backend, exposing
//! listing, create/delete, peek, send, and purge uniformly across queues
//! and topic subscriptions.

pub mod engine;
pub mod summary;

pub use engine::Explorer;
pub use summary::{QueueSummary, SubscriptionSummary, TopicSummary};
