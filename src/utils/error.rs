//! The `error` module defines the error taxonomy used within the `busboard`
//! application.
//!
//! This module centralizes error handling, providing a consistent way to
//! represent and propagate errors throughout the system. Broker-originated
//! message text is carried verbatim so the presentation layer can surface it
//! unchanged.

use thiserror::Error;

/// Errors produced by broker operations.
///
/// `Validation` is raised before any network call is made; every other
/// variant originates from the broker backend and keeps its message text
/// intact so callers can pass it through to the user.
#[derive(Debug, Error)]
pub enum BrokerError {
    /// The request was malformed and was rejected before contacting the broker.
    #[error("{0}")]
    Validation(String),

    /// An entity with the requested name already exists.
    #[error("entity '{0}' already exists")]
    EntityAlreadyExists(String),

    /// The requested entity does not exist.
    #[error("entity '{0}' does not exist")]
    EntityNotFound(String),

    /// The broker endpoint could not be reached.
    #[error("broker unavailable: {0}")]
    BrokerUnavailable(String),

    /// The broker refused an outbound message.
    #[error("send rejected: {0}")]
    SendRejected(String),

    /// A destructive receive failed mid-drain.
    #[error("receive failed: {0}")]
    ReceiveFailed(String),
}

impl BrokerError {
    /// Creates a `Validation` error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

pub type BrokerResult<T> = Result<T, BrokerError>;
