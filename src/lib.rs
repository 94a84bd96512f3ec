//! # Busboard
//!
//! `busboard` is a web dashboard service for inspecting and manipulating a
//! message-broker emulator: list queues, topics, and subscriptions with
//! their runtime counters, peek at and send messages, purge entities, and
//! create or delete them.
//!
//! ## Core Modules
//!
//! The library is structured into several modules, each with a distinct responsibility:
//!
//! - `broker`: The data model and the capability trait a broker backend implements,
//!   plus the in-process emulator backend.
//! - `explorer`: The entity browser and purge coordinator that mediates between the
//!   HTTP layer and the broker backend.
//! - `config`: Handles loading and managing service configuration, including broker
//!   connection-string parsing.
//! - `transport`: The HTTP API the dashboard UI consumes.
//! - `utils`: Contains shared utilities, such as error handling and logging setup.

pub mod broker;
pub mod config;
pub mod explorer;
pub mod transport;
pub mod utils;
