//! The `transport` module is responsible for the HTTP surface of the
//! dashboard.
//!
//! It defines the request/response shapes the dashboard UI speaks, and the
//! axum router and handlers that forward each request to the explorer.

pub mod http;
pub mod message;

pub use http::{AppState, build_router};

#[cfg(test)]
mod tests;
