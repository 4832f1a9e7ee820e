//! Core types for the session layer.
//!
//! This module provides foundational types used throughout the system:
//! - **IDs**: Strongly-typed identifiers (CorrelationId, EndpointId, ServiceId)
//! - **Errors**: Application error types with thiserror derives
//! - **Config**: Configuration structures for endpoints, credentials and policy

mod config;
mod errors;
mod ids;

pub use config::{
    BackoffConfig, CallConfig, ConnectConfig, DispatchConfig, EndpointConfig, SessionConfig,
};
pub use errors::{Error, Result};
pub use ids::{CorrelationId, EndpointId, ServiceId};
