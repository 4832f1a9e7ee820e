//! # rpc-session - Secure RPC Client Session Layer
//!
//! Client-side session manager for mutually authenticated RPC:
//! - One long-lived mutual-TLS channel per service endpoint, established
//!   lazily and re-established after failure (single-flight coalesced)
//! - Non-blocking call dispatch over a sized worker pool with a
//!   correlation table guaranteeing exactly-once outcome delivery
//! - Per-call deadline, bounded exponential-backoff retry for idempotent
//!   methods, and best-effort cancellation
//!
//! ## Architecture
//!
//! ```text
//!   caller ──submit──▶ ┌────────────────────────────────────┐
//!                      │             Dispatcher             │
//!                      │  ┌─────────┐      ┌─────────────┐  │
//!                      │  │ pending │      │ worker pool │  │
//!                      │  │  table  │      └──────┬──────┘  │
//!                      │  └────▲────┘             │         │
//!                      └───────┼──────────────────┼─────────┘
//!                              │deliver           │execute
//!                      ┌───────┴────────┐  ┌──────▼──────────┐
//!                      │   Correlator   │  │ ResiliencePolicy│
//!                      └────────────────┘  └──────┬──────────┘
//!                                                 │acquire/invalidate
//!                                          ┌──────▼──────────┐
//!                                          │ ChannelManager  │──▶ mTLS
//!                                          └─────────────────┘
//! ```
//!
//! The wire contract (method names, payload encodings) is external: the
//! session layer forwards both as opaque values.

// Enforce strict safety at compile time
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

// Re-export public API
pub mod channel;
pub mod credentials;
pub mod dispatch;
pub mod resilience;
pub mod session;
pub mod transport;
pub mod types;

// Internal utilities
pub mod observability;

pub use credentials::{CredentialPaths, CredentialSet};
pub use dispatch::{CallHandle, CallOutcome, CallRequest, DispatchStats};
pub use session::Session;
pub use transport::{Connection, Endpoint, GrpcTransport, Transport};
pub use types::{Error, Result, SessionConfig};
