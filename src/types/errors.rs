//! Application error types.
//!
//! All errors use `thiserror` for automatic Error trait derivation and carry
//! enough detail for the caller to decide what to do next. The taxonomy maps
//! directly onto the retry policy:
//!
//! - `Credential` and `Config` are fatal at startup and never retried.
//! - `Connection` is retried only when a channel is (re-)established, bounded
//!   by the configured attempt limit.
//! - `Timeout` and `Unavailable` are retried for retry-eligible calls;
//!   `Unavailable` additionally invalidates the channel it was observed on.
//! - `Rejected` is an application-level remote error, surfaced verbatim and
//!   never retried.
//! - `Protocol` indicates an internal correlation bug; it is logged and never
//!   propagated to a caller.

use thiserror::Error;

/// Application result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error enum for the session layer.
#[derive(Error, Debug)]
pub enum Error {
    /// Bad or missing key material (fatal at startup, never retried).
    #[error("credential error: {0}")]
    Credential(String),

    /// Invalid or inconsistent configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// TLS handshake failure, peer identity mismatch, or connect timeout.
    #[error("connection error: {0}")]
    Connection(String),

    /// Call deadline exceeded.
    #[error("timeout: {0}")]
    Timeout(String),

    /// Transport-level failure mid-call (broken channel).
    #[error("unavailable: {0}")]
    Unavailable(String),

    /// Application-level remote error (never retried).
    #[error("rejected by remote ({code}): {detail}")]
    Rejected { code: String, detail: String },

    /// Internal correlation bug (logged, never delivered to a caller).
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Call abandoned by the caller or the session shutting down.
    #[error("cancelled: {0}")]
    Cancelled(String),

    /// I/O errors (file reads during credential loading).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors (configuration files).
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Whether a retry-eligible call may be re-attempted after this error.
    ///
    /// `Connection` is deliberately absent: handshake retries happen only
    /// inside channel establishment, bounded by the configured attempt
    /// limit, never at the call level.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Timeout(_) | Error::Unavailable(_))
    }

    /// Whether this error indicates a broken channel that must be
    /// re-established before the next attempt.
    pub fn invalidates_channel(&self) -> bool {
        matches!(self, Error::Unavailable(_))
    }
}

// Convenience constructors
impl Error {
    pub fn credential(msg: impl Into<String>) -> Self {
        Self::Credential(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn rejected(code: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Rejected {
            code: code.into(),
            detail: detail.into(),
        }
    }

    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::Protocol(msg.into())
    }

    pub fn cancelled(msg: impl Into<String>) -> Self {
        Self::Cancelled(msg.into())
    }
}
