//! Configuration structures.
//!
//! All tunables of the session layer live here; nothing in the core embeds
//! addresses, paths, or timeouts. Configuration is loaded from a JSON file or
//! built programmatically.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::credentials::CredentialPaths;
use crate::types::{Error, Result};

/// Top-level session configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionConfig {
    /// Service endpoints reachable through this session.
    #[serde(default)]
    pub endpoints: Vec<EndpointConfig>,

    /// Paths to the mutual-TLS key material.
    #[serde(default)]
    pub credentials: CredentialPaths,

    /// Channel establishment configuration.
    #[serde(default)]
    pub connect: ConnectConfig,

    /// Per-call deadline and retry configuration.
    #[serde(default)]
    pub call: CallConfig,

    /// Dispatcher worker pool configuration.
    #[serde(default)]
    pub dispatch: DispatchConfig,
}

impl SessionConfig {
    /// Load configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::config(format!(
                "cannot read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// One service endpoint: where to connect and what identity to expect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Stable identifier used to address this endpoint in call requests.
    pub id: String,

    /// Network address, `host:port`.
    pub address: String,

    /// Expected TLS peer identity when it differs from the literal address
    /// (e.g. a certificate issued for `cln` served on `localhost`).
    #[serde(default)]
    pub tls_name: Option<String>,

    /// Service contract identifier, used as the method path prefix.
    pub service: String,
}

/// Channel establishment configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectConfig {
    /// Deadline for a single handshake attempt.
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,

    /// Handshake attempts per establishment before `acquire` fails.
    pub attempts: u32,
}

impl Default for ConnectConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            attempts: 1,
        }
    }
}

/// Per-call deadline and retry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallConfig {
    /// Deadline applied to each call attempt when the request carries none.
    #[serde(with = "humantime_serde")]
    pub default_timeout: Duration,

    /// Maximum retries after the first attempt (retry-eligible calls only).
    pub max_retries: u32,

    /// Backoff between retry attempts.
    #[serde(default)]
    pub backoff: BackoffConfig,
}

impl Default for CallConfig {
    fn default() -> Self {
        Self {
            default_timeout: Duration::from_secs(30),
            max_retries: 3,
            backoff: BackoffConfig::default(),
        }
    }
}

/// Exponential backoff parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Delay before the first retry.
    #[serde(with = "humantime_serde")]
    pub base: Duration,

    /// Multiplier applied per retry.
    pub factor: u32,

    /// Upper bound on the delay.
    #[serde(with = "humantime_serde")]
    pub cap: Duration,

    /// Add 0-10% random jitter to each delay.
    pub jitter: bool,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            base: Duration::from_millis(100),
            factor: 2,
            cap: Duration::from_secs(2),
            jitter: true,
        }
    }
}

/// Dispatcher worker pool configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Number of workers executing call attempts. Small values (1-8) are
    /// appropriate; workers only multiplex transport calls.
    pub workers: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self { workers: 4 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_policy() {
        let config = SessionConfig::default();
        assert_eq!(config.connect.timeout, Duration::from_secs(10));
        assert_eq!(config.connect.attempts, 1);
        assert_eq!(config.call.max_retries, 3);
        assert_eq!(config.call.backoff.base, Duration::from_millis(100));
        assert_eq!(config.call.backoff.factor, 2);
        assert_eq!(config.call.backoff.cap, Duration::from_secs(2));
        assert_eq!(config.dispatch.workers, 4);
    }

    #[test]
    fn parses_humantime_durations() {
        let raw = r#"{
            "endpoints": [
                {"id": "node", "address": "localhost:19111", "tls_name": "cln", "service": "cln.Node"}
            ],
            "connect": {"timeout": "5s", "attempts": 2},
            "call": {
                "default_timeout": "10s",
                "max_retries": 1,
                "backoff": {"base": "50ms", "factor": 3, "cap": "1s", "jitter": false}
            },
            "dispatch": {"workers": 2}
        }"#;

        let config: SessionConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.endpoints.len(), 1);
        assert_eq!(config.endpoints[0].tls_name.as_deref(), Some("cln"));
        assert_eq!(config.connect.timeout, Duration::from_secs(5));
        assert_eq!(config.connect.attempts, 2);
        assert_eq!(config.call.default_timeout, Duration::from_secs(10));
        assert_eq!(config.call.backoff.base, Duration::from_millis(50));
        assert!(!config.call.backoff.jitter);
        assert_eq!(config.dispatch.workers, 2);
    }

    #[test]
    fn missing_config_file_is_a_config_error() {
        let result = SessionConfig::from_json_file("/nonexistent/session.json");
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
