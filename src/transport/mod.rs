//! Transport boundary.
//!
//! The session core never interprets method identifiers or payloads; it
//! forwards them across this boundary as opaque values. [`Transport`]
//! establishes a secure connection to one endpoint, [`Connection`] executes
//! unary calls on it. The production implementation is [`GrpcTransport`]
//! (gRPC over mutual TLS); tests substitute scripted implementations.

use async_trait::async_trait;
use bytes::Bytes;
use std::fmt;
use std::time::Duration;

use crate::credentials::CredentialSet;
use crate::types::{EndpointConfig, EndpointId, Error, Result, ServiceId};

mod grpc;

pub use grpc::GrpcTransport;

/// One service endpoint: address, expected peer identity, service contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Stable identifier used to address this endpoint.
    pub id: EndpointId,

    /// Network address, `host:port`.
    pub address: String,

    /// Expected TLS peer identity, when distinct from the address host.
    pub tls_name: Option<String>,

    /// Service contract identifier (method path prefix on the wire).
    pub service: ServiceId,
}

impl Endpoint {
    /// Build a validated endpoint from its configuration entry.
    pub fn from_config(config: &EndpointConfig) -> Result<Self> {
        let id = EndpointId::from_string(config.id.clone()).map_err(Error::config)?;
        let service = ServiceId::from_string(config.service.clone()).map_err(Error::config)?;
        if config.address.is_empty() {
            return Err(Error::config(format!("endpoint {id} has an empty address")));
        }
        Ok(Self {
            id,
            address: config.address.clone(),
            tls_name: config.tls_name.clone(),
            service,
        })
    }
}

/// Connection factory: performs the mutually authenticated handshake.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Establish a secure connection to `endpoint`.
    ///
    /// `connect_timeout` bounds the handshake; implementations should also
    /// respect it internally where the underlying library supports it.
    async fn connect(
        &self,
        endpoint: &Endpoint,
        credentials: &CredentialSet,
        connect_timeout: Duration,
    ) -> Result<Box<dyn Connection>>;
}

/// A live secure connection executing unary calls.
#[async_trait]
pub trait Connection: Send + Sync + fmt::Debug {
    /// Execute one call. `method` and `payload` are opaque to the session
    /// layer; the deadline is enforced by the caller (resilience policy).
    async fn call(&self, method: &str, payload: Bytes) -> Result<Bytes>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_from_config_validates_fields() {
        let config = EndpointConfig {
            id: "node".to_string(),
            address: "localhost:19111".to_string(),
            tls_name: Some("cln".to_string()),
            service: "cln.Node".to_string(),
        };
        let endpoint = Endpoint::from_config(&config).unwrap();
        assert_eq!(endpoint.id.as_str(), "node");
        assert_eq!(endpoint.service.as_str(), "cln.Node");
        assert_eq!(endpoint.tls_name.as_deref(), Some("cln"));
    }

    #[test]
    fn endpoint_from_config_rejects_empty_address() {
        let config = EndpointConfig {
            id: "node".to_string(),
            address: String::new(),
            tls_name: None,
            service: "cln.Node".to_string(),
        };
        assert!(matches!(
            Endpoint::from_config(&config),
            Err(Error::Config(_))
        ));
    }
}
