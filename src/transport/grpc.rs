//! gRPC transport over mutual TLS.
//!
//! Builds a tonic channel with the client identity and trust root from the
//! credential set, verifying the peer against the configured identity
//! override when one is set. Calls are executed as unary requests with an
//! identity codec: payloads pass through as raw bytes, never interpreted.

use async_trait::async_trait;
use bytes::{Buf, BufMut, Bytes};
use http::uri::PathAndQuery;
use std::time::Duration;
use tonic::codec::{Codec, DecodeBuf, Decoder, EncodeBuf, Encoder};
use tonic::transport::{Certificate, Channel, ClientTlsConfig, Endpoint as TonicEndpoint, Identity};
use tonic::{Code, Request, Status};

use crate::credentials::CredentialSet;
use crate::transport::{Connection, Endpoint, Transport};
use crate::types::{Error, Result, ServiceId};

/// Production transport: gRPC over mutually authenticated TLS.
#[derive(Debug, Clone, Default)]
pub struct GrpcTransport;

impl GrpcTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Transport for GrpcTransport {
    async fn connect(
        &self,
        endpoint: &Endpoint,
        credentials: &CredentialSet,
        connect_timeout: Duration,
    ) -> Result<Box<dyn Connection>> {
        let mut tls = ClientTlsConfig::new()
            .ca_certificate(Certificate::from_pem(credentials.root_ca_pem()))
            .identity(Identity::from_pem(
                credentials.client_cert_pem(),
                credentials.client_key_pem(),
            ));
        if let Some(name) = &endpoint.tls_name {
            tls = tls.domain_name(name.clone());
        }

        let uri = format!("https://{}", endpoint.address);
        let channel = TonicEndpoint::from_shared(uri)
            .map_err(|e| Error::config(format!("invalid address {}: {}", endpoint.address, e)))?
            .tls_config(tls)
            .map_err(|e| Error::connection(format!("tls setup for {}: {}", endpoint.id, e)))?
            .connect_timeout(connect_timeout)
            .connect()
            .await
            .map_err(|e| {
                Error::connection(format!(
                    "handshake with {} ({}) failed: {}",
                    endpoint.id, endpoint.address, e
                ))
            })?;

        Ok(Box::new(GrpcConnection {
            service: endpoint.service.clone(),
            channel,
        }))
    }
}

/// One established tonic channel, bound to a single service contract.
#[derive(Debug)]
struct GrpcConnection {
    service: ServiceId,
    channel: Channel,
}

#[async_trait]
impl Connection for GrpcConnection {
    async fn call(&self, method: &str, payload: Bytes) -> Result<Bytes> {
        let path = PathAndQuery::from_maybe_shared(format!("/{}/{}", self.service, method))
            .map_err(|e| Error::protocol(format!("invalid method path {method}: {e}")))?;

        // Channel clones share the underlying connection.
        let mut grpc = tonic::client::Grpc::new(self.channel.clone());
        grpc.ready()
            .await
            .map_err(|e| Error::unavailable(format!("channel to {} not ready: {}", self.service, e)))?;

        let response = grpc
            .unary(Request::new(payload), path, RawCodec)
            .await
            .map_err(status_to_error)?;
        Ok(response.into_inner())
    }
}

/// Map a gRPC status onto the session error taxonomy. Transport-level codes
/// become `Unavailable` (retry-eligible); everything the remote explicitly
/// returned becomes `Rejected` and is never retried.
fn status_to_error(status: Status) -> Error {
    match status.code() {
        Code::Unavailable | Code::Aborted | Code::Unknown => {
            Error::unavailable(status.message().to_string())
        }
        Code::DeadlineExceeded => Error::timeout(status.message().to_string()),
        Code::Cancelled => Error::cancelled(status.message().to_string()),
        code => Error::rejected(format!("{code:?}"), status.message().to_string()),
    }
}

// =============================================================================
// Identity codec - raw bytes in, raw bytes out
// =============================================================================

#[derive(Debug, Clone, Default)]
struct RawCodec;

impl Codec for RawCodec {
    type Encode = Bytes;
    type Decode = Bytes;
    type Encoder = RawEncoder;
    type Decoder = RawDecoder;

    fn encoder(&mut self) -> Self::Encoder {
        RawEncoder
    }

    fn decoder(&mut self) -> Self::Decoder {
        RawDecoder
    }
}

#[derive(Debug)]
struct RawEncoder;

impl Encoder for RawEncoder {
    type Item = Bytes;
    type Error = Status;

    fn encode(&mut self, item: Bytes, dst: &mut EncodeBuf<'_>) -> std::result::Result<(), Status> {
        dst.put(item);
        Ok(())
    }
}

#[derive(Debug)]
struct RawDecoder;

impl Decoder for RawDecoder {
    type Item = Bytes;
    type Error = Status;

    fn decode(&mut self, src: &mut DecodeBuf<'_>) -> std::result::Result<Option<Bytes>, Status> {
        let remaining = src.remaining();
        Ok(Some(src.copy_to_bytes(remaining)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_and_unknown_statuses_are_retryable() {
        let err = status_to_error(Status::unavailable("connection reset"));
        assert!(matches!(err, Error::Unavailable(_)));
        assert!(err.is_retryable());

        let err = status_to_error(Status::unknown("stream closed"));
        assert!(err.is_retryable());
    }

    #[test]
    fn application_statuses_map_to_rejected() {
        let err = status_to_error(Status::invalid_argument("label already used"));
        match err {
            Error::Rejected { code, detail } => {
                assert_eq!(code, "InvalidArgument");
                assert_eq!(detail, "label already used");
            }
            other => panic!("expected Rejected, got {other}"),
        }
    }

    #[test]
    fn deadline_status_maps_to_timeout() {
        let err = status_to_error(Status::deadline_exceeded("too slow"));
        assert!(matches!(err, Error::Timeout(_)));
    }
}
