//! Session facade - wires credentials, channels, dispatcher and policy.
//!
//! A [`Session`] owns everything needed to issue calls against the
//! configured endpoints: the loaded credential set, the channel manager and
//! the dispatcher with its worker pool. Construction is cheap; channels are
//! established lazily on first use.

use std::sync::Arc;

use crate::channel::ChannelManager;
use crate::credentials::CredentialSet;
use crate::dispatch::{CallHandle, CallOutcome, CallRequest, Dispatcher, DispatchStats};
use crate::transport::{Endpoint, GrpcTransport, Transport};
use crate::types::{Result, SessionConfig};

/// A client session over one credential set and any number of endpoints.
#[derive(Debug)]
pub struct Session {
    channels: Arc<ChannelManager>,
    dispatcher: Dispatcher,
}

impl Session {
    /// Build a session with the production gRPC transport. Fails fast when
    /// the credential files are missing or malformed - the only fatal
    /// startup condition.
    pub fn new(config: SessionConfig) -> Result<Self> {
        let credentials = Arc::new(CredentialSet::load(&config.credentials)?);
        Self::with_transport(config, Arc::new(GrpcTransport::new()), credentials)
    }

    /// Build a session over an arbitrary transport. Used by tests to inject
    /// failures; the credential set still comes from the caller.
    pub fn with_transport(
        config: SessionConfig,
        transport: Arc<dyn Transport>,
        credentials: Arc<CredentialSet>,
    ) -> Result<Self> {
        let endpoints = config
            .endpoints
            .iter()
            .map(Endpoint::from_config)
            .collect::<Result<Vec<_>>>()?;

        let channels = Arc::new(ChannelManager::new(
            transport,
            credentials,
            endpoints,
            config.connect.clone(),
        ));
        let dispatcher = Dispatcher::new(channels.clone(), config.call.clone(), &config.dispatch);

        tracing::info!(
            endpoints = config.endpoints.len(),
            workers = config.dispatch.workers,
            "session ready"
        );

        Ok(Self {
            channels,
            dispatcher,
        })
    }

    /// Submit a call request without waiting for its outcome.
    pub async fn submit(&self, request: CallRequest) -> Result<CallHandle> {
        self.dispatcher.submit(request).await
    }

    /// Submit a call request and wait for its outcome.
    pub async fn call(&self, request: CallRequest) -> CallOutcome {
        self.submit(request).await?.outcome().await
    }

    /// Channel manager, exposed for callers that manage invalidation
    /// explicitly.
    pub fn channels(&self) -> &Arc<ChannelManager> {
        &self.channels
    }

    /// Snapshot of the dispatch counters.
    pub async fn stats(&self) -> DispatchStats {
        self.dispatcher.stats().await
    }

    /// Number of calls currently awaiting an outcome.
    pub async fn in_flight(&self) -> usize {
        self.dispatcher.in_flight().await
    }

    /// Tear down the worker pool. In-flight calls resolve as cancelled.
    pub async fn shutdown(&self) {
        self.dispatcher.shutdown().await;
        tracing::info!("session shut down");
    }
}
