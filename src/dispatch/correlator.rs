//! Call result correlator - pending call table with exactly-once delivery.
//!
//! Every submitted call registers a oneshot sender keyed by its correlation
//! id. Delivery removes the entry and resolves the caller's handle; the
//! table therefore never holds more entries than there are in-flight calls.
//! Delivering to an unknown or already-resolved id is a no-op logged as a
//! protocol error - it indicates a bug upstream, never a fatal condition.

use std::collections::HashMap;
use tokio::sync::{oneshot, RwLock};

use crate::types::{CorrelationId, Error, Result};

/// Terminal result of one call request.
pub type CallOutcome = Result<bytes::Bytes>;

/// Pending call table.
#[derive(Debug, Default)]
pub struct Correlator {
    pending: RwLock<HashMap<CorrelationId, oneshot::Sender<CallOutcome>>>,
}

impl Correlator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new pending call, returning the receiver the caller's
    /// handle waits on.
    pub async fn register(&self, id: CorrelationId) -> oneshot::Receiver<CallOutcome> {
        let (tx, rx) = oneshot::channel();
        let previous = self.pending.write().await.insert(id.clone(), tx);
        if previous.is_some() {
            // Correlation ids are UUIDs; a collision here is a bug.
            tracing::warn!(correlation = %id, "duplicate correlation id registered");
        }
        rx
    }

    /// Resolve the pending call exactly once. Returns `false` when the id is
    /// unknown or already resolved.
    pub async fn deliver(&self, id: &CorrelationId, outcome: CallOutcome) -> bool {
        let sender = self.pending.write().await.remove(id);
        match sender {
            Some(tx) => {
                if tx.send(outcome).is_err() {
                    // Caller dropped its handle without cancelling; the
                    // outcome has nowhere to go.
                    tracing::debug!(correlation = %id, "caller gone before outcome delivery");
                }
                true
            }
            None => {
                tracing::warn!(
                    correlation = %id,
                    "protocol error: outcome for unknown or already-resolved call"
                );
                false
            }
        }
    }

    /// Proactively resolve a pending call as cancelled, removing its entry.
    /// Returns `false` when no entry was pending.
    pub async fn cancel(&self, id: &CorrelationId) -> bool {
        match self.pending.write().await.remove(id) {
            Some(tx) => {
                let _ = tx.send(Err(Error::cancelled("call cancelled by caller")));
                true
            }
            None => false,
        }
    }

    /// Number of calls currently awaiting an outcome.
    pub async fn in_flight(&self) -> usize {
        self.pending.read().await.len()
    }
}
