use super::pending::PendingQuery;
use dashmap::DashMap;
use ferrous_stub_domain::{DnsErrorCode, DomainError};
use rustc_hash::FxBuildHasher;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::warn;

#[derive(Debug)]
struct IdState {
    next: u16,
    closed: bool,
}

/// In-flight queries keyed by transaction ID.
///
/// IDs come from a wrapping 16-bit counter. If a new query lands on an ID
/// whose previous owner is still registered, the old query is aborted with
/// `NoResponseFromServer` so it can never receive the new query's answer.
#[derive(Debug)]
pub struct TransactionRegistry {
    pending: DashMap<u16, Arc<PendingQuery>, FxBuildHasher>,
    state: Mutex<IdState>,
}

impl TransactionRegistry {
    pub fn new() -> Self {
        Self::with_initial_id(fastrand::u16(..))
    }

    pub fn with_initial_id(initial_id: u16) -> Self {
        Self {
            pending: DashMap::with_hasher(FxBuildHasher),
            state: Mutex::new(IdState {
                next: initial_id,
                closed: false,
            }),
        }
    }

    /// Allocates the next ID and registers a fresh pending query under it.
    pub fn begin(&self) -> Result<Arc<PendingQuery>, DomainError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.closed {
            return Err(DomainError::ClientShutdown);
        }

        let id = state.next;
        state.next = state.next.wrapping_add(1);

        let pending = Arc::new(PendingQuery::new(id));
        if let Some(stale) = self.pending.insert(id, Arc::clone(&pending)) {
            warn!(id, "Transaction ID reused while previous query still pending");
            stale.abort(DnsErrorCode::NoResponseFromServer);
        }

        Ok(pending)
    }

    /// Removes and returns the query registered under `id`.
    pub fn take(&self, id: u16) -> Option<Arc<PendingQuery>> {
        self.pending.remove(&id).map(|(_, pending)| pending)
    }

    /// Removes `pending` only if it still owns its ID.
    pub fn release(&self, pending: &Arc<PendingQuery>) -> bool {
        self.pending
            .remove_if(&pending.id(), |_, current| Arc::ptr_eq(current, pending))
            .is_some()
    }

    pub fn contains(&self, id: u16) -> bool {
        self.pending.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .closed
    }

    /// Refuses new queries and aborts every registered one. Returns how many
    /// were aborted.
    pub fn close(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .closed = true;

        let ids: Vec<u16> = self.pending.iter().map(|entry| *entry.key()).collect();
        let mut aborted = 0;
        for id in ids {
            if let Some((_, pending)) = self.pending.remove(&id) {
                if pending.abort(DnsErrorCode::NoResponseFromServer) {
                    aborted += 1;
                }
            }
        }
        aborted
    }
}

impl Default for TransactionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
