//! Background lookup worker.
//!
//! The controller lives on the UI thread and must not block on a provider.
//! Tickets go to a worker thread over one channel; results come back over
//! another and are drained by the event loop between frames. Responses are
//! never aborted in flight: stale ones are discarded by the controller.
//! Tickets still queued behind a newer one are skipped without a lookup.
//!
//! Dropping the worker closes the request channel and detaches the thread;
//! a lookup still running finishes in the background and its result is
//! discarded.

use super::SearchProvider;
use crate::model::{ProviderError, QueryTicket, TenantMatch};
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;
use tracing::{debug, trace};

/// A finished lookup, ready for `SearchController::complete`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResult {
    /// Ticket the lookup was issued for.
    pub ticket: QueryTicket,
    /// Provider outcome.
    pub outcome: Result<Vec<TenantMatch>, ProviderError>,
}

/// Owns both channel ends of the worker thread.
pub struct LookupWorker {
    requests: Sender<QueryTicket>,
    results: Receiver<LookupResult>,
}

impl LookupWorker {
    /// Start a worker thread running `provider`.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the thread cannot be spawned.
    pub fn spawn<P>(provider: P) -> std::io::Result<Self>
    where
        P: SearchProvider + 'static,
    {
        let (request_tx, request_rx) = unbounded::<QueryTicket>();
        let (result_tx, result_rx) = unbounded::<LookupResult>();

        std::thread::Builder::new()
            .name("tenantfind-lookup".to_string())
            .spawn(move || {
                for mut ticket in request_rx.iter() {
                    // generations only grow, so anything queued behind is newer
                    for newer in request_rx.try_iter() {
                        trace!(generation = ticket.generation(), "superseded lookup skipped");
                        ticket = newer;
                    }
                    trace!(generation = ticket.generation(), "lookup picked up");
                    let outcome = provider.search(ticket.query());
                    if result_tx.send(LookupResult { ticket, outcome }).is_err() {
                        break;
                    }
                }
                debug!("lookup worker stopped");
            })?;

        Ok(Self {
            requests: request_tx,
            results: result_rx,
        })
    }

    /// Queue a lookup.
    ///
    /// When the worker is gone the ticket comes straight back as a failed
    /// result so the caller can render the failure.
    pub fn submit(&self, ticket: QueryTicket) -> Result<(), LookupResult> {
        self.requests.send(ticket).map_err(|err| LookupResult {
            ticket: err.into_inner(),
            outcome: Err(ProviderError::Unavailable(
                "lookup worker stopped".to_string(),
            )),
        })
    }

    /// Every result that has arrived so far, without blocking.
    pub fn drain(&self) -> Vec<LookupResult> {
        self.results.try_iter().collect()
    }

    /// Wait up to `timeout` for the next result.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<LookupResult> {
        match self.results.recv_timeout(timeout) {
            Ok(result) => Some(result),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }
}

impl std::fmt::Debug for LookupWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupWorker")
            .field("queued", &self.requests.len())
            .field("pending_results", &self.results.len())
            .finish()
    }
}
