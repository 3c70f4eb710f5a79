//! The polling ingestion loop.
//!
//! Drives one search session through its state machine:
//! `AcquiringSession → Polling → {Completed | Failed | Cancelled}`, with
//! `Polling` self-looping on transient server failures. Each successful
//! batch is appended to the shared session state as it arrives, so
//! consumers can render partial results before the loop finishes.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, RwLock};
use tracing::{debug, info};

use crate::source::{SourceError, TicketSource};
use crate::ticket::{Ticket, TicketId};

use super::types::{IngestError, IngestPhase, SessionState, TicketBatch};

/// One run of the ingestion loop. Finite and not restartable: `run`
/// consumes the loop.
pub struct IngestionLoop {
    source: Arc<dyn TicketSource>,
    state: Arc<RwLock<SessionState>>,
    cancel_rx: broadcast::Receiver<()>,
    batch_tx: Option<mpsc::UnboundedSender<TicketBatch>>,
    next_id: u64,
}

impl IngestionLoop {
    pub fn new(
        source: Arc<dyn TicketSource>,
        state: Arc<RwLock<SessionState>>,
        cancel_rx: broadcast::Receiver<()>,
    ) -> Self {
        Self {
            source,
            state,
            cancel_rx,
            batch_tx: None,
            next_id: 0,
        }
    }

    /// Emit every ingested batch to the given channel, in arrival order.
    pub fn with_batch_listener(mut self, batch_tx: mpsc::UnboundedSender<TicketBatch>) -> Self {
        self.batch_tx = Some(batch_tx);
        self
    }

    /// Run the loop to its terminal state.
    ///
    /// On success the full accumulated collection is returned. This is
    /// redundant with the incremental appends to the shared state but
    /// kept for consumers that only read the terminal result.
    pub async fn run(mut self) -> Result<Vec<Ticket>, IngestError> {
        let result = self.drive().await;

        let mut state = self.state.write().await;
        state.is_loading = false;
        state.is_background_loading = false;
        match &result {
            Ok(tickets) => {
                state.phase = IngestPhase::Completed;
                info!(total = tickets.len(), "Ingestion completed");
            }
            Err(IngestError::Cancelled) => {
                state.phase = IngestPhase::Cancelled;
                info!(total = state.tickets.len(), "Ingestion cancelled");
            }
            Err(e) => {
                state.phase = IngestPhase::Failed;
                state.last_error = e.info();
                info!(total = state.tickets.len(), error = %e, "Ingestion failed");
            }
        }

        result
    }

    async fn drive(&mut self) -> Result<Vec<Ticket>, IngestError> {
        {
            let mut state = self.state.write().await;
            state.phase = IngestPhase::AcquiringSession;
            state.is_loading = true;
            state.last_error = None;
        }

        // Any failure acquiring the session token is fatal, no retries.
        let search_id = self
            .source
            .start_search()
            .await
            .map_err(IngestError::Session)?;
        debug!(source = self.source.name(), search_id = %search_id, "Search session acquired");

        self.state.write().await.phase = IngestPhase::Polling;

        loop {
            // The cancel signal is honored at every poll boundary; an
            // abandoned session (sender dropped) stops the same way.
            let batch = tokio::select! {
                _ = self.cancel_rx.recv() => return Err(IngestError::Cancelled),
                result = self.source.poll(&search_id) => match result {
                    Ok(batch) => batch,
                    Err(e) if e.is_transient() => {
                        debug!(error = %e, "Transient upstream failure, retrying poll");
                        continue;
                    }
                    Err(SourceError::MalformedBody(msg)) => {
                        return Err(IngestError::DataFormat(msg));
                    }
                    Err(e) => return Err(IngestError::Request(e)),
                }
            };

            let stop = batch.stop;
            let tickets: Vec<Ticket> = batch
                .tickets
                .into_iter()
                .map(|raw| {
                    let id = TicketId(self.next_id);
                    self.next_id += 1;
                    Ticket::from_raw(id, raw)
                })
                .collect();

            let total = {
                let mut state = self.state.write().await;
                state.tickets.extend(tickets.iter().cloned());
                state.is_background_loading = true;
                state.tickets.len()
            };
            debug!(batch = tickets.len(), total, stop, "Batch ingested");

            if let Some(tx) = &self.batch_tx {
                // Listener gone is not an ingestion failure.
                let _ = tx.send(TicketBatch { tickets });
            }

            if stop {
                break;
            }
        }

        let state = self.state.read().await;
        Ok(state.tickets.clone())
    }
}
