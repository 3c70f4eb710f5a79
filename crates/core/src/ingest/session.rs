//! Consumer-facing handle for one search session.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{broadcast, mpsc, Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::error;

use crate::source::TicketSource;
use crate::ticket::Ticket;
use crate::view::{compute_visible, count_matching, FilterId, FilterSet, SortMode, REVEAL_STEP};

use super::runner::IngestionLoop;
use super::types::{IngestError, IngestErrorInfo, IngestPhase, SessionState, TicketBatch};

/// A point-in-time view of the session for rendering code.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub phase: IngestPhase,
    pub is_loading: bool,
    pub is_background_loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<IngestErrorInfo>,
    /// Size of the full accumulated collection.
    pub total_tickets: usize,
    /// Tickets matching the active filters, ignoring the reveal limit.
    pub matching_tickets: usize,
    pub reveal_count: usize,
    pub sort: SortMode,
    pub filters: FilterSet,
    /// True when a no-results message should be shown: the filtered view
    /// is empty and ingestion is past the point where tickets might still
    /// be about to appear for the first time.
    pub no_results: bool,
}

/// One full search run, from session-token acquisition to terminal state.
///
/// Creating a session spawns the ingestion loop; the handle then exposes
/// the read surface and the user actions. A session is not restartable;
/// a new search means a new `SearchSession`.
pub struct SearchSession {
    state: Arc<RwLock<SessionState>>,
    cancel_tx: broadcast::Sender<()>,
    handle: Mutex<Option<JoinHandle<Result<Vec<Ticket>, IngestError>>>>,
}

impl SearchSession {
    /// Start a new search against the given source.
    pub fn start(source: Arc<dyn TicketSource>) -> Arc<Self> {
        Self::start_with_listener(source, None)
    }

    /// Start a new search, forwarding each ingested batch to `batch_tx`.
    pub fn start_with_listener(
        source: Arc<dyn TicketSource>,
        batch_tx: Option<mpsc::UnboundedSender<TicketBatch>>,
    ) -> Arc<Self> {
        let state = Arc::new(RwLock::new(SessionState::new()));
        let (cancel_tx, cancel_rx) = broadcast::channel(1);

        let mut ingest = IngestionLoop::new(source, Arc::clone(&state), cancel_rx);
        if let Some(tx) = batch_tx {
            ingest = ingest.with_batch_listener(tx);
        }
        let handle = tokio::spawn(ingest.run());

        Arc::new(Self {
            state,
            cancel_tx,
            handle: Mutex::new(Some(handle)),
        })
    }

    /// Current session snapshot.
    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.read().await;
        let matching = count_matching(&state.tickets, &state.filters);

        // Suppress the no-results signal while ingestion has started but
        // no batch has been confirmed yet.
        let awaiting_first_batch = state.is_loading && !state.is_background_loading;
        SessionSnapshot {
            phase: state.phase,
            is_loading: state.is_loading,
            is_background_loading: state.is_background_loading,
            last_error: state.last_error.clone(),
            total_tickets: state.tickets.len(),
            matching_tickets: matching,
            reveal_count: state.reveal_count,
            sort: state.sort,
            filters: state.filters.clone(),
            no_results: matching == 0 && !awaiting_first_batch,
        }
    }

    /// The visible prefix: filtered, sorted, truncated to the current
    /// reveal count.
    pub async fn visible_tickets(&self) -> Vec<Ticket> {
        let state = self.state.read().await;
        compute_visible(&state.tickets, &state.filters, state.sort, state.reveal_count)
    }

    /// Toggle a filter option.
    pub async fn set_filter(&self, id: FilterId, is_checked: bool) {
        self.state.write().await.filters.set_filter(id, is_checked);
    }

    /// Switch the sort mode.
    pub async fn set_sort(&self, sort: SortMode) {
        self.state.write().await.sort = sort;
    }

    /// Grow the visible prefix. Returns the new reveal count, which
    /// never decreases over the session's lifetime.
    pub async fn reveal_more(&self) -> usize {
        let mut state = self.state.write().await;
        state.reveal_count += REVEAL_STEP;
        state.reveal_count
    }

    /// Clear the surfaced error, if any. Ingested tickets are unaffected.
    pub async fn clear_error(&self) {
        self.state.write().await.last_error = None;
    }

    /// Ask the ingestion loop to stop at the next poll boundary.
    pub fn cancel(&self) {
        let _ = self.cancel_tx.send(());
    }

    /// Wait for the loop to reach its terminal state and return its
    /// result. Yields `None` on a second call or if the task panicked.
    pub async fn wait(&self) -> Option<Result<Vec<Ticket>, IngestError>> {
        let handle = self.handle.lock().await.take()?;
        match handle.await {
            Ok(result) => Some(result),
            Err(e) => {
                error!(error = %e, "Ingestion task aborted");
                None
            }
        }
    }
}
