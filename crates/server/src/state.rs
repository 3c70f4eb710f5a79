use std::sync::Arc;

use tokio::sync::{mpsc, RwLock};
use tracing::info;

use farefeed_core::{Config, SanitizedConfig, SearchSession, TicketBatch, TicketSource};

use crate::metrics::{SEARCHES_STARTED_TOTAL, TICKETS_INGESTED_TOTAL};

/// Shared application state.
///
/// Holds the upstream source and the single current search session.
/// Starting a new search cancels and replaces the previous session;
/// concurrent multi-session search is deliberately unsupported.
pub struct AppState {
    config: Config,
    source: Arc<dyn TicketSource>,
    session: RwLock<Option<Arc<SearchSession>>>,
}

impl AppState {
    pub fn new(config: Config, source: Arc<dyn TicketSource>) -> Self {
        Self {
            config,
            source,
            session: RwLock::new(None),
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    /// Start a new search session, cancelling any previous one.
    pub async fn start_search(&self) -> Arc<SearchSession> {
        let (batch_tx, mut batch_rx) = mpsc::unbounded_channel::<TicketBatch>();

        // Count ingested tickets as batches arrive.
        tokio::spawn(async move {
            while let Some(batch) = batch_rx.recv().await {
                TICKETS_INGESTED_TOTAL.inc_by(batch.tickets.len() as u64);
            }
        });

        let session = SearchSession::start_with_listener(Arc::clone(&self.source), Some(batch_tx));
        SEARCHES_STARTED_TOTAL.inc();

        let mut slot = self.session.write().await;
        if let Some(previous) = slot.replace(Arc::clone(&session)) {
            info!("Replacing previous search session");
            previous.cancel();
        }
        session
    }

    /// The current search session, if a search has been started.
    pub async fn session(&self) -> Option<Arc<SearchSession>> {
        self.session.read().await.clone()
    }

    /// Cancel the current session's ingestion, keeping its state readable.
    pub async fn cancel_session(&self) {
        if let Some(session) = self.session.read().await.as_ref() {
            session.cancel();
        }
    }
}
