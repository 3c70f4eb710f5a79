//! Types for the upstream ticket search service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ticket::RawTicket;

/// Opaque token identifying one search session on the upstream service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchId(pub String);

impl std::fmt::Display for SearchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One poll response from the upstream service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollBatch {
    /// Tickets in this batch. May be empty.
    pub tickets: Vec<RawTicket>,
    /// True when the upstream has no more batches for this search.
    pub stop: bool,
}

/// Errors that can occur talking to the upstream service.
///
/// The ingestion loop classifies these: only `Server` is transient and
/// retried; everything else terminates the session.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Upstream server error: HTTP {status}")]
    Server { status: u16 },

    #[error("Upstream rejected request: HTTP {status}")]
    Request { status: u16 },

    #[error("Upstream response violates contract: {0}")]
    MalformedBody(String),

    #[error("Upstream connection failed: {0}")]
    Connection(String),

    #[error("Upstream request timeout")]
    Timeout,
}

impl SourceError {
    /// Whether the ingestion loop may retry the same request.
    /// Only server-side (5xx) failures are retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, SourceError::Server { .. })
    }
}

/// Trait for upstream ticket search backends.
#[async_trait]
pub trait TicketSource: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Start a new search and obtain its session token.
    async fn start_search(&self) -> Result<SearchId, SourceError>;

    /// Fetch the next batch of tickets for an ongoing search.
    async fn poll(&self, search_id: &SearchId) -> Result<PollBatch, SourceError>;
}
