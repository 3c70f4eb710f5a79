//! Session state and error types for the ingestion pipeline.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::source::SourceError;
use crate::ticket::Ticket;
use crate::view::{FilterSet, SortMode, INITIAL_REVEAL};

/// Where the ingestion loop currently is in its lifecycle.
///
/// `Polling` self-loops on transient server failures. No transition
/// returns to `Idle`; a fresh search creates a new session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestPhase {
    Idle,
    AcquiringSession,
    Polling,
    Completed,
    Failed,
    Cancelled,
}

/// Fatal outcomes of an ingestion session.
///
/// Transient server failures never appear here; they are retried inside
/// the loop and are invisible to consumers.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Could not obtain a search session. No tickets are available.
    #[error("Failed to obtain search session: {0}")]
    Session(#[source] SourceError),

    /// The upstream returned a body violating the poll contract.
    /// Tickets ingested before this point are preserved.
    #[error("Upstream returned malformed data: {0}")]
    DataFormat(String),

    /// A non-retryable request failure mid-poll. Tickets ingested before
    /// this point are preserved.
    #[error("Ticket request failed: {0}")]
    Request(#[source] SourceError),

    /// The session was cancelled by its consumer. Not a failure; no
    /// error is surfaced to the user.
    #[error("Search session cancelled")]
    Cancelled,
}

impl IngestError {
    /// The user-facing descriptor for this error, if any.
    /// Cancellation is consumer-initiated and produces none.
    pub fn info(&self) -> Option<IngestErrorInfo> {
        let kind = match self {
            IngestError::Session(_) => "session",
            IngestError::DataFormat(_) => "data_format",
            IngestError::Request(_) => "request",
            IngestError::Cancelled => return None,
        };
        Some(IngestErrorInfo {
            kind: kind.to_string(),
            message: self.to_string(),
        })
    }
}

/// User-facing error descriptor stored in `SessionState::last_error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestErrorInfo {
    /// One of `session`, `data_format`, `request`.
    pub kind: String,
    pub message: String,
}

/// One successfully ingested batch, emitted to batch listeners.
#[derive(Debug, Clone)]
pub struct TicketBatch {
    pub tickets: Vec<Ticket>,
}

/// Shared state of one search session.
///
/// Created once per search invocation. `tickets` only grows, is never
/// reordered or deduplicated, and survives failures. The two loading
/// flags are independent: `is_loading` covers the whole loop lifetime,
/// `is_background_loading` turns on once the first batch has been
/// confirmed, letting consumers tell "no results yet" from "confirmed
/// empty".
#[derive(Debug)]
pub struct SessionState {
    pub tickets: Vec<Ticket>,
    pub phase: IngestPhase,
    pub is_loading: bool,
    pub is_background_loading: bool,
    pub last_error: Option<IngestErrorInfo>,
    pub filters: FilterSet,
    pub sort: SortMode,
    pub reveal_count: usize,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            tickets: Vec::new(),
            phase: IngestPhase::Idle,
            is_loading: false,
            is_background_loading: false,
            last_error: None,
            filters: FilterSet::default(),
            sort: SortMode::default(),
            reveal_count: INITIAL_REVEAL,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
