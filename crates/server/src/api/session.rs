//! Search session API handlers.
//!
//! The state surface rendering code reads: the session snapshot, the
//! visible ticket prefix, and the filter/sort/reveal/clear-error actions.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use farefeed_core::{FilterId, SearchSession, SessionSnapshot, SortMode, Ticket};

use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

/// Request body for toggling a filter option.
#[derive(Debug, Deserialize)]
pub struct SetFilterBody {
    pub id: FilterId,
    pub is_checked: bool,
}

/// Request body for switching the sort mode.
#[derive(Debug, Deserialize)]
pub struct SetSortBody {
    pub sort: SortMode,
}

/// The visible ticket prefix plus enough context to page further.
#[derive(Debug, Serialize)]
pub struct TicketsResponse {
    pub tickets: Vec<Ticket>,
    /// Tickets matching the active filters, ignoring the reveal limit.
    pub matching_tickets: usize,
    pub reveal_count: usize,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type NoSession = (StatusCode, Json<ErrorResponse>);

fn no_session() -> NoSession {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "No search session; POST /api/v1/search first".to_string(),
        }),
    )
}

async fn current_session(state: &AppState) -> Result<Arc<SearchSession>, NoSession> {
    state.session().await.ok_or_else(no_session)
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/search
///
/// Start a new search session, cancelling any previous one. Ingestion
/// runs in the background; poll the session endpoints for progress.
pub async fn start_search(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<SessionSnapshot>) {
    let session = state.start_search().await;
    (StatusCode::ACCEPTED, Json(session.snapshot().await))
}

/// GET /api/v1/session
pub async fn get_session(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SessionSnapshot>, NoSession> {
    let session = current_session(&state).await?;
    Ok(Json(session.snapshot().await))
}

/// DELETE /api/v1/session
///
/// Cancel the running ingestion. Already-ingested tickets stay readable.
pub async fn cancel_session(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SessionSnapshot>, NoSession> {
    let session = current_session(&state).await?;
    session.cancel();
    Ok(Json(session.snapshot().await))
}

/// GET /api/v1/session/tickets
pub async fn get_tickets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TicketsResponse>, NoSession> {
    let session = current_session(&state).await?;
    let tickets = session.visible_tickets().await;
    let snapshot = session.snapshot().await;
    Ok(Json(TicketsResponse {
        tickets,
        matching_tickets: snapshot.matching_tickets,
        reveal_count: snapshot.reveal_count,
    }))
}

/// POST /api/v1/session/filters
pub async fn set_filter(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SetFilterBody>,
) -> Result<Json<SessionSnapshot>, NoSession> {
    let session = current_session(&state).await?;
    session.set_filter(body.id, body.is_checked).await;
    Ok(Json(session.snapshot().await))
}

/// POST /api/v1/session/sort
pub async fn set_sort(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SetSortBody>,
) -> Result<Json<SessionSnapshot>, NoSession> {
    let session = current_session(&state).await?;
    session.set_sort(body.sort).await;
    Ok(Json(session.snapshot().await))
}

/// POST /api/v1/session/reveal
pub async fn reveal_more(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SessionSnapshot>, NoSession> {
    let session = current_session(&state).await?;
    session.reveal_more().await;
    Ok(Json(session.snapshot().await))
}

/// POST /api/v1/session/error/clear
pub async fn clear_error(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SessionSnapshot>, NoSession> {
    let session = current_session(&state).await?;
    session.clear_error().await;
    Ok(Json(session.snapshot().await))
}
