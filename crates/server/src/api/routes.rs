use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{handlers, middleware, session};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Search lifecycle
        .route("/search", post(session::start_search))
        .route("/session", get(session::get_session))
        .route("/session", delete(session::cancel_session))
        // Visible ticket view and its controls
        .route("/session/tickets", get(session::get_tickets))
        .route("/session/filters", post(session::set_filter))
        .route("/session/sort", post(session::set_sort))
        .route("/session/reveal", post(session::reveal_more))
        .route("/session/error/clear", post(session::clear_error))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/metrics", get(handlers::get_metrics))
        .layer(axum::middleware::from_fn(middleware::metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
