//! Axum router: maps URL paths to handlers.

use axum::{routing::get, Router};
use tower_http::{
    cors::CorsLayer,
    trace::TraceLayer,
    compression::CompressionLayer,
};
use std::sync::Arc;
use crate::state::{AppState, SharedState};
use crate::handlers::{
    neo::{feed, lookup, summary},
    system::{health, me, not_found},
};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        // NEO data
        .route("/feed",         get(feed))
        .route("/summary",      get(summary))
        .route("/lookup/{id}",  get(lookup))

        // System
        .route("/health",       get(health))
        .route("/me",           get(me))
        .fallback(not_found)

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
