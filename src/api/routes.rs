//! HTTP API route definitions.

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::handlers::{greeting, health, AppState};

/// Create the API router.
///
/// Building the router has no side effects; nothing is bound until the
/// caller hands it to a listener.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(greeting))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
