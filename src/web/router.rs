//! Axum router — maps URL paths to handlers.

use std::sync::Arc;

use axum::{routing::get, Router};

use super::handlers::{api_options, api_pie, api_scatter, api_view, dashboard, health};
use super::{SharedState, WebState};

/// Build and return the full router.
pub fn build_router(state: WebState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        // Page
        .route("/", get(dashboard))
        .route("/health", get(health))
        // API endpoints
        .route("/api/options", get(api_options))
        .route("/api/pie", get(api_pie))
        .route("/api/scatter", get(api_scatter))
        .route("/api/view", get(api_view))
        .with_state(shared)
}
