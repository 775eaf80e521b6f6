//! HTTP front end: one page plus the JSON endpoints its controls call.
//!
//! Every request is one recomputation cycle over the shared, read-only
//! dataset. Nothing is cached between requests.

pub mod handlers;
pub mod router;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;

use crate::color::OutcomeColors;
use crate::data::model::LaunchDataset;

/// Shared state injected into every handler.
#[derive(Debug, Clone)]
pub struct WebState {
    pub dataset: Arc<LaunchDataset>,
    pub colors: OutcomeColors,
}

impl WebState {
    pub fn new(dataset: Arc<LaunchDataset>) -> Self {
        Self {
            dataset,
            colors: OutcomeColors::default(),
        }
    }
}

pub type SharedState = Arc<WebState>;

/// Bind `addr` and serve the dashboard until Ctrl-C.
pub async fn serve(dataset: Arc<LaunchDataset>, addr: SocketAddr) -> anyhow::Result<()> {
    let app = router::build_router(WebState::new(dataset));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    log::info!("Dashboard listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server")?;

    log::info!("Dashboard stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}
