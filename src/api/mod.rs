//! HTTP layer exposing the shared term matcher.

pub mod routes;
pub mod types;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{config::Settings, nlp::matcher::TermMatcher};

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub matcher: Arc<TermMatcher>,
}

/// Routes without a bound listener, for embedding and tests.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/contexts", post(routes::build_contexts))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(
    settings: Settings,
    matcher: Arc<TermMatcher>,
    host: String,
    port: u16,
) -> Result<()> {
    let state = AppState { settings, matcher };
    let router = router(state);

    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    info!(%addr, "serving ade-context API");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router.into_make_service()).await?;
    Ok(())
}
