//! Router assembly: `/api` forwarding in front of the static file tree

use axum::{extract::DefaultBodyLimit, routing::any, Router};
use std::path::Path;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::proxy::{self, ProxyState};

fn logging_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO))
}

/// Build the edge router
///
/// Paths that match neither `/api` nor a file under `public_dir` receive
/// `index.html` so client-side routes resolve.
pub fn create_router(state: ProxyState, public_dir: &Path, max_body_bytes: usize) -> Router {
    let static_files =
        ServeDir::new(public_dir).fallback(ServeFile::new(public_dir.join("index.html")));

    Router::new()
        .route("/api", any(proxy::forward))
        .route("/api/", any(proxy::forward))
        .route("/api/*path", any(proxy::forward))
        .fallback_service(static_files)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(logging_layer())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
