//! API route definitions

use axum::{
    routing::get,
    Router,
};
use std::sync::Arc;

use crate::api::{handlers, middleware};
use crate::db::ItemStore;

/// Shared application state
///
/// The store is the only state shared between requests.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ItemStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }
}

/// Build the complete API router
///
/// Routes are mounted at the root; a fronting proxy strips its own prefix.
pub fn create_router(store: Arc<dyn ItemStore>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/items",
            get(handlers::list_items).post(handlers::create_item),
        )
        .layer(middleware::logging_layer())
        .layer(middleware::cors_layer())
        .with_state(AppState::new(store))
}
