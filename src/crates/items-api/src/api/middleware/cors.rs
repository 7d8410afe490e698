//! CORS middleware configuration

use tower_http::cors::CorsLayer;

/// Allow any origin, method, and header
pub fn cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}
