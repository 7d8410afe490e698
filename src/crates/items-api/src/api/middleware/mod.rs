//! API middleware layer
//!
//! CORS, request tracing, and request validation helpers.

pub mod cors;
pub mod logging;
pub mod validation;

pub use cors::cors_layer;
pub use logging::logging_layer;
pub use validation::validate_required;
