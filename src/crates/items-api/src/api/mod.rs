//! REST API layer
//!
//! - `GET /health` liveness
//! - `GET /items` list, ascending by id
//! - `POST /items` create

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;

pub use error::{ApiError, ApiErrorResponse, ApiResult};
pub use routes::{create_router, AppState};
