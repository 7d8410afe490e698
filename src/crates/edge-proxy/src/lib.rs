//! Edge proxy
//!
//! Serves the browser client from a static directory and forwards everything
//! under `/api` to the items API with the prefix stripped.

pub mod config;
pub mod proxy;
pub mod routes;

pub use config::ProxyConfig;
pub use proxy::{ProxyError, ProxyState, API_PREFIX};
pub use routes::create_router;
