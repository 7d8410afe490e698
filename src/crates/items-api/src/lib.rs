//! Items API
//!
//! A JSON CRUD service over a single relational `items` table. Startup waits
//! for the database with bounded fixed-delay probes, creates and seeds the
//! schema, and only then starts serving.

pub mod api;
pub mod config;
pub mod db;
pub mod startup;
pub mod testing;

pub use api::create_router;
pub use config::ApiConfig;
pub use startup::{bootstrap, wait_for_ready, ReadinessPolicy, StartupError, StartupReport};

/// Get version information
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
