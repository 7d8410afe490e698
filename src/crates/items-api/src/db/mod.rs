//! Database module
//!
//! Provides connectivity, the item model and repository, schema setup, and
//! the `ItemStore` seam the HTTP layer and startup sequencer talk to.

pub mod connection;
pub mod error;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod store;

pub use connection::{Backend, DatabaseConnection, DatabasePool};
pub use error::{DatabaseError, DbResult};
pub use models::{Item, NewItem};
pub use schema::{ensure_schema, sample_items};
pub use store::ItemStore;
