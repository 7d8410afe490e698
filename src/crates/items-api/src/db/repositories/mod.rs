//! Repository pattern implementations for database access

pub mod item_repo;

pub use item_repo::ItemRepository;
