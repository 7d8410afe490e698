//! API request handlers

pub mod health;
pub mod items;

pub use health::health;
pub use items::{create_item, list_items};
