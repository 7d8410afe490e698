//! Database models
//!
//! Row types for the `items` table. `created_at` is decoded as UTC; both
//! backends fill it from the column default.

pub mod item;

pub use item::{Item, NewItem};
