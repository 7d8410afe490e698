//! Item model for database persistence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A persisted item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Item {
    /// Store-assigned identifier
    pub id: i64,

    /// Item name
    pub name: String,

    /// Free-form description
    pub description: Option<String>,

    /// Insert time, filled by the column default
    pub created_at: DateTime<Utc>,
}

/// Values accepted when inserting an item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub description: Option<String>,
}

impl NewItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
