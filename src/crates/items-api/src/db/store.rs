//! Storage seam between the HTTP layer and the database
//!
//! Handlers and the startup sequencer only see `ItemStore`, so tests can swap
//! the pooled connection for an in-process double.

use async_trait::async_trait;

use crate::db::connection::DatabaseConnection;
use crate::db::error::DbResult;
use crate::db::models::{Item, NewItem};
use crate::db::repositories::ItemRepository;

/// Operations the service needs from the data store
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Verify the store is reachable with a single connection attempt
    async fn ping(&self) -> DbResult<()>;

    /// Create the `items` table if it is missing
    async fn create_table(&self) -> DbResult<()>;

    /// Number of stored items
    async fn count(&self) -> DbResult<i64>;

    /// Insert several items in one statement, returning the inserted count
    async fn insert_many(&self, items: &[NewItem]) -> DbResult<u64>;

    /// All items, ascending by id
    async fn list(&self) -> DbResult<Vec<Item>>;

    /// Insert one item and return it as stored
    async fn create(&self, item: NewItem) -> DbResult<Item>;
}

#[async_trait]
impl ItemStore for DatabaseConnection {
    async fn ping(&self) -> DbResult<()> {
        DatabaseConnection::ping(self).await
    }

    async fn create_table(&self) -> DbResult<()> {
        ItemRepository::create_table(self.pool()).await
    }

    async fn count(&self) -> DbResult<i64> {
        ItemRepository::count(self.pool()).await
    }

    async fn insert_many(&self, items: &[NewItem]) -> DbResult<u64> {
        ItemRepository::insert_many(self.pool(), items).await
    }

    async fn list(&self) -> DbResult<Vec<Item>> {
        ItemRepository::list(self.pool()).await
    }

    async fn create(&self, item: NewItem) -> DbResult<Item> {
        ItemRepository::create(self.pool(), &item).await
    }
}
