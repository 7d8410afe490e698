//! Test infrastructure and helpers
//!
//! `MemoryStore` is an in-process `ItemStore` with switches for simulating an
//! unreachable or failing database.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::db::{DatabaseError, DbResult, Item, ItemStore, NewItem};

/// In-memory item store
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<Vec<Item>>,
    ping_failures_remaining: AtomicU32,
    pings: AtomicU32,
    create_table_calls: AtomicU32,
    fail_queries: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose first `failures` pings are refused
    pub fn failing_pings(failures: u32) -> Self {
        let store = Self::new();
        store.ping_failures_remaining.store(failures, Ordering::SeqCst);
        store
    }

    /// A store that never becomes reachable
    pub fn unreachable() -> Self {
        Self::failing_pings(u32::MAX)
    }

    /// Make every query (but not `ping`) fail until switched off
    pub fn fail_queries(&self, fail: bool) {
        self.fail_queries.store(fail, Ordering::SeqCst);
    }

    /// Number of `ping` calls observed
    pub fn ping_count(&self) -> u32 {
        self.pings.load(Ordering::SeqCst)
    }

    /// Number of `create_table` calls observed
    pub fn create_table_count(&self) -> u32 {
        self.create_table_calls.load(Ordering::SeqCst)
    }

    /// Snapshot of the stored items in insertion order
    pub fn items(&self) -> Vec<Item> {
        self.items.lock().clone()
    }

    fn check_queries(&self) -> DbResult<()> {
        if self.fail_queries.load(Ordering::SeqCst) {
            return Err(DatabaseError::query_error("simulated query failure"));
        }
        Ok(())
    }

    fn insert(&self, item: NewItem) -> Item {
        let mut items = self.items.lock();
        let id = items.iter().map(|i| i.id).max().unwrap_or(0) + 1;
        let stored = Item {
            id,
            name: item.name,
            description: item.description,
            created_at: Utc::now(),
        };
        items.push(stored.clone());
        stored
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn ping(&self) -> DbResult<()> {
        self.pings.fetch_add(1, Ordering::SeqCst);
        let refused = self
            .ping_failures_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if refused {
            return Err(DatabaseError::ConnectionError(
                "IO error: Connection refused (os error 111)".to_string(),
            ));
        }
        Ok(())
    }

    async fn create_table(&self) -> DbResult<()> {
        self.create_table_calls.fetch_add(1, Ordering::SeqCst);
        self.check_queries()
    }

    async fn count(&self) -> DbResult<i64> {
        self.check_queries()?;
        Ok(self.items.lock().len() as i64)
    }

    async fn insert_many(&self, items: &[NewItem]) -> DbResult<u64> {
        self.check_queries()?;
        for item in items {
            self.insert(item.clone());
        }
        Ok(items.len() as u64)
    }

    async fn list(&self) -> DbResult<Vec<Item>> {
        self.check_queries()?;
        let mut items = self.items();
        items.sort_by_key(|i| i.id);
        Ok(items)
    }

    async fn create(&self, item: NewItem) -> DbResult<Item> {
        self.check_queries()?;
        Ok(self.insert(item))
    }
}
