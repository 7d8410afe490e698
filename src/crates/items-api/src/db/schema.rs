//! Schema initialization and first-boot seeding

use tracing::info;

use crate::db::error::DbResult;
use crate::db::models::NewItem;
use crate::db::store::ItemStore;

/// The rows inserted into an empty `items` table
pub fn sample_items() -> Vec<NewItem> {
    vec![
        NewItem::new("Item 1").with_description("This is the first item"),
        NewItem::new("Item 2").with_description("This is the second item"),
        NewItem::new("Item 3").with_description("This is the third item"),
    ]
}

/// Ensure the `items` table exists and seed it when empty
///
/// Returns `true` when the sample rows were inserted. Seeding keys off the
/// row count alone, so a table emptied later is seeded again on next start.
/// Errors are returned as-is; connectivity retries happen before this runs.
pub async fn ensure_schema<S>(store: &S) -> DbResult<bool>
where
    S: ItemStore + ?Sized,
{
    info!("Creating tables...");
    store.create_table().await?;

    let seeded = if store.count().await? == 0 {
        let inserted = store.insert_many(&sample_items()).await?;
        info!(rows = inserted, "Sample data inserted");
        true
    } else {
        false
    };

    info!("Database initialized successfully");
    Ok(seeded)
}
