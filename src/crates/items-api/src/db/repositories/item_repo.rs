//! Item repository for database operations

use sqlx::{MySql, QueryBuilder, Sqlite};

use crate::db::connection::DatabasePool;
use crate::db::error::{DatabaseError, DbResult};
use crate::db::models::{Item, NewItem};

const CREATE_TABLE_MYSQL: &str = "CREATE TABLE IF NOT EXISTS items (
    id BIGINT AUTO_INCREMENT PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    description TEXT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

// Default is RFC 3339 text so it decodes straight into DateTime<Utc>.
const CREATE_TABLE_SQLITE: &str = "CREATE TABLE IF NOT EXISTS items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name VARCHAR(100) NOT NULL,
    description TEXT,
    created_at TIMESTAMP NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
)";

const SELECT_COLUMNS: &str = "SELECT id, name, description, created_at FROM items";

/// Item repository for managing item database operations
pub struct ItemRepository;

impl ItemRepository {
    /// Create the `items` table if it does not exist yet
    pub async fn create_table(pool: &DatabasePool) -> DbResult<()> {
        match pool {
            DatabasePool::MySql(pool) => {
                sqlx::query(CREATE_TABLE_MYSQL).execute(pool).await?;
            }
            DatabasePool::Sqlite(pool) => {
                sqlx::query(CREATE_TABLE_SQLITE).execute(pool).await?;
            }
        }
        Ok(())
    }

    /// Count all items
    pub async fn count(pool: &DatabasePool) -> DbResult<i64> {
        let sql = "SELECT COUNT(*) FROM items";
        let result: (i64,) = match pool {
            DatabasePool::MySql(pool) => sqlx::query_as(sql).fetch_one(pool).await?,
            DatabasePool::Sqlite(pool) => sqlx::query_as(sql).fetch_one(pool).await?,
        };
        Ok(result.0)
    }

    /// Insert several items in a single statement
    ///
    /// Returns the number of inserted rows.
    pub async fn insert_many(pool: &DatabasePool, items: &[NewItem]) -> DbResult<u64> {
        if items.is_empty() {
            return Ok(0);
        }

        let head = "INSERT INTO items (name, description) ";
        let affected = match pool {
            DatabasePool::MySql(pool) => {
                let mut builder = QueryBuilder::<MySql>::new(head);
                builder.push_values(items, |mut row, item| {
                    row.push_bind(item.name.as_str())
                        .push_bind(item.description.as_deref());
                });
                builder.build().execute(pool).await?.rows_affected()
            }
            DatabasePool::Sqlite(pool) => {
                let mut builder = QueryBuilder::<Sqlite>::new(head);
                builder.push_values(items, |mut row, item| {
                    row.push_bind(item.name.as_str())
                        .push_bind(item.description.as_deref());
                });
                builder.build().execute(pool).await?.rows_affected()
            }
        };
        Ok(affected)
    }

    /// List all items, ascending by id
    pub async fn list(pool: &DatabasePool) -> DbResult<Vec<Item>> {
        let sql = format!("{} ORDER BY id ASC", SELECT_COLUMNS);
        let items = match pool {
            DatabasePool::MySql(pool) => sqlx::query_as::<_, Item>(&sql).fetch_all(pool).await?,
            DatabasePool::Sqlite(pool) => sqlx::query_as::<_, Item>(&sql).fetch_all(pool).await?,
        };
        Ok(items)
    }

    /// Get an item by ID
    pub async fn get_by_id(pool: &DatabasePool, id: i64) -> DbResult<Option<Item>> {
        let sql = format!("{} WHERE id = ?", SELECT_COLUMNS);
        let item = match pool {
            DatabasePool::MySql(pool) => {
                sqlx::query_as::<_, Item>(&sql)
                    .bind(id)
                    .fetch_optional(pool)
                    .await?
            }
            DatabasePool::Sqlite(pool) => {
                sqlx::query_as::<_, Item>(&sql)
                    .bind(id)
                    .fetch_optional(pool)
                    .await?
            }
        };
        Ok(item)
    }

    /// Insert one item and return the stored row
    pub async fn create(pool: &DatabasePool, item: &NewItem) -> DbResult<Item> {
        match pool {
            DatabasePool::MySql(mysql) => {
                let result = sqlx::query("INSERT INTO items (name, description) VALUES (?, ?)")
                    .bind(&item.name)
                    .bind(&item.description)
                    .execute(mysql)
                    .await?;

                let id = result.last_insert_id() as i64;
                Self::get_by_id(pool, id)
                    .await?
                    .ok_or_else(|| DatabaseError::not_found(format!("item id={}", id)))
            }
            DatabasePool::Sqlite(sqlite) => {
                let item = sqlx::query_as::<_, Item>(
                    "INSERT INTO items (name, description) VALUES (?, ?)
                     RETURNING id, name, description, created_at",
                )
                .bind(&item.name)
                .bind(&item.description)
                .fetch_one(sqlite)
                .await?;
                Ok(item)
            }
        }
    }
}
