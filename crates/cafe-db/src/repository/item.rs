//! # Item Repository
//!
//! Database operations for catalog items.
//!
//! ## Key Operations
//! - CRUD with name-uniqueness awareness
//! - Batch resolution of item ids for bundle assembly
//!
//! ## No-Op Detection
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Update With Difference Guard                          │
//! │                                                                         │
//! │  UPDATE items SET ... WHERE id = ?                                     │
//! │    AND (item_type != ? OR item_name != ? OR ...)                       │
//! │                                                                         │
//! │  rows_affected == 1  → something actually changed                      │
//! │  rows_affected == 0  → row missing OR payload identical                │
//! │                                                                         │
//! │  The service layer fetches the row first, so a zero here after a       │
//! │  successful fetch means "identical payload", which is rejected.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use cafe_core::Item;

/// Repository for item database operations.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Inserts a new item.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - name already exists
    pub async fn insert(&self, item: &Item) -> DbResult<()> {
        debug!(id = %item.id, name = %item.item_name, "Inserting item");

        sqlx::query(
            r#"
            INSERT INTO items (
                id, item_type, item_name, price_cents, description,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&item.id)
        .bind(item.item_type)
        .bind(&item.item_name)
        .bind(item.price_cents)
        .bind(&item.description)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets an item by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, item_type, item_name, price_cents, description,
                   created_at, updated_at
            FROM items
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Gets an item by its display name.
    ///
    /// Used for the duplicate-name precheck, which runs before the
    /// existence check so that a conflicting rename is reported as a
    /// conflict even when the target id is wrong.
    pub async fn get_by_name(&self, name: &str) -> DbResult<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, item_type, item_name, price_cents, description,
                   created_at, updated_at
            FROM items
            WHERE item_name = ?1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Resolves a batch of item ids to items.
    ///
    /// Missing ids are silently absent from the result; the caller
    /// compares lengths to detect them.
    pub async fn find_many(&self, ids: &[String]) -> DbResult<Vec<Item>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT id, item_type, item_name, price_cents, description, \
             created_at, updated_at FROM items WHERE id IN (",
        );
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id);
        }
        separated.push_unseparated(")");

        let items = builder
            .build_query_as::<Item>()
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    /// Lists all items, newest first.
    pub async fn list(&self) -> DbResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, item_type, item_name, price_cents, description,
                   created_at, updated_at
            FROM items
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Updates an item, guarded so that an identical payload changes
    /// nothing.
    ///
    /// ## Returns
    /// * `Ok(true)` - a field actually changed
    /// * `Ok(false)` - row missing or payload identical
    pub async fn update(&self, item: &Item) -> DbResult<bool> {
        debug!(id = %item.id, "Updating item");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE items SET
                item_type = ?2,
                item_name = ?3,
                price_cents = ?4,
                description = ?5,
                updated_at = ?6
            WHERE id = ?1
              AND (item_type != ?2 OR item_name != ?3
                   OR price_cents != ?4 OR description != ?5)
            "#,
        )
        .bind(&item.id)
        .bind(item.item_type)
        .bind(&item.item_name)
        .bind(item.price_cents)
        .bind(&item.description)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes an item.
    ///
    /// ## Returns
    /// * `Ok(true)` - item existed and was deleted
    /// * `Ok(false)` - no such item
    pub async fn delete(&self, id: &str) -> DbResult<bool> {
        debug!(id = %id, "Deleting item");

        let result = sqlx::query("DELETE FROM items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
