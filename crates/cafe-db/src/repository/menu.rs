//! # Menu Repository
//!
//! Database operations for published menu entries.
//!
//! ## Stock Mutation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Conditional Stock Decrement                             │
//! │                                                                         │
//! │  ❌ WRONG: read stock, check, write back (race window)                 │
//! │     SELECT stock_count ... ; if > 0 { UPDATE ... }                     │
//! │                                                                         │
//! │  ✅ CORRECT: one conditional statement                                  │
//! │     UPDATE menu_entries                                                 │
//! │     SET stock_count = stock_count - 1,                                  │
//! │         availability = (stock_count - 1 > 0)                            │
//! │     WHERE id = ? AND stock_count > 0                                    │
//! │                                                                         │
//! │  Two orders racing for the last unit: SQLite serializes writers,       │
//! │  so exactly one UPDATE matches the guard. The loser sees               │
//! │  rows_affected == 0. The CHECK (stock_count >= 0) constraint is        │
//! │  the backstop if the guard is ever bypassed.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lazy Expiry Purge
//! Expired limited-edition entries are deleted inside the same
//! transaction that reads the menu, so no reader ever observes an
//! expired entry and no background job is needed.

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use cafe_core::{MenuEntry, MenuEntryKind, MenuProduct};

/// Raw menu row; `snapshot` holds the JSON-encoded product.
#[derive(Debug, sqlx::FromRow)]
struct MenuEntryRow {
    id: String,
    snapshot: String,
    availability: bool,
    stock_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl MenuEntryRow {
    fn into_domain(self) -> DbResult<MenuEntry> {
        let product: MenuProduct = serde_json::from_str(&self.snapshot)?;
        Ok(MenuEntry {
            id: self.id,
            product,
            availability: self.availability,
            stock_count: self.stock_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const MENU_COLUMNS: &str =
    "id, snapshot, availability, stock_count, created_at, updated_at";

/// Repository for menu database operations.
#[derive(Debug, Clone)]
pub struct MenuRepository {
    pool: SqlitePool,
}

impl MenuRepository {
    /// Creates a new MenuRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MenuRepository { pool }
    }

    /// Publishes a menu entry.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - product already on the menu
    pub async fn insert(&self, entry: &MenuEntry) -> DbResult<()> {
        debug!(id = %entry.id, product_id = %entry.product_id(), "Publishing menu entry");

        let snapshot = serde_json::to_string(&entry.product)?;

        sqlx::query(
            r#"
            INSERT INTO menu_entries (
                id, entry_type, product_id, snapshot,
                availability, stock_count, expires_on,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&entry.id)
        .bind(entry.kind())
        .bind(entry.product_id())
        .bind(snapshot)
        .bind(entry.availability)
        .bind(entry.stock_count)
        .bind(entry.product.expires_on())
        .bind(entry.created_at)
        .bind(entry.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a menu entry by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<MenuEntry>> {
        let row = sqlx::query_as::<_, MenuEntryRow>(&format!(
            "SELECT {MENU_COLUMNS} FROM menu_entries WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(MenuEntryRow::into_domain).transpose()
    }

    /// Gets a menu entry by the underlying product.
    pub async fn get_by_product(
        &self,
        kind: MenuEntryKind,
        product_id: &str,
    ) -> DbResult<Option<MenuEntry>> {
        let row = sqlx::query_as::<_, MenuEntryRow>(&format!(
            "SELECT {MENU_COLUMNS} FROM menu_entries \
             WHERE entry_type = ?1 AND product_id = ?2"
        ))
        .bind(kind)
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(MenuEntryRow::into_domain).transpose()
    }

    /// Resolves a batch of menu-entry ids.
    ///
    /// Missing ids are silently absent from the result.
    pub async fn find_many(&self, ids: &[String]) -> DbResult<Vec<MenuEntry>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {MENU_COLUMNS} FROM menu_entries WHERE id IN ("
        ));
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id);
        }
        separated.push_unseparated(")");

        let rows = builder
            .build_query_as::<MenuEntryRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(MenuEntryRow::into_domain).collect()
    }

    /// Reads the current menu, purging expired entries first.
    ///
    /// The purge and the read share one transaction, so no caller ever
    /// sees an entry whose embedded bundle has expired.
    pub async fn list_current(&self) -> DbResult<Vec<MenuEntry>> {
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;

        let purged = sqlx::query(
            "DELETE FROM menu_entries WHERE expires_on IS NOT NULL AND expires_on < ?1",
        )
        .bind(now)
        .execute(&mut *tx)
        .await?;

        if purged.rows_affected() > 0 {
            debug!(count = purged.rows_affected(), "Purged expired menu entries");
        }

        let rows = sqlx::query_as::<_, MenuEntryRow>(&format!(
            "SELECT {MENU_COLUMNS} FROM menu_entries ORDER BY created_at DESC"
        ))
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        rows.into_iter().map(MenuEntryRow::into_domain).collect()
    }

    /// Sets the stock count of an entry, deriving availability.
    ///
    /// ## Returns
    /// * `Ok(true)` - entry existed and was updated
    /// * `Ok(false)` - no such entry
    pub async fn set_stock(&self, id: &str, stock_count: i64) -> DbResult<bool> {
        debug!(id = %id, stock_count = %stock_count, "Setting stock");

        let result = sqlx::query(
            r#"
            UPDATE menu_entries
            SET stock_count = ?2, availability = ?3, updated_at = ?4
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(stock_count)
        .bind(stock_count > 0)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Decrements stock by one, refusing to go below zero.
    ///
    /// Stock and availability move in the same statement so the
    /// invariant `availability == (stock_count > 0)` never has a
    /// window where it is violated.
    ///
    /// ## Returns
    /// * `Ok(true)` - decremented
    /// * `Ok(false)` - entry missing or already out of stock
    pub async fn decrement_stock(&self, id: &str) -> DbResult<bool> {
        debug!(id = %id, "Decrementing stock");

        let result = sqlx::query(
            r#"
            UPDATE menu_entries
            SET stock_count = stock_count - 1,
                availability = (stock_count - 1 > 0),
                updated_at = ?2
            WHERE id = ?1 AND stock_count > 0
            "#,
        )
        .bind(id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Returns one unit to stock after a cancellation.
    ///
    /// Availability is forced to true unconditionally here. That is
    /// the documented exception to the availability invariant: a
    /// restored unit always makes the entry orderable again.
    ///
    /// ## Returns
    /// * `Ok(true)` - restocked
    /// * `Ok(false)` - entry no longer on the menu
    pub async fn restock(&self, id: &str) -> DbResult<bool> {
        debug!(id = %id, "Restocking after cancellation");

        let result = sqlx::query(
            r#"
            UPDATE menu_entries
            SET stock_count = stock_count + 1,
                availability = 1,
                updated_at = ?2
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Withdraws the menu entry for a product.
    ///
    /// ## Returns
    /// * `Ok(true)` - entry existed and was removed
    /// * `Ok(false)` - product was not on the menu
    pub async fn remove(&self, kind: MenuEntryKind, product_id: &str) -> DbResult<bool> {
        debug!(kind = %kind, product_id = %product_id, "Withdrawing menu entry");

        let result =
            sqlx::query("DELETE FROM menu_entries WHERE entry_type = ?1 AND product_id = ?2")
                .bind(kind)
                .bind(product_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}
