//! # Bundle Repository
//!
//! Database operations for bundles.
//!
//! ## Snapshot Storage
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Bundle Row Layout                                     │
//! │                                                                         │
//! │  bundles                                                                │
//! │  ├── items          TEXT  ← JSON array of Item snapshots, frozen        │
//! │  ├── item_set_key   TEXT  ← "id1,id2,..." sorted, UNIQUE                │
//! │  └── ...scalar columns                                                  │
//! │                                                                         │
//! │  The item set and name are frozen at creation. Updates only touch      │
//! │  discount, edition, expiry, description, and the derived prices.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use cafe_core::{Bundle, Item};

/// Raw bundle row; `items` holds the JSON-encoded item snapshots.
#[derive(Debug, sqlx::FromRow)]
struct BundleRow {
    id: String,
    bundle_name: String,
    items: String,
    price_before_cents: i64,
    discount: i64,
    price_after_cents: i64,
    limited_edition: bool,
    expires_on: Option<DateTime<Utc>>,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl BundleRow {
    fn into_domain(self) -> DbResult<Bundle> {
        let items: Vec<Item> = serde_json::from_str(&self.items)?;
        Ok(Bundle {
            id: self.id,
            bundle_name: self.bundle_name,
            items,
            price_before_cents: self.price_before_cents,
            discount: self.discount,
            price_after_cents: self.price_after_cents,
            limited_edition: self.limited_edition,
            expires_on: self.expires_on,
            description: self.description,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const BUNDLE_COLUMNS: &str = "id, bundle_name, items, price_before_cents, discount, \
     price_after_cents, limited_edition, expires_on, description, \
     created_at, updated_at";

/// Repository for bundle database operations.
#[derive(Debug, Clone)]
pub struct BundleRepository {
    pool: SqlitePool,
}

impl BundleRepository {
    /// Creates a new BundleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BundleRepository { pool }
    }

    /// Inserts a new bundle.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - name or exact item set taken
    pub async fn insert(&self, bundle: &Bundle) -> DbResult<()> {
        debug!(id = %bundle.id, name = %bundle.bundle_name, "Inserting bundle");

        let items_json = serde_json::to_string(&bundle.items)?;
        let item_ids: Vec<String> = bundle.items.iter().map(|i| i.id.clone()).collect();
        let set_key = Bundle::item_set_key(&item_ids);

        sqlx::query(
            r#"
            INSERT INTO bundles (
                id, bundle_name, items, item_set_key,
                price_before_cents, discount, price_after_cents,
                limited_edition, expires_on, description,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
        )
        .bind(&bundle.id)
        .bind(&bundle.bundle_name)
        .bind(items_json)
        .bind(set_key)
        .bind(bundle.price_before_cents)
        .bind(bundle.discount)
        .bind(bundle.price_after_cents)
        .bind(bundle.limited_edition)
        .bind(bundle.expires_on)
        .bind(&bundle.description)
        .bind(bundle.created_at)
        .bind(bundle.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a bundle by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Bundle>> {
        let row = sqlx::query_as::<_, BundleRow>(&format!(
            "SELECT {BUNDLE_COLUMNS} FROM bundles WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(BundleRow::into_domain).transpose()
    }

    /// Gets a bundle by its display name.
    pub async fn get_by_name(&self, name: &str) -> DbResult<Option<Bundle>> {
        let row = sqlx::query_as::<_, BundleRow>(&format!(
            "SELECT {BUNDLE_COLUMNS} FROM bundles WHERE bundle_name = ?1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        row.map(BundleRow::into_domain).transpose()
    }

    /// Gets a bundle by its canonical item-set key.
    ///
    /// Two bundles must never contain the exact same set of items, so
    /// the precheck for creation goes through here.
    pub async fn get_by_item_set(&self, set_key: &str) -> DbResult<Option<Bundle>> {
        let row = sqlx::query_as::<_, BundleRow>(&format!(
            "SELECT {BUNDLE_COLUMNS} FROM bundles WHERE item_set_key = ?1"
        ))
        .bind(set_key)
        .fetch_optional(&self.pool)
        .await?;

        row.map(BundleRow::into_domain).transpose()
    }

    /// Lists all bundles, newest first.
    pub async fn list(&self) -> DbResult<Vec<Bundle>> {
        let rows = sqlx::query_as::<_, BundleRow>(&format!(
            "SELECT {BUNDLE_COLUMNS} FROM bundles ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(BundleRow::into_domain).collect()
    }

    /// Updates a bundle's mutable fields, guarded so that an identical
    /// payload changes nothing.
    ///
    /// The name and item set are immutable; only discount, edition,
    /// expiry, description, and the derived price move.
    ///
    /// ## Returns
    /// * `Ok(true)` - a field actually changed
    /// * `Ok(false)` - row missing or payload identical
    pub async fn update(&self, bundle: &Bundle) -> DbResult<bool> {
        debug!(id = %bundle.id, "Updating bundle");

        let now = Utc::now();

        // IS NOT instead of != so a NULL expiry compares usefully.
        let result = sqlx::query(
            r#"
            UPDATE bundles SET
                discount = ?2,
                price_after_cents = ?3,
                limited_edition = ?4,
                expires_on = ?5,
                description = ?6,
                updated_at = ?7
            WHERE id = ?1
              AND (discount != ?2 OR price_after_cents != ?3
                   OR limited_edition != ?4 OR expires_on IS NOT ?5
                   OR description != ?6)
            "#,
        )
        .bind(&bundle.id)
        .bind(bundle.discount)
        .bind(bundle.price_after_cents)
        .bind(bundle.limited_edition)
        .bind(bundle.expires_on)
        .bind(&bundle.description)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a bundle.
    ///
    /// ## Returns
    /// * `Ok(true)` - bundle existed and was deleted
    /// * `Ok(false)` - no such bundle
    pub async fn delete(&self, id: &str) -> DbResult<bool> {
        debug!(id = %id, "Deleting bundle");

        let result = sqlx::query("DELETE FROM bundles WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
