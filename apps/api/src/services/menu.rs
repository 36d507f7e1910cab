//! Menu service: publishing, stock, and withdrawal.
//!
//! The menu is the only thing customers order against. Each entry
//! freezes a snapshot of its product at publish time; catalog edits
//! after that point do not reprice what is already published.

use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use cafe_core::{validation, CoreError, MenuEntry, MenuEntryKind, MenuProduct};
use cafe_db::Database;

use crate::error::ApiError;
use crate::services::catalog;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishItem {
    pub item_id: String,
    pub availability: bool,
    pub stock_count: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishBundle {
    pub bundle_id: String,
    pub availability: bool,
    pub stock_count: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockPatch {
    pub stock_count: i64,
}

/// Publishes an item to the menu.
///
/// `availability` is accepted as given here; the derived
/// `availability == (stock_count > 0)` rule binds stock mutations,
/// not the initial publish.
pub async fn publish_item(db: &Database, payload: PublishItem) -> Result<MenuEntry, ApiError> {
    validation::validate_stock_count(payload.stock_count)?;

    let item = catalog::get_item(db, &payload.item_id).await?;

    if db
        .menu()
        .get_by_product(MenuEntryKind::Item, &item.id)
        .await?
        .is_some()
    {
        return Err(ApiError::bad_request("This item is already on the menu"));
    }

    let entry = build_entry(MenuProduct::Item(item), payload.availability, payload.stock_count);
    db.menu().insert(&entry).await?;

    info!(entry_id = %entry.id, product_id = %entry.product_id(), "Item published to menu");
    Ok(entry)
}

/// Publishes a bundle to the menu.
pub async fn publish_bundle(db: &Database, payload: PublishBundle) -> Result<MenuEntry, ApiError> {
    validation::validate_stock_count(payload.stock_count)?;

    let bundle = catalog::get_bundle(db, &payload.bundle_id).await?;

    if db
        .menu()
        .get_by_product(MenuEntryKind::Bundle, &bundle.id)
        .await?
        .is_some()
    {
        return Err(ApiError::bad_request("This bundle is already on the menu"));
    }

    let entry = build_entry(
        MenuProduct::Bundle(bundle),
        payload.availability,
        payload.stock_count,
    );
    db.menu().insert(&entry).await?;

    info!(entry_id = %entry.id, product_id = %entry.product_id(), "Bundle published to menu");
    Ok(entry)
}

fn build_entry(product: MenuProduct, availability: bool, stock_count: i64) -> MenuEntry {
    let now = Utc::now();
    MenuEntry {
        id: Uuid::new_v4().to_string(),
        product,
        availability,
        stock_count,
        created_at: now,
        updated_at: now,
    }
}

/// Reads the current menu, expired entries purged.
pub async fn list_menu(db: &Database) -> Result<Vec<MenuEntry>, ApiError> {
    Ok(db.menu().list_current().await?)
}

/// Sets the stock for a product's menu entry.
///
/// Availability is recomputed in the same write. Setting the count it
/// already has is a rejected no-op.
pub async fn set_stock(
    db: &Database,
    kind: MenuEntryKind,
    product_id: &str,
    patch: StockPatch,
) -> Result<(), ApiError> {
    validation::validate_stock_count(patch.stock_count)?;

    let entry = db
        .menu()
        .get_by_product(kind, product_id)
        .await?
        .ok_or_else(|| CoreError::MenuEntryNotFound(product_id.to_string()))?;

    if entry.stock_count == patch.stock_count {
        return Err(CoreError::NoOpUpdate {
            entity: "Menu entry",
        }
        .into());
    }

    let updated = db.menu().set_stock(&entry.id, patch.stock_count).await?;
    if !updated {
        return Err(CoreError::MenuEntryNotFound(product_id.to_string()).into());
    }

    info!(entry_id = %entry.id, stock_count = patch.stock_count, "Menu stock set");
    Ok(())
}

/// Withdraws a product from the menu.
pub async fn withdraw(
    db: &Database,
    kind: MenuEntryKind,
    product_id: &str,
) -> Result<(), ApiError> {
    let removed = db.menu().remove(kind, product_id).await?;
    if !removed {
        return Err(CoreError::MenuEntryNotFound(product_id.to_string()).into());
    }

    info!(kind = %kind, product_id = %product_id, "Menu entry withdrawn");
    Ok(())
}
