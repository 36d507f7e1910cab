//! Catalog service: item and bundle lifecycle.
//!
//! ## Ordering Of Checks
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Item update pipeline                                               │
//! │                                                                     │
//! │  1. name conflict check   ← runs BEFORE the existence check, so a   │
//! │     (other record owns      conflicting rename is reported as a     │
//! │      the new name?)         conflict even when the id is wrong      │
//! │  2. existence check (404)                                           │
//! │  3. replace name/price/description (all required together)          │
//! │  4. guarded UPDATE         ← zero rows after a successful fetch     │
//! │                              means "nothing changed" (400)          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use cafe_core::{validation, Bundle, CoreError, Item, ItemType, MenuEntryKind, Money};
use cafe_db::Database;

use crate::error::ApiError;

// =============================================================================
// Items
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub item_type: ItemType,
    pub item_name: String,
    pub price_cents: i64,
    pub description: String,
}

/// Full replacement of an item's mutable fields. All three travel
/// together; a body missing any of them is rejected before it gets
/// here. The item type is fixed at creation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemUpdate {
    pub item_name: String,
    pub price_cents: i64,
    pub description: String,
}

/// Creates a catalog item.
pub async fn create_item(db: &Database, payload: NewItem) -> Result<Item, ApiError> {
    validation::validate_name("itemName", &payload.item_name)?;
    validation::validate_description(&payload.description)?;
    validation::validate_item_price(Money::from_cents(payload.price_cents))?;

    let name = payload.item_name.trim().to_string();
    if db.items().get_by_name(&name).await?.is_some() {
        return Err(ApiError::bad_request(format!(
            "An item named '{name}' already exists"
        )));
    }

    let now = Utc::now();
    let item = Item {
        id: Uuid::new_v4().to_string(),
        item_type: payload.item_type,
        item_name: name,
        price_cents: payload.price_cents,
        description: payload.description.trim().to_string(),
        created_at: now,
        updated_at: now,
    };

    db.items().insert(&item).await?;

    info!(item_id = %item.id, name = %item.item_name, "Item created");
    Ok(item)
}

/// Fetches an item by id.
pub async fn get_item(db: &Database, id: &str) -> Result<Item, ApiError> {
    let item = db
        .items()
        .get_by_id(id)
        .await?
        .ok_or_else(|| CoreError::ItemNotFound(id.to_string()))?;
    Ok(item)
}

/// Lists all catalog items.
pub async fn list_items(db: &Database) -> Result<Vec<Item>, ApiError> {
    Ok(db.items().list().await?)
}

/// Updates an item, replacing name, price, and description together.
pub async fn update_item(db: &Database, id: &str, payload: ItemUpdate) -> Result<(), ApiError> {
    validation::validate_name("itemName", &payload.item_name)?;
    validation::validate_description(&payload.description)?;
    validation::validate_item_price(Money::from_cents(payload.price_cents))?;

    // Conflict before existence. A rename to the item's own current
    // name is not a conflict.
    let name = payload.item_name.trim().to_string();
    if let Some(owner) = db.items().get_by_name(&name).await? {
        if owner.id != id {
            return Err(ApiError::bad_request(format!(
                "An item named '{name}' already exists"
            )));
        }
    }

    let mut item = get_item(db, id).await?;
    item.item_name = name;
    item.price_cents = payload.price_cents;
    item.description = payload.description.trim().to_string();

    let changed = db.items().update(&item).await?;
    if !changed {
        return Err(CoreError::NoOpUpdate { entity: "Item" }.into());
    }

    info!(item_id = %id, "Item updated");
    Ok(())
}

/// Deletes an item, withdrawing its menu entry if it has one.
pub async fn delete_item(db: &Database, id: &str) -> Result<(), ApiError> {
    let deleted = db.items().delete(id).await?;
    if !deleted {
        return Err(CoreError::ItemNotFound(id.to_string()).into());
    }

    db.menu().remove(MenuEntryKind::Item, id).await?;

    info!(item_id = %id, "Item deleted");
    Ok(())
}

// =============================================================================
// Bundles
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBundle {
    pub bundle_name: String,
    pub item_ids: Vec<String>,
    pub discount: i64,
    #[serde(default)]
    pub limited_edition: bool,
    pub expires_on: Option<DateTime<Utc>>,
    pub description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundlePatch {
    pub discount: Option<i64>,
    pub limited_edition: Option<bool>,
    pub expires_on: Option<DateTime<Utc>>,
    pub description: Option<String>,
}

/// Creates a bundle over an exact set of existing items.
pub async fn create_bundle(db: &Database, payload: NewBundle) -> Result<Bundle, ApiError> {
    validation::validate_name("bundleName", &payload.bundle_name)?;
    validation::validate_description(&payload.description)?;
    validation::validate_discount(payload.discount)?;
    validation::validate_bundle_schedule(
        payload.limited_edition,
        payload.expires_on,
        Utc::now(),
    )?;

    let name = payload.bundle_name.trim().to_string();
    if db.bundles().get_by_name(&name).await?.is_some() {
        return Err(ApiError::bad_request(format!(
            "A bundle named '{name}' already exists"
        )));
    }

    // Missing ids are silently dropped; only the resolved count is
    // checked.
    let items = db.items().find_many(&payload.item_ids).await?;
    validation::validate_bundle_items(items.len())?;

    let item_ids: Vec<String> = items.iter().map(|i| i.id.clone()).collect();
    let set_key = Bundle::item_set_key(&item_ids);
    if db.bundles().get_by_item_set(&set_key).await?.is_some() {
        return Err(ApiError::bad_request(
            "A bundle with this exact item set already exists",
        ));
    }

    let (before, after) = Bundle::derive_prices(&items, payload.discount);
    validation::validate_bundle_prices(before, after)?;

    let now = Utc::now();
    let bundle = Bundle {
        id: Uuid::new_v4().to_string(),
        bundle_name: name,
        items,
        price_before_cents: before.cents(),
        discount: payload.discount,
        price_after_cents: after.cents(),
        limited_edition: payload.limited_edition,
        expires_on: payload.expires_on,
        description: payload.description.trim().to_string(),
        created_at: now,
        updated_at: now,
    };

    db.bundles().insert(&bundle).await?;

    info!(bundle_id = %bundle.id, name = %bundle.bundle_name, "Bundle created");
    Ok(bundle)
}

/// Fetches a bundle by id.
pub async fn get_bundle(db: &Database, id: &str) -> Result<Bundle, ApiError> {
    let bundle = db
        .bundles()
        .get_by_id(id)
        .await?
        .ok_or_else(|| CoreError::BundleNotFound(id.to_string()))?;
    Ok(bundle)
}

/// Lists all bundles.
pub async fn list_bundles(db: &Database) -> Result<Vec<Bundle>, ApiError> {
    Ok(db.bundles().list().await?)
}

/// Updates a bundle's mutable fields.
///
/// The name and item set never change. The discounted price is
/// re-derived from the *stored* pre-discount price, so a discount
/// change alone reprices the bundle.
pub async fn update_bundle(db: &Database, id: &str, patch: BundlePatch) -> Result<(), ApiError> {
    let mut bundle = get_bundle(db, id).await?;

    if let Some(discount) = patch.discount {
        bundle.discount = discount;
    }
    if let Some(limited_edition) = patch.limited_edition {
        bundle.limited_edition = limited_edition;
    }
    if let Some(description) = patch.description {
        bundle.description = description.trim().to_string();
    }

    // A bundle that ends up non-limited sheds its expiry; a limited
    // one keeps the stored expiry unless the patch replaces it.
    bundle.expires_on = if bundle.limited_edition {
        patch.expires_on.or(bundle.expires_on)
    } else {
        None
    };

    validation::validate_discount(bundle.discount)?;
    validation::validate_description(&bundle.description)?;
    validation::validate_bundle_schedule(bundle.limited_edition, bundle.expires_on, Utc::now())?;

    let before = Money::from_cents(bundle.price_before_cents);
    let after = before.apply_discount(bundle.discount);
    validation::validate_bundle_prices(before, after)?;
    bundle.price_after_cents = after.cents();

    let changed = db.bundles().update(&bundle).await?;
    if !changed {
        return Err(CoreError::NoOpUpdate { entity: "Bundle" }.into());
    }

    info!(bundle_id = %id, "Bundle updated");
    Ok(())
}

/// Deletes a bundle, withdrawing its menu entry if it has one.
pub async fn delete_bundle(db: &Database, id: &str) -> Result<(), ApiError> {
    let deleted = db.bundles().delete(id).await?;
    if !deleted {
        return Err(CoreError::BundleNotFound(id.to_string()).into());
    }

    db.menu().remove(MenuEntryKind::Bundle, id).await?;

    info!(bundle_id = %id, "Bundle deleted");
    Ok(())
}
