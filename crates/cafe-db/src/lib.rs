//! # cafe-db: Database Layer for the Café OMS
//!
//! This crate provides database access for the café order-management
//! system. It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Café OMS Data Flow                               │
//! │                                                                         │
//! │  HTTP Handler (place_order)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     cafe-db (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  (menu.rs...) │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │    │ ItemRepo      │    │ 001_init.sql │  │   │
//! │  │   │ Connection    │◄───│ MenuRepo      │    │ ...          │  │   │
//! │  │   │ Management    │    │ OrderRepo     │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │                    ./data/cafe.db (WAL)                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cafe_db::{Database, DbConfig};
//!
//! let config = DbConfig::new("path/to/cafe.db");
//! let db = Database::new(config).await?;
//!
//! let menu = db.menu().list_current().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::bundle::BundleRepository;
pub use repository::item::ItemRepository;
pub use repository::menu::MenuRepository;
pub use repository::order::OrderRepository;
pub use repository::user::UserRepository;

// =============================================================================
// Integration Tests (in-memory SQLite)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use cafe_core::{
        Bundle, Gender, Item, ItemType, MenuEntry, MenuEntryKind, MenuProduct, Order,
        OrderStatus, PaymentMethod, User, UserRole,
    };
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn make_item(name: &str, price_units: i64) -> Item {
        let now = Utc::now();
        Item {
            id: Uuid::new_v4().to_string(),
            item_type: ItemType::Coffee,
            item_name: name.to_string(),
            price_cents: price_units * 100,
            description: "A test item".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn make_bundle(name: &str, items: Vec<Item>, discount: i64) -> Bundle {
        let now = Utc::now();
        let (before, after) = Bundle::derive_prices(&items, discount);
        Bundle {
            id: Uuid::new_v4().to_string(),
            bundle_name: name.to_string(),
            items,
            price_before_cents: before.cents(),
            discount,
            price_after_cents: after.cents(),
            limited_edition: false,
            expires_on: None,
            description: "A test bundle".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn make_entry(product: MenuProduct, stock: i64) -> MenuEntry {
        let now = Utc::now();
        MenuEntry {
            id: Uuid::new_v4().to_string(),
            product,
            availability: stock > 0,
            stock_count: stock,
            created_at: now,
            updated_at: now,
        }
    }

    fn make_user(username: &str, email: &str) -> User {
        User {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            password_hash: "$argon2id$fake".to_string(),
            user_type: UserRole::Customer,
            first_name: "Test".to_string(),
            last_name: "Person".to_string(),
            email: email.to_string(),
            gender: Gender::Female,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_item_roundtrip_and_duplicate_name() {
        let db = test_db().await;
        let item = make_item("Espresso", 30);

        db.items().insert(&item).await.unwrap();
        let fetched = db.items().get_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(fetched.item_name, "Espresso");
        assert_eq!(fetched.price_cents, 3000);

        let dup = make_item("Espresso", 40);
        let err = db.items().insert(&dup).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_item_update_rejects_identical_payload() {
        let db = test_db().await;
        let mut item = make_item("Latte", 40);
        db.items().insert(&item).await.unwrap();

        // Identical payload touches nothing.
        assert!(!db.items().update(&item).await.unwrap());

        item.price_cents = 4500;
        assert!(db.items().update(&item).await.unwrap());

        let fetched = db.items().get_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(fetched.price_cents, 4500);
    }

    #[tokio::test]
    async fn test_bundle_item_set_uniqueness() {
        let db = test_db().await;
        let a = make_item("Croissant", 20);
        let b = make_item("Americano", 25);
        db.items().insert(&a).await.unwrap();
        db.items().insert(&b).await.unwrap();

        let bundle = make_bundle("Breakfast", vec![a.clone(), b.clone()], 10);
        db.bundles().insert(&bundle).await.unwrap();

        // Same set under a different name is still rejected.
        let rival = make_bundle("Brunch", vec![b, a], 20);
        let err = db.bundles().insert(&rival).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_menu_decrement_guard_and_restock() {
        let db = test_db().await;
        let item = make_item("Muffin", 15);
        let entry = make_entry(MenuProduct::Item(item), 1);
        db.menu().insert(&entry).await.unwrap();

        // First decrement wins, drives stock to zero and availability off.
        assert!(db.menu().decrement_stock(&entry.id).await.unwrap());
        let after = db.menu().get_by_id(&entry.id).await.unwrap().unwrap();
        assert_eq!(after.stock_count, 0);
        assert!(!after.availability);

        // Second decrement finds no stock to take.
        assert!(!db.menu().decrement_stock(&entry.id).await.unwrap());
        let still = db.menu().get_by_id(&entry.id).await.unwrap().unwrap();
        assert_eq!(still.stock_count, 0);

        // Restock forces availability back on.
        assert!(db.menu().restock(&entry.id).await.unwrap());
        let restored = db.menu().get_by_id(&entry.id).await.unwrap().unwrap();
        assert_eq!(restored.stock_count, 1);
        assert!(restored.availability);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_decrements_have_one_winner() {
        // A file-backed pool with several connections, so the tasks
        // really contend instead of queueing on one handle.
        let path = std::env::temp_dir().join(format!("cafe-race-{}.db", Uuid::new_v4()));
        let db = Database::new(DbConfig::new(&path)).await.unwrap();

        let item = make_item("Last Slice", 45);
        let entry = make_entry(MenuProduct::Item(item), 1);
        db.menu().insert(&entry).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let db = db.clone();
            let id = entry.id.clone();
            handles.push(tokio::spawn(
                async move { db.menu().decrement_stock(&id).await },
            ));
        }

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap().unwrap() {
                winners += 1;
            }
        }

        // Exactly one task takes the last unit; stock never goes
        // negative and availability flips off in the same write.
        assert_eq!(winners, 1);
        let after = db.menu().get_by_id(&entry.id).await.unwrap().unwrap();
        assert_eq!(after.stock_count, 0);
        assert!(!after.availability);

        db.close().await;
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
        }
    }

    #[tokio::test]
    async fn test_menu_purges_expired_bundles_on_read() {
        let db = test_db().await;
        let a = make_item("Scone", 10);
        let b = make_item("Mocha", 35);

        let mut expired = make_bundle("Gone", vec![a.clone(), b.clone()], 10);
        expired.limited_edition = true;
        expired.expires_on = Some(Utc::now() - Duration::hours(1));

        let fresh = make_bundle("Here", vec![a], 10);

        let expired_entry = make_entry(MenuProduct::Bundle(expired), 5);
        let fresh_entry = make_entry(MenuProduct::Bundle(fresh), 5);
        db.menu().insert(&expired_entry).await.unwrap();
        db.menu().insert(&fresh_entry).await.unwrap();

        let menu = db.menu().list_current().await.unwrap();
        assert_eq!(menu.len(), 1);
        assert_eq!(menu[0].id, fresh_entry.id);

        // The expired entry is really gone, not just filtered.
        assert!(db.menu().get_by_id(&expired_entry.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_menu_one_entry_per_product() {
        let db = test_db().await;
        let item = make_item("Flat White", 38);

        let first = make_entry(MenuProduct::Item(item.clone()), 3);
        db.menu().insert(&first).await.unwrap();

        let second = make_entry(MenuProduct::Item(item), 5);
        let err = db.menu().insert(&second).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_order_cancel_is_single_shot() {
        let db = test_db().await;
        let item = make_item("Tea", 12);
        let entry = make_entry(MenuProduct::Item(item), 5);
        let now = Utc::now();

        let order = Order {
            id: Uuid::new_v4().to_string(),
            customer_id: "customer-1".to_string(),
            date: now,
            ordered_items: vec![entry],
            total_cents: 1200,
            comment: None,
            payment_method: PaymentMethod::Cash,
            status: OrderStatus::Preparing,
            created_at: now,
            updated_at: now,
        };
        db.orders().insert(&order).await.unwrap();

        // Wrong owner never matches the guard.
        assert!(!db
            .orders()
            .cancel_if_preparing(&order.id, "someone-else")
            .await
            .unwrap());

        assert!(db
            .orders()
            .cancel_if_preparing(&order.id, "customer-1")
            .await
            .unwrap());

        // Second cancel finds a terminal order.
        assert!(!db
            .orders()
            .cancel_if_preparing(&order.id, "customer-1")
            .await
            .unwrap());

        let fetched = db.orders().get_by_id(&order.id).await.unwrap().unwrap();
        assert_eq!(fetched.status, OrderStatus::Cancelled);
        assert_eq!(fetched.ordered_items.len(), 1);
    }

    #[tokio::test]
    async fn test_user_duplicate_mapping() {
        let db = test_db().await;
        let user = make_user("regular1", "one@example.com");
        db.users().insert(&user).await.unwrap();

        let same_name = make_user("regular1", "two@example.com");
        match db.users().insert(&same_name).await.unwrap_err() {
            DbError::UniqueViolation { field, .. } => assert_eq!(field, "username"),
            other => panic!("unexpected error: {other}"),
        }

        let same_email = make_user("regular2", "one@example.com");
        match db.users().insert(&same_email).await.unwrap_err() {
            DbError::UniqueViolation { field, .. } => assert_eq!(field, "email"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
