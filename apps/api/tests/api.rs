//! End-to-end API tests against an in-memory database.
//!
//! Each test spins up its own router and SQLite instance, so tests
//! are fully isolated and run in parallel.

use axum_test::TestServer;
use chrono::{Duration, Utc};
use http::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

use cafe_api::auth::JwtManager;
use cafe_api::{build_router, AppState};
use cafe_core::{Bundle, Item, ItemType, MenuEntry, MenuProduct, UserRole};
use cafe_db::{Database, DbConfig};

const TEST_SECRET: &str = "test-secret";

struct TestApp {
    server: TestServer,
    db: Database,
    jwt: JwtManager,
}

impl TestApp {
    async fn spawn() -> Self {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let state = AppState::new(
            db.clone(),
            JwtManager::new(TEST_SECRET.to_string(), 3600),
        );
        let server = TestServer::new(build_router(state)).unwrap();
        TestApp {
            server,
            db,
            jwt: JwtManager::new(TEST_SECRET.to_string(), 3600),
        }
    }

    /// Mints a token directly; the token is the sole identity source,
    /// so no database row is needed for role checks.
    fn token(&self, role: UserRole) -> String {
        self.jwt
            .generate_token(&Uuid::new_v4().to_string(), role)
            .unwrap()
    }

    async fn create_item(&self, chef: &str, name: &str, price_cents: i64) -> Value {
        let response = self
            .server
            .post("/items")
            .authorization_bearer(chef)
            .json(&json!({
                "itemType": "coffee",
                "itemName": name,
                "priceCents": price_cents,
                "description": "A fine beverage",
            }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
        response.json::<Value>()
    }

    async fn publish_item(&self, chef: &str, item_id: &str, stock: i64) -> Value {
        let response = self
            .server
            .post("/menu/items")
            .authorization_bearer(chef)
            .json(&json!({
                "itemId": item_id,
                "availability": stock > 0,
                "stockCount": stock,
            }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
        response.json::<Value>()
    }

    async fn menu_entry_for(&self, token: &str, product_id: &str) -> Option<Value> {
        let response = self.server.get("/menu").authorization_bearer(token).await;
        assert_eq!(response.status_code(), StatusCode::OK);
        response
            .json::<Vec<Value>>()
            .into_iter()
            .find(|entry| entry["product"]["id"] == product_id)
    }
}

// =============================================================================
// Accounts
// =============================================================================

#[tokio::test]
async fn test_signup_login_and_bad_password() {
    let app = TestApp::spawn().await;

    let response = app
        .server
        .post("/signup")
        .json(&json!({
            "username": "regular_customer",
            "password": "Secret1pass",
            "firstName": "Nadia",
            "lastName": "Kamel",
            "email": "nadia@example.com",
            "gender": "female",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let response = app
        .server
        .post("/login")
        .json(&json!({ "username": "regular_customer", "password": "Secret1pass" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["userType"], "customer");
    assert!(body["token"].as_str().unwrap().len() > 20);

    let response = app
        .server
        .post("/login")
        .json(&json!({ "username": "regular_customer", "password": "Wrong1pass" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_signup_is_always_customer_and_weak_password_rejected() {
    let app = TestApp::spawn().await;

    // Weak password: no uppercase.
    let response = app
        .server
        .post("/signup")
        .json(&json!({
            "username": "regular_customer",
            "password": "weakpass1",
            "firstName": "Nadia",
            "lastName": "Kamel",
            "email": "nadia@example.com",
            "gender": "female",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_requests_without_token_are_unauthorized() {
    let app = TestApp::spawn().await;

    let response = app.server.get("/menu").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = app.server.post("/orders").json(&json!({})).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Role Gates
// =============================================================================

#[tokio::test]
async fn test_role_gates() {
    let app = TestApp::spawn().await;
    let customer = app.token(UserRole::Customer);
    let chef = app.token(UserRole::Chef);
    let manager = app.token(UserRole::Manager);
    let waiter = app.token(UserRole::Waiter);

    // Customers cannot touch the catalog.
    let response = app
        .server
        .post("/items")
        .authorization_bearer(&customer)
        .json(&json!({ "itemType": "coffee", "itemName": "Nope", "priceCents": 1000, "description": "nope" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    // Chefs cannot manage bundles, managers cannot manage items.
    let response = app
        .server
        .post("/bundles")
        .authorization_bearer(&chef)
        .json(&json!({ "bundleName": "Nope", "itemIds": [], "discount": 10, "description": "nope" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = app
        .server
        .post("/items")
        .authorization_bearer(&manager)
        .json(&json!({ "itemType": "coffee", "itemName": "Nope", "priceCents": 1000, "description": "nope" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    // Staff cannot place orders; waiters can only read the menu.
    let response = app
        .server
        .post("/orders")
        .authorization_bearer(&waiter)
        .json(&json!({ "orderedItems": [], "paymentMethod": "cash" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = app.server.get("/menu").authorization_bearer(&waiter).await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

// =============================================================================
// Catalog
// =============================================================================

#[tokio::test]
async fn test_item_crud_and_no_op_update() {
    let app = TestApp::spawn().await;
    let chef = app.token(UserRole::Chef);

    let item = app.create_item(&chef, "Espresso", 3000).await;
    let item_id = item["id"].as_str().unwrap();

    // Duplicate name rejected.
    let response = app
        .server
        .post("/items")
        .authorization_bearer(&chef)
        .json(&json!({ "itemType": "coffee", "itemName": "Espresso", "priceCents": 4000, "description": "Again" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    // Name, price, and description travel together; a body carrying
    // only some of them is rejected at the boundary.
    let response = app
        .server
        .patch(&format!("/items/{item_id}"))
        .authorization_bearer(&chef)
        .json(&json!({ "priceCents": 3500 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    // A full body that changes nothing is rejected too.
    let response = app
        .server
        .patch(&format!("/items/{item_id}"))
        .authorization_bearer(&chef)
        .json(&json!({
            "itemName": "Espresso",
            "priceCents": 3000,
            "description": "A fine beverage",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    // A real change goes through.
    let response = app
        .server
        .patch(&format!("/items/{item_id}"))
        .authorization_bearer(&chef)
        .json(&json!({
            "itemName": "Espresso",
            "priceCents": 3500,
            "description": "A fine beverage",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = app
        .server
        .get(&format!("/items/{item_id}"))
        .authorization_bearer(&chef)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["priceCents"], 3500);

    let response = app
        .server
        .delete(&format!("/items/{item_id}"))
        .authorization_bearer(&chef)
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = app
        .server
        .get(&format!("/items/{item_id}"))
        .authorization_bearer(&chef)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_item_price_bounds() {
    let app = TestApp::spawn().await;
    let chef = app.token(UserRole::Chef);

    for bad_price in [99, 20_001] {
        let response = app
            .server
            .post("/items")
            .authorization_bearer(&chef)
            .json(&json!({ "itemType": "tea", "itemName": "Out Of Range", "priceCents": bad_price, "description": "Bad" }))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_bundle_pricing_and_exact_set_uniqueness() {
    let app = TestApp::spawn().await;
    let chef = app.token(UserRole::Chef);
    let manager = app.token(UserRole::Manager);

    let a = app.create_item(&chef, "Cappuccino", 7000).await;
    let b = app.create_item(&chef, "Cheesecake", 5000).await;
    let ids = [a["id"].as_str().unwrap(), b["id"].as_str().unwrap()];

    // 70 + 50 units at 10% off comes to 108 units exactly.
    let response = app
        .server
        .post("/bundles")
        .authorization_bearer(&manager)
        .json(&json!({
            "bundleName": "Afternoon Treat",
            "itemIds": ids,
            "discount": 10,
            "description": "Coffee and cake",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let bundle = response.json::<Value>();
    assert_eq!(bundle["priceBeforeCents"], 12_000);
    assert_eq!(bundle["priceAfterCents"], 10_800);

    // The same item set in reverse order is still the same set.
    let response = app
        .server
        .post("/bundles")
        .authorization_bearer(&manager)
        .json(&json!({
            "bundleName": "Different Name",
            "itemIds": [ids[1], ids[0]],
            "discount": 25,
            "description": "Same contents",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_bundle_requires_two_resolved_items_and_future_expiry() {
    let app = TestApp::spawn().await;
    let chef = app.token(UserRole::Chef);
    let manager = app.token(UserRole::Manager);

    let a = app.create_item(&chef, "Scone", 2000).await;

    // One real item plus one unknown id resolves to a single item.
    let response = app
        .server
        .post("/bundles")
        .authorization_bearer(&manager)
        .json(&json!({
            "bundleName": "Too Small",
            "itemIds": [a["id"], Uuid::new_v4().to_string()],
            "discount": 10,
            "description": "Not enough items",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    // Limited edition without a future expiry is rejected.
    let b = app.create_item(&chef, "Tart", 2500).await;
    let past = (Utc::now() - Duration::days(1)).to_rfc3339();
    let response = app
        .server
        .post("/bundles")
        .authorization_bearer(&manager)
        .json(&json!({
            "bundleName": "Expired Already",
            "itemIds": [a["id"], b["id"]],
            "discount": 10,
            "limitedEdition": true,
            "expiresOn": past,
            "description": "Too late",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_bundle_update_reprices_from_stored_base() {
    let app = TestApp::spawn().await;
    let chef = app.token(UserRole::Chef);
    let manager = app.token(UserRole::Manager);

    let a = app.create_item(&chef, "Mocha", 7000).await;
    let b = app.create_item(&chef, "Brownie", 5000).await;

    let response = app
        .server
        .post("/bundles")
        .authorization_bearer(&manager)
        .json(&json!({
            "bundleName": "Sweet Pair",
            "itemIds": [a["id"], b["id"]],
            "discount": 10,
            "description": "Mocha and brownie",
        }))
        .await;
    let bundle = response.json::<Value>();
    let bundle_id = bundle["id"].as_str().unwrap();

    // Raising the discount reprices against the frozen base price.
    let response = app
        .server
        .patch(&format!("/bundles/{bundle_id}"))
        .authorization_bearer(&manager)
        .json(&json!({ "discount": 50 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = app
        .server
        .get(&format!("/bundles/{bundle_id}"))
        .authorization_bearer(&manager)
        .await;
    let updated = response.json::<Value>();
    assert_eq!(updated["priceBeforeCents"], 12_000);
    assert_eq!(updated["priceAfterCents"], 6_000);
}

// =============================================================================
// Menu
// =============================================================================

#[tokio::test]
async fn test_menu_stock_patch_rules() {
    let app = TestApp::spawn().await;
    let chef = app.token(UserRole::Chef);

    let item = app.create_item(&chef, "Latte", 4000).await;
    let item_id = item["id"].as_str().unwrap();
    app.publish_item(&chef, item_id, 5).await;

    // Same value is a rejected no-op.
    let response = app
        .server
        .patch(&format!("/menu/items/{item_id}/stock"))
        .authorization_bearer(&chef)
        .json(&json!({ "stockCount": 5 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    // Negative counts are rejected.
    let response = app
        .server
        .patch(&format!("/menu/items/{item_id}/stock"))
        .authorization_bearer(&chef)
        .json(&json!({ "stockCount": -1 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    // Setting zero flips availability off in the same write.
    let response = app
        .server
        .patch(&format!("/menu/items/{item_id}/stock"))
        .authorization_bearer(&chef)
        .json(&json!({ "stockCount": 0 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let entry = app.menu_entry_for(&chef, item_id).await.unwrap();
    assert_eq!(entry["stockCount"], 0);
    assert_eq!(entry["availability"], false);

    // Unknown product is a 404.
    let response = app
        .server
        .patch(&format!("/menu/items/{}/stock", Uuid::new_v4()))
        .authorization_bearer(&chef)
        .json(&json!({ "stockCount": 3 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_menu_rejects_duplicate_publish() {
    let app = TestApp::spawn().await;
    let chef = app.token(UserRole::Chef);

    let item = app.create_item(&chef, "Americano", 3000).await;
    let item_id = item["id"].as_str().unwrap();
    app.publish_item(&chef, item_id, 3).await;

    let response = app
        .server
        .post("/menu/items")
        .authorization_bearer(&chef)
        .json(&json!({ "itemId": item_id, "availability": true, "stockCount": 9 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_expired_bundle_entries_never_listed() {
    let app = TestApp::spawn().await;
    let customer = app.token(UserRole::Customer);

    // An already-expired snapshot cannot be created through the API,
    // so plant one directly to exercise the purge-on-read.
    let now = Utc::now();
    let make_item = |name: &str| Item {
        id: Uuid::new_v4().to_string(),
        item_type: ItemType::Cake,
        item_name: name.to_string(),
        price_cents: 2000,
        description: "Planted".to_string(),
        created_at: now,
        updated_at: now,
    };
    let items = vec![make_item("Planted A"), make_item("Planted B")];
    let (before, after) = Bundle::derive_prices(&items, 10);
    let bundle = Bundle {
        id: Uuid::new_v4().to_string(),
        bundle_name: "Bygone".to_string(),
        items,
        price_before_cents: before.cents(),
        discount: 10,
        price_after_cents: after.cents(),
        limited_edition: true,
        expires_on: Some(now - Duration::hours(1)),
        description: "Planted".to_string(),
        created_at: now,
        updated_at: now,
    };
    let entry = MenuEntry {
        id: Uuid::new_v4().to_string(),
        product: MenuProduct::Bundle(bundle),
        availability: true,
        stock_count: 5,
        created_at: now,
        updated_at: now,
    };
    app.db.menu().insert(&entry).await.unwrap();

    let response = app.server.get("/menu").authorization_bearer(&customer).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.json::<Vec<Value>>().is_empty());
}

// =============================================================================
// Orders
// =============================================================================

#[tokio::test]
async fn test_order_decrements_and_cancel_restores() {
    let app = TestApp::spawn().await;
    let chef = app.token(UserRole::Chef);
    let customer = app.token(UserRole::Customer);

    let item = app.create_item(&chef, "Flat White", 3800).await;
    let item_id = item["id"].as_str().unwrap();
    let entry = app.publish_item(&chef, item_id, 5).await;
    let entry_id = entry["id"].as_str().unwrap();

    let response = app
        .server
        .post("/orders")
        .authorization_bearer(&customer)
        .json(&json!({ "orderedItems": [entry_id], "paymentMethod": "card" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let order = response.json::<Value>();
    assert_eq!(order["totalCents"], 3800);
    assert_eq!(order["status"], "preparing");
    let order_id = order["id"].as_str().unwrap();

    let after_order = app.menu_entry_for(&customer, item_id).await.unwrap();
    assert_eq!(after_order["stockCount"], 4);
    assert_eq!(after_order["availability"], true);

    let response = app
        .server
        .patch(&format!("/orders/{order_id}/cancel"))
        .authorization_bearer(&customer)
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let restored = app.menu_entry_for(&customer, item_id).await.unwrap();
    assert_eq!(restored["stockCount"], 5);
    assert_eq!(restored["availability"], true);
}

#[tokio::test]
async fn test_cancel_restore_forces_availability() {
    let app = TestApp::spawn().await;
    let chef = app.token(UserRole::Chef);
    let customer = app.token(UserRole::Customer);

    let item = app.create_item(&chef, "Last Muffin", 1500).await;
    let item_id = item["id"].as_str().unwrap();
    let entry = app.publish_item(&chef, item_id, 1).await;
    let entry_id = entry["id"].as_str().unwrap();

    // The order takes the last unit; the entry drops off availability.
    let response = app
        .server
        .post("/orders")
        .authorization_bearer(&customer)
        .json(&json!({ "orderedItems": [entry_id], "paymentMethod": "cash" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let order_id = response.json::<Value>()["id"].as_str().unwrap().to_string();

    let sold_out = app.menu_entry_for(&customer, item_id).await.unwrap();
    assert_eq!(sold_out["stockCount"], 0);
    assert_eq!(sold_out["availability"], false);

    // A second order against the sold-out entry persists nothing.
    let response = app
        .server
        .post("/orders")
        .authorization_bearer(&customer)
        .json(&json!({ "orderedItems": [entry_id], "paymentMethod": "cash" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let untouched = app.menu_entry_for(&customer, item_id).await.unwrap();
    assert_eq!(untouched["stockCount"], 0);

    // Cancellation brings the unit back and forces availability on.
    let response = app
        .server
        .patch(&format!("/orders/{order_id}/cancel"))
        .authorization_bearer(&customer)
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let restored = app.menu_entry_for(&customer, item_id).await.unwrap();
    assert_eq!(restored["stockCount"], 1);
    assert_eq!(restored["availability"], true);
}

#[tokio::test]
async fn test_double_cancel_rejected_without_side_effects() {
    let app = TestApp::spawn().await;
    let chef = app.token(UserRole::Chef);
    let customer = app.token(UserRole::Customer);

    let item = app.create_item(&chef, "Green Tea", 1800).await;
    let item_id = item["id"].as_str().unwrap();
    let entry = app.publish_item(&chef, item_id, 5).await;
    let entry_id = entry["id"].as_str().unwrap();

    let response = app
        .server
        .post("/orders")
        .authorization_bearer(&customer)
        .json(&json!({ "orderedItems": [entry_id], "paymentMethod": "instapay" }))
        .await;
    let order_id = response.json::<Value>()["id"].as_str().unwrap().to_string();

    let response = app
        .server
        .patch(&format!("/orders/{order_id}/cancel"))
        .authorization_bearer(&customer)
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    // Second cancel names the current status and touches no stock.
    let response = app
        .server
        .patch(&format!("/orders/{order_id}/cancel"))
        .authorization_bearer(&customer)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let message = response.json::<Value>()["message"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(message.contains("Cancelled"));

    let entry = app.menu_entry_for(&customer, item_id).await.unwrap();
    assert_eq!(entry["stockCount"], 5);
}

#[tokio::test]
async fn test_orders_are_private_to_their_customer() {
    let app = TestApp::spawn().await;
    let chef = app.token(UserRole::Chef);
    let customer = app.token(UserRole::Customer);
    let other = app.token(UserRole::Customer);

    let item = app.create_item(&chef, "Lemonade", 2200).await;
    let entry = app
        .publish_item(&chef, item["id"].as_str().unwrap(), 5)
        .await;

    let response = app
        .server
        .post("/orders")
        .authorization_bearer(&customer)
        .json(&json!({ "orderedItems": [entry["id"]], "paymentMethod": "cash" }))
        .await;
    let order_id = response.json::<Value>()["id"].as_str().unwrap().to_string();

    // Another customer's view is forbidden; their cancel looks like a
    // missing order.
    let response = app
        .server
        .get(&format!("/orders/{order_id}"))
        .authorization_bearer(&other)
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = app
        .server
        .patch(&format!("/orders/{order_id}/cancel"))
        .authorization_bearer(&other)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    // The owner still sees a preparing order.
    let response = app
        .server
        .get(&format!("/orders/{order_id}"))
        .authorization_bearer(&customer)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["status"], "preparing");
}

#[tokio::test]
async fn test_complete_is_terminal_and_staff_only() {
    let app = TestApp::spawn().await;
    let chef = app.token(UserRole::Chef);
    let customer = app.token(UserRole::Customer);

    let item = app.create_item(&chef, "Iced Tea", 2000).await;
    let entry = app
        .publish_item(&chef, item["id"].as_str().unwrap(), 5)
        .await;

    let response = app
        .server
        .post("/orders")
        .authorization_bearer(&customer)
        .json(&json!({ "orderedItems": [entry["id"]], "paymentMethod": "card" }))
        .await;
    let order_id = response.json::<Value>()["id"].as_str().unwrap().to_string();

    // Customers cannot complete.
    let response = app
        .server
        .patch(&format!("/orders/{order_id}/complete"))
        .authorization_bearer(&customer)
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = app
        .server
        .patch(&format!("/orders/{order_id}/complete"))
        .authorization_bearer(&chef)
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    // A completed order can be neither cancelled nor completed again.
    let response = app
        .server
        .patch(&format!("/orders/{order_id}/cancel"))
        .authorization_bearer(&customer)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = app
        .server
        .patch(&format!("/orders/{order_id}/complete"))
        .authorization_bearer(&chef)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    // Stock is untouched by completion and the failed cancel.
    let untouched = app
        .menu_entry_for(&customer, item["id"].as_str().unwrap())
        .await
        .unwrap();
    assert_eq!(untouched["stockCount"], 4);
}

#[tokio::test]
async fn test_order_drops_unknown_and_unavailable_ids() {
    let app = TestApp::spawn().await;
    let chef = app.token(UserRole::Chef);
    let customer = app.token(UserRole::Customer);

    let item = app.create_item(&chef, "House Blend", 2600).await;
    let entry = app
        .publish_item(&chef, item["id"].as_str().unwrap(), 3)
        .await;

    // Unknown ids are dropped; the one live entry carries the order.
    let response = app
        .server
        .post("/orders")
        .authorization_bearer(&customer)
        .json(&json!({
            "orderedItems": [entry["id"], Uuid::new_v4().to_string()],
            "paymentMethod": "cash",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let order = response.json::<Value>();
    assert_eq!(order["orderedItems"].as_array().unwrap().len(), 1);
    assert_eq!(order["totalCents"], 2600);

    // Nothing resolvable at all is a 400.
    let response = app
        .server
        .post("/orders")
        .authorization_bearer(&customer)
        .json(&json!({
            "orderedItems": [Uuid::new_v4().to_string()],
            "paymentMethod": "cash",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}
