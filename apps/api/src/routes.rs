//! Route table.
//!
//! ```text
//! POST   /signup                     201  open
//! POST   /login                      200  open
//! POST   /logout                     204  any authenticated
//!
//! POST   /items                      201  Chef/Admin
//! GET    /items                      200  Chef/Admin
//! GET    /items/:id                  200  Chef/Admin
//! PATCH  /items/:id                  204  Chef/Admin
//! DELETE /items/:id                  204  Chef/Admin
//!
//! POST   /bundles                    201  Manager/Admin
//! GET    /bundles                    200  Manager/Admin
//! GET    /bundles/:id                200  Manager/Admin
//! PATCH  /bundles/:id                204  Manager/Admin
//! DELETE /bundles/:id                204  Manager/Admin
//!
//! GET    /menu                       200  any authenticated
//! POST   /menu/items                 201  Chef/Admin
//! POST   /menu/bundles               201  Manager/Admin
//! PATCH  /menu/items/:id/stock       204  Chef/Admin
//! PATCH  /menu/bundles/:id/stock     204  Manager/Admin
//! DELETE /menu/items/:id             204  Chef/Admin
//! DELETE /menu/bundles/:id           204  Manager/Admin
//!
//! POST   /orders                     201  Customer
//! GET    /orders/:id                 200  Customer (owner)
//! PATCH  /orders/:id/cancel          204  Customer (owner)
//! PATCH  /orders/:id/complete        204  Chef/Admin
//! ```

use axum::routing::{delete, get, patch, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Builds the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Accounts
        .route("/signup", post(handlers::auth::signup))
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        // Catalog: items
        .route(
            "/items",
            post(handlers::items::create).get(handlers::items::list),
        )
        .route(
            "/items/:id",
            get(handlers::items::get)
                .patch(handlers::items::update)
                .delete(handlers::items::delete),
        )
        // Catalog: bundles
        .route(
            "/bundles",
            post(handlers::bundles::create).get(handlers::bundles::list),
        )
        .route(
            "/bundles/:id",
            get(handlers::bundles::get)
                .patch(handlers::bundles::update)
                .delete(handlers::bundles::delete),
        )
        // Menu
        .route("/menu", get(handlers::menu::list))
        .route("/menu/items", post(handlers::menu::publish_item))
        .route("/menu/bundles", post(handlers::menu::publish_bundle))
        .route("/menu/items/:id/stock", patch(handlers::menu::set_item_stock))
        .route(
            "/menu/bundles/:id/stock",
            patch(handlers::menu::set_bundle_stock),
        )
        .route("/menu/items/:id", delete(handlers::menu::withdraw_item))
        .route("/menu/bundles/:id", delete(handlers::menu::withdraw_bundle))
        // Orders
        .route("/orders", post(handlers::orders::create))
        .route("/orders/:id", get(handlers::orders::get))
        .route("/orders/:id/cancel", patch(handlers::orders::cancel))
        .route("/orders/:id/complete", patch(handlers::orders::complete))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
