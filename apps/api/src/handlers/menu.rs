//! Menu handlers.
//!
//! Reading is open to any authenticated role. Mutation is split by
//! product side: item entries are Chef/Admin, bundle entries are
//! Manager/Admin, mirroring who owns the catalog records.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use cafe_core::{authorize, Action, MenuEntry, MenuEntryKind};

use crate::error::ApiError;
use crate::extract::{ApiJson, AuthUser};
use crate::services::menu::{self, PublishBundle, PublishItem, StockPatch};
use crate::state::AppState;

/// `GET /menu`
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<MenuEntry>>, ApiError> {
    authorize(user.role, Action::ReadMenu)?;
    let entries = menu::list_menu(&state.db).await?;
    Ok(Json(entries))
}

/// `POST /menu/items`
pub async fn publish_item(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<PublishItem>,
) -> Result<(StatusCode, Json<MenuEntry>), ApiError> {
    authorize(user.role, Action::StockItems)?;
    let entry = menu::publish_item(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// `POST /menu/bundles`
pub async fn publish_bundle(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<PublishBundle>,
) -> Result<(StatusCode, Json<MenuEntry>), ApiError> {
    authorize(user.role, Action::StockBundles)?;
    let entry = menu::publish_bundle(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// `PATCH /menu/items/:id/stock` (`:id` is the item id)
pub async fn set_item_stock(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<StockPatch>,
) -> Result<StatusCode, ApiError> {
    authorize(user.role, Action::StockItems)?;
    menu::set_stock(&state.db, MenuEntryKind::Item, &id, patch).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PATCH /menu/bundles/:id/stock` (`:id` is the bundle id)
pub async fn set_bundle_stock(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<StockPatch>,
) -> Result<StatusCode, ApiError> {
    authorize(user.role, Action::StockBundles)?;
    menu::set_stock(&state.db, MenuEntryKind::Bundle, &id, patch).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /menu/items/:id`
pub async fn withdraw_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    authorize(user.role, Action::StockItems)?;
    menu::withdraw(&state.db, MenuEntryKind::Item, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /menu/bundles/:id`
pub async fn withdraw_bundle(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    authorize(user.role, Action::StockBundles)?;
    menu::withdraw(&state.db, MenuEntryKind::Bundle, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
