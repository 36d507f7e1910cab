//! Item handlers. Chef/Admin only; the gate runs before anything
//! else so an unauthorized caller learns nothing about the payload.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use cafe_core::{authorize, Action, Item};

use crate::error::ApiError;
use crate::extract::{ApiJson, AuthUser};
use crate::services::catalog::{self, ItemUpdate, NewItem};
use crate::state::AppState;

/// `POST /items`
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<NewItem>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    authorize(user.role, Action::ManageItems)?;
    let item = catalog::create_item(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// `GET /items`
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<Item>>, ApiError> {
    authorize(user.role, Action::ManageItems)?;
    let items = catalog::list_items(&state.db).await?;
    Ok(Json(items))
}

/// `GET /items/:id`
pub async fn get(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Item>, ApiError> {
    authorize(user.role, Action::ManageItems)?;
    let item = catalog::get_item(&state.db, &id).await?;
    Ok(Json(item))
}

/// `PATCH /items/:id`
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<ItemUpdate>,
) -> Result<StatusCode, ApiError> {
    authorize(user.role, Action::ManageItems)?;
    catalog::update_item(&state.db, &id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /items/:id`
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    authorize(user.role, Action::ManageItems)?;
    catalog::delete_item(&state.db, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
