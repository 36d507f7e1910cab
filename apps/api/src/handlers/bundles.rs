//! Bundle handlers. Manager/Admin only.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use cafe_core::{authorize, Action, Bundle};

use crate::error::ApiError;
use crate::extract::{ApiJson, AuthUser};
use crate::services::catalog::{self, BundlePatch, NewBundle};
use crate::state::AppState;

/// `POST /bundles`
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<NewBundle>,
) -> Result<(StatusCode, Json<Bundle>), ApiError> {
    authorize(user.role, Action::ManageBundles)?;
    let bundle = catalog::create_bundle(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(bundle)))
}

/// `GET /bundles`
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<Bundle>>, ApiError> {
    authorize(user.role, Action::ManageBundles)?;
    let bundles = catalog::list_bundles(&state.db).await?;
    Ok(Json(bundles))
}

/// `GET /bundles/:id`
pub async fn get(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Bundle>, ApiError> {
    authorize(user.role, Action::ManageBundles)?;
    let bundle = catalog::get_bundle(&state.db, &id).await?;
    Ok(Json(bundle))
}

/// `PATCH /bundles/:id`
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<BundlePatch>,
) -> Result<StatusCode, ApiError> {
    authorize(user.role, Action::ManageBundles)?;
    catalog::update_bundle(&state.db, &id, patch).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /bundles/:id`
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    authorize(user.role, Action::ManageBundles)?;
    catalog::delete_bundle(&state.db, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
