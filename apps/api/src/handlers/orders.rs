//! Order handlers.
//!
//! Customers place, view, and cancel their own orders; completion is
//! a kitchen action (Chef/Admin). The customer id always comes from
//! the token, never from the request.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use cafe_core::{authorize, Action, Order};

use crate::error::ApiError;
use crate::extract::{ApiJson, AuthUser};
use crate::services::orders::{self, NewOrder};
use crate::state::AppState;

/// `POST /orders`
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<NewOrder>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    authorize(user.role, Action::PlaceOrder)?;
    let order = orders::place_order(&state.db, &user.user_id, payload).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// `GET /orders/:id`
pub async fn get(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    authorize(user.role, Action::PlaceOrder)?;
    let order = orders::view_order(&state.db, &user.user_id, &id).await?;
    Ok(Json(order))
}

/// `PATCH /orders/:id/cancel`
pub async fn cancel(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    authorize(user.role, Action::PlaceOrder)?;
    orders::cancel_order(&state.db, &user.user_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PATCH /orders/:id/complete`
pub async fn complete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    authorize(user.role, Action::CompleteOrder)?;
    orders::complete_order(&state.db, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
