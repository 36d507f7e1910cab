//! Account handlers: signup, login, logout.

use axum::{extract::State, http::StatusCode, Json};

use crate::extract::{ApiJson, AuthUser};
use crate::error::ApiError;
use crate::services::accounts::{self, LoginRequest, LoginResponse, SignupRequest, SignupResponse};
use crate::state::AppState;

/// `POST /signup`
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    let created = accounts::signup(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `POST /login`
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let session = accounts::login(&state.db, &state.jwt, payload).await?;
    Ok(Json(session))
}

/// `POST /logout`
///
/// Tokens are stateless; the server has nothing to revoke. The
/// endpoint exists so clients have a uniform logout call.
pub async fn logout(_user: AuthUser) -> StatusCode {
    StatusCode::NO_CONTENT
}
