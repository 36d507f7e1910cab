//! Request extractors.
//!
//! [`AuthUser`] turns the bearer token into an identity; handlers that
//! take it are authenticated by construction. [`ApiJson`] wraps
//! `axum::Json` so malformed bodies come back as our `{"message"}` 400
//! instead of axum's default rejection.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Request},
    http::{header::AUTHORIZATION, request::Parts},
    Json,
};

use cafe_core::UserRole;

use crate::auth::extract_bearer_token;
use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Authenticated User
// =============================================================================

/// The identity carried by the request's bearer token.
///
/// The token is the sole identity source: handlers never accept a
/// user id from the body or path for authorization purposes.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub role: UserRole,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Missing authorization header"))?;

        let token = extract_bearer_token(header)
            .ok_or_else(|| ApiError::unauthorized("Expected a bearer token"))?;

        let claims = state.jwt.validate_token(token)?;

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.user_type,
        })
    }
}

// =============================================================================
// JSON Body
// =============================================================================

/// JSON extractor whose rejection is a 400 with our error body.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = axum::extract::rejection::JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
        Ok(ApiJson(value))
    }
}
