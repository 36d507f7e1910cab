//! Account service: signup and login.
//!
//! Signup always creates Customer accounts. Staff accounts are
//! provisioned out of band by the seed binary.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use cafe_core::{validation, Gender, User, UserRole};
use cafe_db::Database;

use crate::auth::{hash_password, verify_password, JwtManager};
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: Gender,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user_id: String,
    pub user_type: UserRole,
}

/// Registers a new customer account.
pub async fn signup(db: &Database, payload: SignupRequest) -> Result<SignupResponse, ApiError> {
    validation::validate_username(&payload.username)?;
    validation::validate_password(&payload.password)?;
    validation::validate_person_name("firstName", &payload.first_name)?;
    validation::validate_person_name("lastName", &payload.last_name)?;
    validation::validate_email(&payload.email)?;

    let user = User {
        id: Uuid::new_v4().to_string(),
        username: payload.username.trim().to_string(),
        password_hash: hash_password(&payload.password)?,
        user_type: UserRole::Customer,
        first_name: payload.first_name.trim().to_string(),
        last_name: payload.last_name.trim().to_string(),
        email: payload.email.trim().to_lowercase(),
        gender: payload.gender,
        created_at: Utc::now(),
    };

    db.users().insert(&user).await?;

    info!(user_id = %user.id, "Customer account created");
    Ok(SignupResponse { user_id: user.id })
}

/// Authenticates a user and issues a session token.
///
/// Wrong username and wrong password produce the same message, so the
/// response never confirms which half was wrong.
pub async fn login(
    db: &Database,
    jwt: &JwtManager,
    payload: LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let user = db
        .users()
        .get_by_username(payload.username.trim())
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid username or password"))?;

    if !verify_password(&payload.password, &user.password_hash) {
        return Err(ApiError::unauthorized("Invalid username or password"));
    }

    let token = jwt.generate_token(&user.id, user.user_type)?;

    info!(user_id = %user.id, role = %user.user_type, "User logged in");
    Ok(LoginResponse {
        token,
        user_id: user.id,
        user_type: user.user_type,
    })
}
