//! # User Repository
//!
//! Database operations for accounts.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use cafe_core::User;

const USER_COLUMNS: &str =
    "id, username, password_hash, user_type, first_name, last_name, email, gender, created_at";

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Inserts a new user.
    ///
    /// Unique violations are mapped back to the offending field so the
    /// API can say "username taken" rather than leaking SQL.
    pub async fn insert(&self, user: &User) -> DbResult<()> {
        debug!(id = %user.id, username = %user.username, "Inserting user");

        let result = sqlx::query(
            r#"
            INSERT INTO users (
                id, username, password_hash, user_type,
                first_name, last_name, email, gender, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.user_type)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(user.gender)
        .bind(user.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) => match DbError::from(err) {
                DbError::UniqueViolation { field, .. } if field.contains("username") => {
                    Err(DbError::duplicate("username", &user.username))
                }
                DbError::UniqueViolation { field, .. } if field.contains("email") => {
                    Err(DbError::duplicate("email", &user.email))
                }
                other => Err(other),
            },
        }
    }

    /// Gets a user by login name.
    pub async fn get_by_username(&self, username: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ?1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Gets a user by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<User>> {
        let user =
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(user)
    }
}
