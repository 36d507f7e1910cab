//! Shared application state.

use std::sync::Arc;

use cafe_db::Database;

use crate::auth::JwtManager;

/// State shared by every handler. Cloning is cheap: the database
/// wraps a pooled handle and the JWT manager is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub jwt: Arc<JwtManager>,
}

impl AppState {
    pub fn new(db: Database, jwt: JwtManager) -> Self {
        AppState {
            db,
            jwt: Arc::new(jwt),
        }
    }
}
