//! # Café OMS API
//!
//! HTTP server for the café order-management system.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          API Server                                     │
//! │                                                                         │
//! │  Client ───► HTTP/JSON (3000) ───► Handlers ───► Services ───► SQLite  │
//! │                                        │                                │
//! │                                        ▼                                │
//! │                                  Policy gate                            │
//! │                               (role → action)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use cafe_api::auth::JwtManager;
use cafe_api::{build_router, ApiConfig, AppState};
use cafe_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting Café OMS API server...");

    // Load configuration
    let config = ApiConfig::load()?;
    info!(
        port = config.port,
        database_path = %config.database_path,
        "Configuration loaded"
    );

    // Connect to the database; migrations run on connect
    let db = Database::new(DbConfig::new(&config.database_path)).await?;
    let (total, applied) = db.migration_status().await?;
    info!(applied, total, "Database ready");

    let jwt = JwtManager::new(config.jwt_secret.clone(), config.jwt_lifetime_secs);
    let state = AppState::new(db, jwt);

    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(%addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
