//! # cafe-api library surface
//!
//! The HTTP application is exposed as a library so the binary stays a
//! thin bootstrap and integration tests can build the router against
//! an in-memory database.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod state;

pub use config::ApiConfig;
pub use routes::build_router;
pub use state::AppState;
