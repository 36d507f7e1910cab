//! Engine services.
//!
//! Each module owns one slice of the domain and is called by exactly
//! one handler module. Handlers gate on the access policy first; the
//! services validate and orchestrate against the repositories.
//!
//! - [`accounts`] - signup and login
//! - [`catalog`] - item and bundle lifecycle
//! - [`menu`] - publishing, stock, withdrawal
//! - [`orders`] - placement, cancellation, completion

pub mod accounts;
pub mod catalog;
pub mod menu;
pub mod orders;
