//! HTTP handlers, one module per resource.
//!
//! Every handler follows the same shape: extract identity, check the
//! role gate, hand off to the matching service, translate the result
//! into a status code. Business rules never live here.

pub mod auth;
pub mod bundles;
pub mod items;
pub mod menu;
pub mod orders;
