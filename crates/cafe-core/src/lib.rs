//! # cafe-core: Pure Business Logic for the Café OMS
//!
//! This crate is the **heart** of the café order-management system. It
//! contains all business rules as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Café OMS Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP API (axum)                              │   │
//! │  │    /signup /login ──► /items /bundles ──► /menu ──► /orders    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ cafe-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  policy   │  │ validation│  │   │
//! │  │   │   Item    │  │   Money   │  │  Action   │  │   rules   │  │   │
//! │  │   │  Bundle   │  │ discounts │  │ authorize │  │  checks   │  │   │
//! │  │   │ MenuEntry │  │           │  │           │  │           │  │   │
//! │  │   │   Order   │  │           │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    cafe-db (Database Layer)                     │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, Bundle, MenuEntry, Order, User)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//! - [`policy`] - Role-based capability checks
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//! 5. **Snapshots Over Joins**: Bundles copy their items, menu entries copy
//!    their product, orders copy their menu entries. Later catalog edits
//!    never rewrite history.
//!
//! ## Example Usage
//!
//! ```rust
//! use cafe_core::money::Money;
//! use cafe_core::types::Bundle;
//!
//! // Two items worth 70 and 50 units at a 10% bundle discount
//! let before = Money::from_units(70) + Money::from_units(50);
//! let after = before.apply_discount(10);
//!
//! assert_eq!(before.cents(), 12_000);
//! assert_eq!(after.cents(), 10_800);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod policy;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use cafe_core::Money` instead of
// `use cafe_core::money::Money`

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use policy::{authorize, is_allowed, Action};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Item price bounds in cents (1 to 200 currency units).
pub const ITEM_PRICE_MIN_CENTS: i64 = 100;
pub const ITEM_PRICE_MAX_CENTS: i64 = 20_000;

/// Bundle price bounds in cents (1 to 1000 currency units), applied to
/// both the pre-discount sum and the derived discounted price.
pub const BUNDLE_PRICE_MIN_CENTS: i64 = 100;
pub const BUNDLE_PRICE_MAX_CENTS: i64 = 100_000;

/// Bundle discount percentage bounds.
pub const DISCOUNT_MIN: i64 = 1;
pub const DISCOUNT_MAX: i64 = 100;

/// Minimum number of constituent items in a bundle.
pub const MIN_BUNDLE_ITEMS: usize = 2;

/// Display name length bounds for items and bundles.
pub const NAME_MIN: usize = 3;
pub const NAME_MAX: usize = 40;

/// Description length bounds.
pub const DESCRIPTION_MIN: usize = 3;
pub const DESCRIPTION_MAX: usize = 200;
