//! # Error Types
//!
//! Domain-specific error types for cafe-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Error Types                                │
//! │                                                                     │
//! │  cafe-core errors (this file)                                       │
//! │  ├── CoreError        - Business rule violations                    │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  cafe-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                 │
//! │                                                                     │
//! │  API errors (in app)                                                │
//! │  └── ApiError         - HTTP status + message sent to clients       │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → ApiError → HTTP response       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (names, ids, current status)
//! 3. Errors are enum variants, never String
//! 4. Every business-rule violation is raised at the point of
//!    detection; only the HTTP boundary formats it into a response

use thiserror::Error;

use crate::types::OrderStatus;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations and domain logic failures.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("No such item with this ID: {0}")]
    ItemNotFound(String),

    #[error("No bundle exists with this ID: {0}")]
    BundleNotFound(String),

    #[error("No menu entry found for this ID: {0}")]
    MenuEntryNotFound(String),

    /// Also raised when an order exists but belongs to another
    /// customer, so cancellation never leaks others' orders.
    #[error("No such order with this ID: {0}")]
    OrderNotFound(String),

    /// Role lacks the capability for the attempted operation.
    #[error("{0}")]
    Forbidden(String),

    /// The requested ids resolved to nothing purchasable.
    #[error("The ordered items are not in the menu or are all out of stock")]
    NothingToOrder,

    /// Transition attempted out of a terminal state.
    #[error("Order {order_id} is {current_status}, cannot perform this operation")]
    InvalidOrderStatus {
        order_id: String,
        current_status: OrderStatus,
    },

    /// A write that would change nothing.
    #[error("{entity} was not updated")]
    NoOpUpdate { entity: &'static str },

    /// A stock decrement found no stock left. Under concurrent order
    /// creation this is the losing side of the race.
    #[error("Stock update failed for menu entry {menu_id}")]
    StockConflict { menu_id: String },

    /// Validation error (wraps ValidationError).
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates a Forbidden error with a user-facing reason.
    pub fn forbidden(message: impl Into<String>) -> Self {
        CoreError::Forbidden(message.into())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors, raised before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Numeric value outside its allowed range. Bounds are in the
    /// field's own unit (cents for prices, percent for discounts).
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },

    #[error("{field} must not be negative")]
    Negative { field: &'static str },

    /// Invalid format (invalid UUID, malformed email, weak password).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: &'static str, reason: String },

    /// A date that must lie in the future does not.
    #[error("{field} must be a future date")]
    NotInFuture { field: &'static str },

    /// Uniqueness violation (name, email, exact item set).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: &'static str, value: String },

    /// A collection with too few members.
    #[error("{field} must contain at least {min} entries")]
    TooFew { field: &'static str, min: usize },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Convenience alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
