//! # Validation Module
//!
//! Input validation rules for the Café OMS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Validation Layers                             │
//! │                                                                     │
//! │  Layer 1: Deserialization (serde)                                   │
//! │  ├── Enum membership (item types, payment methods, roles)           │
//! │  └── Field presence and basic shape                                 │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE - business rule validation                    │
//! │  ├── Ranges, lengths, uniqueness preconditions                      │
//! │  └── Conditional rules (expiry iff limited edition)                 │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 3: Database (SQLite)                                         │
//! │  ├── UNIQUE constraints (names, emails, item sets)                  │
//! │  └── CHECK constraint (stock_count >= 0)                            │
//! │                                                                     │
//! │  Defense in depth: multiple layers catch different mistakes         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::{
    BUNDLE_PRICE_MAX_CENTS, BUNDLE_PRICE_MIN_CENTS, DESCRIPTION_MAX, DESCRIPTION_MIN,
    DISCOUNT_MAX, DISCOUNT_MIN, ITEM_PRICE_MAX_CENTS, ITEM_PRICE_MIN_CENTS, MIN_BUNDLE_ITEMS,
    NAME_MAX, NAME_MIN,
};

// =============================================================================
// Catalog Validators
// =============================================================================

/// Validates an item or bundle display name (3-40 characters).
pub fn validate_name(field: &'static str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required { field });
    }
    if name.chars().count() < NAME_MIN {
        return Err(ValidationError::TooShort {
            field,
            min: NAME_MIN,
        });
    }
    if name.chars().count() > NAME_MAX {
        return Err(ValidationError::TooLong {
            field,
            max: NAME_MAX,
        });
    }

    Ok(())
}

/// Validates a description (3-200 characters).
pub fn validate_description(description: &str) -> ValidationResult<()> {
    let description = description.trim();

    if description.chars().count() < DESCRIPTION_MIN {
        return Err(ValidationError::TooShort {
            field: "description",
            min: DESCRIPTION_MIN,
        });
    }
    if description.chars().count() > DESCRIPTION_MAX {
        return Err(ValidationError::TooLong {
            field: "description",
            max: DESCRIPTION_MAX,
        });
    }

    Ok(())
}

/// Validates an item price: 1-200 currency units.
pub fn validate_item_price(price: Money) -> ValidationResult<()> {
    if price.cents() < ITEM_PRICE_MIN_CENTS || price.cents() > ITEM_PRICE_MAX_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "price",
            min: ITEM_PRICE_MIN_CENTS,
            max: ITEM_PRICE_MAX_CENTS,
        });
    }

    Ok(())
}

/// Validates a bundle discount percentage (1-100).
pub fn validate_discount(discount: i64) -> ValidationResult<()> {
    if !(DISCOUNT_MIN..=DISCOUNT_MAX).contains(&discount) {
        return Err(ValidationError::OutOfRange {
            field: "discount",
            min: DISCOUNT_MIN,
            max: DISCOUNT_MAX,
        });
    }

    Ok(())
}

/// Validates both bundle prices: 1-1000 currency units each.
///
/// The derived discounted price is validated too, so a 100% discount
/// (price 0) is rejected the same way the pre-discount sum is.
pub fn validate_bundle_prices(before: Money, after: Money) -> ValidationResult<()> {
    for (field, price) in [
        ("priceBeforeDiscount", before),
        ("priceAfterDiscount", after),
    ] {
        if price.cents() < BUNDLE_PRICE_MIN_CENTS || price.cents() > BUNDLE_PRICE_MAX_CENTS {
            return Err(ValidationError::OutOfRange {
                field,
                min: BUNDLE_PRICE_MIN_CENTS,
                max: BUNDLE_PRICE_MAX_CENTS,
            });
        }
    }

    Ok(())
}

/// Validates the constituent item count of a bundle (>= 2, after the
/// supplied ids were resolved against the catalog).
pub fn validate_bundle_items(resolved: usize) -> ValidationResult<()> {
    if resolved < MIN_BUNDLE_ITEMS {
        return Err(ValidationError::TooFew {
            field: "items",
            min: MIN_BUNDLE_ITEMS,
        });
    }

    Ok(())
}

/// Validates the limited-edition expiry rule.
///
/// `expires_on` is required and must be a future date iff the bundle
/// is limited edition; a non-limited bundle must not carry one.
pub fn validate_bundle_schedule(
    limited_edition: bool,
    expires_on: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> ValidationResult<()> {
    match (limited_edition, expires_on) {
        (true, None) => Err(ValidationError::Required { field: "expiresOn" }),
        (true, Some(expiry)) if expiry <= now => {
            Err(ValidationError::NotInFuture { field: "expiresOn" })
        }
        (false, Some(_)) => Err(ValidationError::InvalidFormat {
            field: "expiresOn",
            reason: "only limited edition bundles expire".to_string(),
        }),
        _ => Ok(()),
    }
}

// =============================================================================
// Menu Validators
// =============================================================================

/// Validates a stock count (>= 0; zero means out of stock).
pub fn validate_stock_count(stock_count: i64) -> ValidationResult<()> {
    if stock_count < 0 {
        return Err(ValidationError::Negative {
            field: "stockCount",
        });
    }

    Ok(())
}

// =============================================================================
// Identifier Validators
// =============================================================================

/// Validates a UUID string.
pub fn validate_uuid(field: &'static str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required { field });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field,
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Account Validators
// =============================================================================

/// Validates a username (6-100 characters).
pub fn validate_username(username: &str) -> ValidationResult<()> {
    let username = username.trim();

    if username.is_empty() {
        return Err(ValidationError::Required { field: "username" });
    }
    if username.chars().count() < 6 {
        return Err(ValidationError::TooShort {
            field: "username",
            min: 6,
        });
    }
    if username.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "username",
            max: 100,
        });
    }

    Ok(())
}

/// Validates a password: 6-100 characters with at least one lowercase
/// letter, one uppercase letter, and one digit; no whitespace.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required { field: "password" });
    }
    if password.chars().count() < 6 {
        return Err(ValidationError::TooShort {
            field: "password",
            min: 6,
        });
    }
    if password.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "password",
            max: 100,
        });
    }
    if password.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "password",
            reason: "must not contain whitespace".to_string(),
        });
    }

    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !(has_lower && has_upper && has_digit) {
        return Err(ValidationError::InvalidFormat {
            field: "password",
            reason: "must contain a lowercase letter, an uppercase letter, and a digit"
                .to_string(),
        });
    }

    Ok(())
}

/// Validates a first or last name (2-100 characters).
pub fn validate_person_name(field: &'static str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required { field });
    }
    if name.chars().count() < 2 {
        return Err(ValidationError::TooShort { field, min: 2 });
    }
    if name.chars().count() > 100 {
        return Err(ValidationError::TooLong { field, max: 100 });
    }

    Ok(())
}

/// Validates an email address shape: `local@domain.tld`.
///
/// Deliberately loose; deliverability is not our problem, obviously
/// broken input is.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required { field: "email" });
    }

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "email",
            reason: "must be a valid email address".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
