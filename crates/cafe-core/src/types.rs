//! # Domain Types
//!
//! Core domain types for the Café OMS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌───────────────┐   ┌────────────────┐   ┌─────────────────┐      │
//! │  │     Item      │   │     Bundle     │   │    MenuEntry    │      │
//! │  │ ───────────── │   │ ────────────── │   │ ─────────────── │      │
//! │  │ id (UUID)     │   │ id (UUID)      │   │ id (UUID)       │      │
//! │  │ item_name     │──►│ items (frozen) │──►│ product (union) │      │
//! │  │ price_cents   │   │ discount       │   │ availability    │      │
//! │  └───────────────┘   │ price_after    │   │ stock_count     │      │
//! │                      └────────────────┘   └────────┬────────┘      │
//! │                                                    │ frozen copy   │
//! │  ┌───────────────┐   ┌────────────────┐   ┌────────▼────────┐      │
//! │  │     User      │   │  OrderStatus   │   │      Order      │      │
//! │  │ ───────────── │   │ ────────────── │   │ ─────────────── │      │
//! │  │ username      │   │ Preparing      │   │ customer_id     │      │
//! │  │ user_type     │   │ Complete       │   │ ordered_items   │      │
//! │  └───────────────┘   │ Cancelled      │   │ total_cents     │      │
//! │                      └────────────────┘   └─────────────────┘      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Bundles embed copies of their Items, menu entries embed copies of
//! their Item or Bundle, and orders embed copies of their menu entries.
//! Changing a catalog record later never retroactively changes a
//! published menu entry or a past order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Money;

// =============================================================================
// Item
// =============================================================================

/// Category of an atomic product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Coffee,
    Cake,
    Tea,
    Bakery,
    CannedSoda,
    Water,
    RefreshingDrink,
}

/// An atomic purchasable product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier (UUID v4).
    pub id: String,

    pub item_type: ItemType,

    /// Display name, unique across non-deleted items.
    pub item_name: String,

    /// Price in cents.
    pub price_cents: i64,

    pub description: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Returns the price as a Money value.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Bundle
// =============================================================================

/// A named, discounted, fixed collection of at least two items.
///
/// The item set is frozen at creation: `items` holds value copies of
/// the constituent items, and `item_set_key` is their canonical sorted
/// id list (two bundles must never share the exact same set). The name
/// is immutable after creation; renaming means creating a new bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name, unique and immutable.
    pub bundle_name: String,

    /// Frozen copies of the constituent items (>= 2).
    pub items: Vec<Item>,

    /// Sum of constituent item prices, in cents.
    pub price_before_cents: i64,

    /// Discount percentage (1..=100).
    pub discount: i64,

    /// Derived: `price_before * (1 - discount/100)`, in cents.
    pub price_after_cents: i64,

    pub limited_edition: bool,

    /// Required and in the future iff `limited_edition`.
    pub expires_on: Option<DateTime<Utc>>,

    pub description: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Bundle {
    /// Computes `(price_before, price_after)` for a set of constituent
    /// items at the given discount percentage.
    pub fn derive_prices(items: &[Item], discount: i64) -> (Money, Money) {
        let before: Money = items.iter().map(Item::price).sum();
        (before, before.apply_discount(discount))
    }

    /// Canonical key identifying an exact item set, independent of the
    /// order item ids were supplied in.
    pub fn item_set_key(item_ids: &[String]) -> String {
        let mut ids: Vec<&str> = item_ids.iter().map(String::as_str).collect();
        ids.sort_unstable();
        ids.dedup();
        ids.join(",")
    }

    /// Returns the discounted price as a Money value.
    #[inline]
    pub fn price_after(&self) -> Money {
        Money::from_cents(self.price_after_cents)
    }

    /// Whether this bundle has expired relative to `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_on, Some(expiry) if expiry < now)
    }
}

// =============================================================================
// Menu Entry
// =============================================================================

/// Discriminant for the two shapes a menu entry can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum MenuEntryKind {
    Item,
    Bundle,
}

impl fmt::Display for MenuEntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuEntryKind::Item => write!(f, "item"),
            MenuEntryKind::Bundle => write!(f, "bundle"),
        }
    }
}

/// The embedded product of a menu entry: one entity, two shapes,
/// dispatched by kind. Matched exhaustively wherever price or identity
/// is read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "product", rename_all = "lowercase")]
pub enum MenuProduct {
    Item(Item),
    Bundle(Bundle),
}

impl MenuProduct {
    /// Id of the underlying catalog record.
    pub fn product_id(&self) -> &str {
        match self {
            MenuProduct::Item(item) => &item.id,
            MenuProduct::Bundle(bundle) => &bundle.id,
        }
    }

    /// The price a customer pays for one unit of this product.
    pub fn effective_price(&self) -> Money {
        match self {
            MenuProduct::Item(item) => item.price(),
            MenuProduct::Bundle(bundle) => bundle.price_after(),
        }
    }

    pub fn kind(&self) -> MenuEntryKind {
        match self {
            MenuProduct::Item(_) => MenuEntryKind::Item,
            MenuProduct::Bundle(_) => MenuEntryKind::Bundle,
        }
    }

    /// Expiry of the embedded bundle snapshot, if any. Items never
    /// expire.
    pub fn expires_on(&self) -> Option<DateTime<Utc>> {
        match self {
            MenuProduct::Item(_) => None,
            MenuProduct::Bundle(bundle) => bundle.expires_on,
        }
    }
}

/// One row of the published menu: a product snapshot plus live stock.
///
/// Invariant: `availability == (stock_count > 0)` holds after every
/// stock mutation. The one documented exception is the
/// cancellation-triggered restore, which forces `availability = true`
/// unconditionally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuEntry {
    /// Unique identifier (UUID v4). Orders reference this id.
    pub id: String,

    #[serde(flatten)]
    pub product: MenuProduct,

    pub availability: bool,

    /// Units in stock; zero means out of stock.
    pub stock_count: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MenuEntry {
    /// The price a customer pays for one unit of this entry.
    #[inline]
    pub fn effective_price(&self) -> Money {
        self.product.effective_price()
    }

    #[inline]
    pub fn kind(&self) -> MenuEntryKind {
        self.product.kind()
    }

    /// Id of the underlying item or bundle.
    #[inline]
    pub fn product_id(&self) -> &str {
        self.product.product_id()
    }
}

// =============================================================================
// Order
// =============================================================================

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Instapay,
}

/// The order state machine.
///
/// ```text
///   PREPARING ──► COMPLETE
///       │
///       └───────► CANCELLED
/// ```
///
/// Both `Complete` and `Cancelled` are terminal; there is no
/// transition out of either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Preparing,
    Complete,
    Cancelled,
}

impl OrderStatus {
    /// Whether the order can still change state.
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, OrderStatus::Preparing)
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Preparing
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Preparing => write!(f, "Preparing"),
            OrderStatus::Complete => write!(f, "Complete"),
            OrderStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// A customer's purchase record.
///
/// `ordered_items` holds value copies of the menu entries at order
/// time; once created, only `status` is mutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Owning customer; immutable, never re-derived from the store.
    pub customer_id: String,

    /// Creation timestamp.
    pub date: DateTime<Utc>,

    /// Frozen copies of the ordered menu entries.
    pub ordered_items: Vec<MenuEntry>,

    /// Sum of the effective price of each ordered entry, in cents.
    pub total_cents: i64,

    pub comment: Option<String>,

    pub payment_method: PaymentMethod,

    pub status: OrderStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Returns the total as a Money value.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// User
// =============================================================================

/// Staff and customer roles. Determines operation access via the
/// policy table in [`crate::policy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Chef,
    Manager,
    Waiter,
    Customer,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Admin => write!(f, "admin"),
            UserRole::Chef => write!(f, "chef"),
            UserRole::Manager => write!(f, "manager"),
            UserRole::Waiter => write!(f, "waiter"),
            UserRole::Customer => write!(f, "customer"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Login name, unique.
    pub username: String,

    /// Argon2 hash; never serialized to clients.
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub user_type: UserRole,

    pub first_name: String,
    pub last_name: String,

    /// Unique, stored lowercase.
    pub email: String,

    pub gender: Gender,

    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================
