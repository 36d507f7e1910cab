//! # Repository Module
//!
//! Database repository implementations for the Café OMS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  HTTP Handler                                                          │
//! │       │                                                                 │
//! │       │  db.menu().decrement_stock(&entry_id)                          │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  MenuRepository                                                        │
//! │  ├── list_current(&self)                                               │
//! │  ├── decrement_stock(&self, id)                                        │
//! │  ├── restock(&self, id)                                                │
//! │  └── set_stock(&self, id, count)                                       │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • SQL is isolated in one place                                        │
//! │  • Conditional updates encode the state guards once                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ItemRepository`] - Catalog item CRUD
//! - [`BundleRepository`] - Bundle CRUD with frozen item sets
//! - [`MenuRepository`] - Published menu, stock, and expiry purge
//! - [`OrderRepository`] - Orders and status transitions
//! - [`UserRepository`] - Accounts

pub mod bundle;
pub mod item;
pub mod menu;
pub mod order;
pub mod user;

pub use bundle::BundleRepository;
pub use item::ItemRepository;
pub use menu::MenuRepository;
pub use order::OrderRepository;
pub use user::UserRepository;
