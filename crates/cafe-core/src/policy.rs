//! # Access Policy Module
//!
//! Role-based capability checks for every protected operation.
//!
//! ## Capability Matrix
//! ```text
//! ┌───────────────────────────┬───────┬──────┬─────────┬────────┬──────────┐
//! │ Action                    │ Admin │ Chef │ Manager │ Waiter │ Customer │
//! ├───────────────────────────┼───────┼──────┼─────────┼────────┼──────────┤
//! │ ManageItems               │   ✓   │  ✓   │         │        │          │
//! │ StockItems (menu, items)  │   ✓   │  ✓   │         │        │          │
//! │ ManageBundles             │   ✓   │      │    ✓    │        │          │
//! │ StockBundles (menu)       │   ✓   │      │    ✓    │        │          │
//! │ CompleteOrder             │   ✓   │  ✓   │         │        │          │
//! │ ReadMenu                  │   ✓   │  ✓   │    ✓    │   ✓    │    ✓     │
//! │ PlaceOrder                │       │      │         │        │    ✓     │
//! └───────────────────────────┴───────┴──────┴─────────┴────────┴──────────┘
//! ```
//!
//! Policy is checked before any input validation runs, so a caller
//! without the capability never learns whether their payload was
//! otherwise well formed.

use crate::error::{CoreError, CoreResult};
use crate::types::UserRole;

/// A protected operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Create, update, or delete catalog items.
    ManageItems,
    /// Create, update, or delete catalog bundles.
    ManageBundles,
    /// Publish, restock, or withdraw item menu entries.
    StockItems,
    /// Publish, restock, or withdraw bundle menu entries.
    StockBundles,
    /// Read the published menu.
    ReadMenu,
    /// Place, view, or cancel own orders.
    PlaceOrder,
    /// Mark a preparing order as complete.
    CompleteOrder,
}

impl Action {
    fn describe(self) -> &'static str {
        match self {
            Action::ManageItems => "manage items",
            Action::ManageBundles => "manage bundles",
            Action::StockItems => "manage item menu entries",
            Action::StockBundles => "manage bundle menu entries",
            Action::ReadMenu => "read the menu",
            Action::PlaceOrder => "place orders",
            Action::CompleteOrder => "complete orders",
        }
    }
}

/// Returns true if `role` holds the capability for `action`.
pub fn is_allowed(role: UserRole, action: Action) -> bool {
    use Action::*;
    use UserRole::*;

    match action {
        ManageItems | StockItems | CompleteOrder => matches!(role, Admin | Chef),
        ManageBundles | StockBundles => matches!(role, Admin | Manager),
        ReadMenu => true,
        PlaceOrder => matches!(role, Customer),
    }
}

/// Checks the capability, returning `CoreError::Forbidden` on refusal.
pub fn authorize(role: UserRole, action: Action) -> CoreResult<()> {
    if is_allowed(role, action) {
        Ok(())
    } else {
        Err(CoreError::forbidden(format!(
            "{role} accounts may not {}",
            action.describe()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_capabilities() {
        assert!(is_allowed(UserRole::Admin, Action::ManageItems));
        assert!(is_allowed(UserRole::Chef, Action::ManageItems));
        assert!(!is_allowed(UserRole::Manager, Action::ManageItems));
        assert!(!is_allowed(UserRole::Waiter, Action::ManageItems));
        assert!(!is_allowed(UserRole::Customer, Action::ManageItems));
    }

    #[test]
    fn test_bundle_capabilities() {
        assert!(is_allowed(UserRole::Admin, Action::ManageBundles));
        assert!(is_allowed(UserRole::Manager, Action::ManageBundles));
        assert!(!is_allowed(UserRole::Chef, Action::ManageBundles));
        assert!(!is_allowed(UserRole::Customer, Action::StockBundles));
    }

    #[test]
    fn test_menu_read_open_to_all_roles() {
        for role in [
            UserRole::Admin,
            UserRole::Chef,
            UserRole::Manager,
            UserRole::Waiter,
            UserRole::Customer,
        ] {
            assert!(is_allowed(role, Action::ReadMenu));
        }
    }

    #[test]
    fn test_order_capabilities() {
        assert!(is_allowed(UserRole::Customer, Action::PlaceOrder));
        assert!(!is_allowed(UserRole::Admin, Action::PlaceOrder));
        assert!(!is_allowed(UserRole::Waiter, Action::PlaceOrder));

        assert!(is_allowed(UserRole::Chef, Action::CompleteOrder));
        assert!(is_allowed(UserRole::Admin, Action::CompleteOrder));
        assert!(!is_allowed(UserRole::Customer, Action::CompleteOrder));
    }

    #[test]
    fn test_authorize_reports_role_and_action() {
        let err = authorize(UserRole::Waiter, Action::PlaceOrder).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("waiter"));
        assert!(message.contains("place orders"));
    }
}
