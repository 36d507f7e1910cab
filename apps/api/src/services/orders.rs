//! Order service: placement, viewing, cancellation, completion.
//!
//! ## Placement Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  place_order                                                        │
//! │                                                                     │
//! │  requested menu ids                                                 │
//! │       │  resolve against menu                                       │
//! │       ▼                                                             │
//! │  drop entries with availability == false   (silent filter)          │
//! │       │                                                             │
//! │       ├── nothing left ──► 400, nothing persisted                   │
//! │       ▼                                                             │
//! │  total = Σ effective price (item price / bundle discounted price)   │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  persist order (Preparing, snapshot of entries)                     │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  decrement stock by 1 per distinct entry  (conditional UPDATE)      │
//! │       │                                                             │
//! │       └── any decrement fails ──► 500; order id + menu ids are      │
//! │           logged for reconciliation, no automatic compensation      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, error, info};
use uuid::Uuid;

use cafe_core::{CoreError, Order, OrderStatus, PaymentMethod};
use cafe_db::Database;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    /// Menu entry ids the customer wants, one unit each.
    pub ordered_items: Vec<String>,
    pub payment_method: PaymentMethod,
    pub comment: Option<String>,
}

/// Places an order for the authenticated customer.
pub async fn place_order(
    db: &Database,
    customer_id: &str,
    payload: NewOrder,
) -> Result<Order, ApiError> {
    let mut ids = payload.ordered_items.clone();
    ids.sort_unstable();
    ids.dedup();

    let entries = db.menu().find_many(&ids).await?;

    // Unknown ids and out-of-stock entries are dropped silently; the
    // order covers whatever remains orderable.
    let retained: Vec<_> = entries.into_iter().filter(|e| e.availability).collect();
    if retained.is_empty() {
        return Err(CoreError::NothingToOrder.into());
    }

    let total: i64 = retained
        .iter()
        .map(|entry| entry.effective_price().cents())
        .sum();

    let now = Utc::now();
    let order = Order {
        id: Uuid::new_v4().to_string(),
        customer_id: customer_id.to_string(),
        date: now,
        ordered_items: retained,
        total_cents: total,
        comment: payload.comment,
        payment_method: payload.payment_method,
        status: OrderStatus::Preparing,
        created_at: now,
        updated_at: now,
    };

    db.orders().insert(&order).await?;

    // One unit per distinct retained entry. The order is already
    // persisted; a failed decrement here leaves it standing and is
    // surfaced as a 500 with enough context logged to reconcile by
    // hand.
    for entry in &order.ordered_items {
        let decremented = db.menu().decrement_stock(&entry.id).await?;
        if !decremented {
            let menu_ids: Vec<&str> = order.ordered_items.iter().map(|e| e.id.as_str()).collect();
            error!(
                order_id = %order.id,
                menu_id = %entry.id,
                menu_ids = ?menu_ids,
                "Stock decrement failed after order was persisted"
            );
            return Err(CoreError::StockConflict {
                menu_id: entry.id.clone(),
            }
            .into());
        }
    }

    info!(
        order_id = %order.id,
        customer_id = %customer_id,
        total_cents = order.total_cents,
        "Order placed"
    );
    Ok(order)
}

/// Fetches an order for the authenticated customer.
///
/// Someone else's order is a 403; a missing one is a 404.
pub async fn view_order(db: &Database, customer_id: &str, order_id: &str) -> Result<Order, ApiError> {
    let order = db
        .orders()
        .get_by_id(order_id)
        .await?
        .ok_or_else(|| CoreError::OrderNotFound(order_id.to_string()))?;

    if order.customer_id != customer_id {
        return Err(ApiError::forbidden("This order belongs to another customer"));
    }

    Ok(order)
}

/// Cancels the customer's own preparing order and restores stock.
///
/// A mismatched (order, customer) pair is reported as not-found, so
/// order ids are not probeable. A terminal order is rejected with the
/// current status named and zero side effects.
pub async fn cancel_order(db: &Database, customer_id: &str, order_id: &str) -> Result<(), ApiError> {
    let order = db
        .orders()
        .get_for_customer(order_id, customer_id)
        .await?
        .ok_or_else(|| CoreError::OrderNotFound(order_id.to_string()))?;

    // The check is the update: if the order went terminal between the
    // fetch and here, the guard refuses and nothing has been touched.
    let cancelled = db.orders().cancel_if_preparing(order_id, customer_id).await?;
    if !cancelled {
        let current = db
            .orders()
            .get_for_customer(order_id, customer_id)
            .await?
            .map(|o| o.status)
            .unwrap_or(order.status);
        return Err(CoreError::InvalidOrderStatus {
            order_id: order_id.to_string(),
            current_status: current,
        }
        .into());
    }

    // Best-effort restock per originally ordered entry; entries that
    // left the menu since the order are skipped.
    for entry in &order.ordered_items {
        let restocked = db.menu().restock(&entry.id).await?;
        if !restocked {
            debug!(
                order_id = %order_id,
                menu_id = %entry.id,
                "Skipping restock, entry no longer on the menu"
            );
        }
    }

    info!(order_id = %order_id, customer_id = %customer_id, "Order cancelled");
    Ok(())
}

/// Marks a preparing order complete. No stock side effects.
pub async fn complete_order(db: &Database, order_id: &str) -> Result<(), ApiError> {
    let completed = db.orders().complete_if_preparing(order_id).await?;
    if completed {
        info!(order_id = %order_id, "Order completed");
        return Ok(());
    }

    let order = db
        .orders()
        .get_by_id(order_id)
        .await?
        .ok_or_else(|| CoreError::OrderNotFound(order_id.to_string()))?;

    Err(CoreError::InvalidOrderStatus {
        order_id: order_id.to_string(),
        current_status: order.status,
    }
    .into())
}
