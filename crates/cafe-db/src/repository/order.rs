//! # Order Repository
//!
//! Database operations for orders.
//!
//! ## State Guard Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                Conditional Status Transition                            │
//! │                                                                         │
//! │  UPDATE orders SET status = 'cancelled'                                 │
//! │  WHERE id = ? AND customer_id = ? AND status = 'preparing'              │
//! │                                                                         │
//! │  rows_affected == 1  → transition happened                              │
//! │  rows_affected == 0  → wrong owner, missing, or already terminal        │
//! │                                                                         │
//! │  The caller re-reads the row to tell those cases apart. Either way     │
//! │  a rejected transition has had ZERO side effects; the check is the     │
//! │  update.                                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use cafe_core::{MenuEntry, Order, OrderStatus, PaymentMethod};

/// Raw order row; `ordered_items` holds the JSON-encoded entry
/// snapshots.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: String,
    customer_id: String,
    date: DateTime<Utc>,
    ordered_items: String,
    total_cents: i64,
    comment: Option<String>,
    payment_method: PaymentMethod,
    status: OrderStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_domain(self) -> DbResult<Order> {
        let ordered_items: Vec<MenuEntry> = serde_json::from_str(&self.ordered_items)?;
        Ok(Order {
            id: self.id,
            customer_id: self.customer_id,
            date: self.date,
            ordered_items,
            total_cents: self.total_cents,
            comment: self.comment,
            payment_method: self.payment_method,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const ORDER_COLUMNS: &str = "id, customer_id, date, ordered_items, total_cents, comment, \
     payment_method, status, created_at, updated_at";

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Inserts a new order.
    pub async fn insert(&self, order: &Order) -> DbResult<()> {
        debug!(id = %order.id, customer_id = %order.customer_id, "Inserting order");

        let items_json = serde_json::to_string(&order.ordered_items)?;

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, customer_id, date, ordered_items, total_cents,
                comment, payment_method, status, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&order.id)
        .bind(&order.customer_id)
        .bind(order.date)
        .bind(items_json)
        .bind(order.total_cents)
        .bind(&order.comment)
        .bind(order.payment_method)
        .bind(order.status)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets an order by its ID, regardless of owner.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(OrderRow::into_domain).transpose()
    }

    /// Gets an order owned by a specific customer.
    ///
    /// An order belonging to someone else comes back as `None`, which
    /// the caller surfaces as not-found rather than forbidden so that
    /// order ids are not probeable.
    pub async fn get_for_customer(
        &self,
        order_id: &str,
        customer_id: &str,
    ) -> DbResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?1 AND customer_id = ?2"
        ))
        .bind(order_id)
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(OrderRow::into_domain).transpose()
    }

    /// Cancels an order iff it is owned by the customer and still
    /// preparing. The check and the write are one statement.
    ///
    /// ## Returns
    /// * `Ok(true)` - cancelled
    /// * `Ok(false)` - missing, wrong owner, or already terminal
    pub async fn cancel_if_preparing(
        &self,
        order_id: &str,
        customer_id: &str,
    ) -> DbResult<bool> {
        debug!(order_id = %order_id, "Cancelling order");

        let result = sqlx::query(
            r#"
            UPDATE orders
            SET status = 'cancelled', updated_at = ?3
            WHERE id = ?1 AND customer_id = ?2 AND status = 'preparing'
            "#,
        )
        .bind(order_id)
        .bind(customer_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Marks an order complete iff it is still preparing.
    ///
    /// ## Returns
    /// * `Ok(true)` - completed
    /// * `Ok(false)` - missing or already terminal
    pub async fn complete_if_preparing(&self, order_id: &str) -> DbResult<bool> {
        debug!(order_id = %order_id, "Completing order");

        let result = sqlx::query(
            r#"
            UPDATE orders
            SET status = 'complete', updated_at = ?2
            WHERE id = ?1 AND status = 'preparing'
            "#,
        )
        .bind(order_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
