//! # Order Repository
//!
//! Web-shop orders and their fulfillment lifecycle.
//!
//! ## Status Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  pending ──▶ confirmed ──▶ processing ──▶ shipped ──▶ delivered        │
//! │     │            │             │             │            (terminal)   │
//! │     │            │             │             │                          │
//! │     └────────────┴─────────────┴─────────────┴──▶ cancelled            │
//! │                                                    (terminal)           │
//! │                                                                         │
//! │  Forward moves advance exactly one step. Cancellation is allowed       │
//! │  from any non-terminal state. Nothing leaves a terminal state.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The transition rules live in `drplanet_core::OrderStatus`; this module
//! enforces them against the stored row before any UPDATE, inside a
//! transaction so two admins racing on the same order cannot both win.

use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use drplanet_core::{CoreError, Order, OrderItem, OrderStatus, ShippingAddress};

/// Raw row shape for orders. The shipping address is stored as a JSON
/// text blob and parsed on the way out.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: String,
    status: OrderStatus,
    payment_status: drplanet_core::PaymentStatus,
    subtotal_paisa: i64,
    shipping_paisa: i64,
    total_paisa: i64,
    customer_name: String,
    customer_email: Option<String>,
    shipping_address: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = DbError;

    fn try_from(row: OrderRow) -> DbResult<Order> {
        let shipping_address: Option<ShippingAddress> = row
            .shipping_address
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(|e| DbError::corrupt_column("Order", &row.id, "shipping_address", e))?;

        Ok(Order {
            id: row.id,
            status: row.status,
            payment_status: row.payment_status,
            subtotal_paisa: row.subtotal_paisa,
            shipping_paisa: row.shipping_paisa,
            total_paisa: row.total_paisa,
            customer_name: row.customer_name,
            customer_email: row.customer_email,
            shipping_address,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const ORDER_COLUMNS: &str = "id, status, payment_status, subtotal_paisa, shipping_paisa, \
                             total_paisa, customer_name, customer_email, shipping_address, \
                             created_at, updated_at";

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

    /// Inserts an order with its line items in one transaction.
    ///
    /// Checkout lives in the storefront; this is the persistence half,
    /// also used by the seed tool and tests.
    pub async fn insert_with_items(&self, order: &Order, items: &[OrderItem]) -> DbResult<()> {
        let shipping_json = order
            .shipping_address
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| DbError::corrupt_column("Order", &order.id, "shipping_address", e))?;

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO orders (\
                 id, status, payment_status, subtotal_paisa, shipping_paisa, total_paisa, \
                 customer_name, customer_email, shipping_address, created_at, updated_at\
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        )
        .bind(&order.id)
        .bind(order.status)
        .bind(order.payment_status)
        .bind(order.subtotal_paisa)
        .bind(order.shipping_paisa)
        .bind(order.total_paisa)
        .bind(&order.customer_name)
        .bind(&order.customer_email)
        .bind(shipping_json)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&mut *tx)
        .await?;

        for item in items {
            sqlx::query(
                "INSERT INTO order_items (\
                     id, order_id, product_id, name_snapshot, unit_price_paisa, \
                     quantity, size, color, line_total_paisa\
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )
            .bind(&item.id)
            .bind(&item.order_id)
            .bind(&item.product_id)
            .bind(&item.name_snapshot)
            .bind(item.unit_price_paisa)
            .bind(item.quantity)
            .bind(&item.size)
            .bind(&item.color)
            .bind(item.line_total_paisa)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        debug!(order_id = %order.id, items = items.len(), "Order inserted");
        Ok(())
    }

    /// Gets an order by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?1");

        let row = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Order::try_from).transpose()
    }

    /// Gets all line items for an order, in insertion order.
    pub async fn get_items(&self, order_id: &str) -> DbResult<Vec<OrderItem>> {
        let items = sqlx::query_as::<_, OrderItem>(
            "SELECT id, order_id, product_id, name_snapshot, unit_price_paisa, \
                    quantity, size, color, line_total_paisa \
             FROM order_items WHERE order_id = ?1 ORDER BY rowid",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Gets an order and its items in one call.
    pub async fn get_with_items(&self, id: &str) -> DbResult<Option<(Order, Vec<OrderItem>)>> {
        let Some(order) = self.get_by_id(id).await? else {
            return Ok(None);
        };
        let items = self.get_items(id).await?;
        Ok(Some((order, items)))
    }

    /// Lists orders, newest first, optionally filtered by status.
    pub async fn list(&self, status: Option<OrderStatus>, limit: u32) -> DbResult<Vec<Order>> {
        let sql = format!(
            "SELECT {ORDER_COLUMNS} FROM orders \
             WHERE (?1 IS NULL OR status = ?1) \
             ORDER BY created_at DESC LIMIT ?2"
        );

        let rows = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(status)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    /// Advances an order to a new status.
    ///
    /// ## What This Does
    /// 1. Reads the current status inside a transaction
    /// 2. Checks the transition against the lifecycle rules
    /// 3. Writes the new status and bumps `updated_at`
    ///
    /// ## Returns
    /// The order as stored after the update.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - No order with this ID
    /// * `DbError::InvalidTransition` - The lifecycle forbids this move
    pub async fn update_status(&self, id: &str, new_status: OrderStatus) -> DbResult<Order> {
        let now = chrono::Utc::now();

        let mut tx = self.pool.begin().await?;

        let current = fetch_status(&mut tx, id).await?;
        if !current.can_transition(new_status) {
            return Err(CoreError::InvalidStatusTransition {
                from: current,
                to: new_status,
            }
            .into());
        }

        sqlx::query("UPDATE orders SET status = ?2, updated_at = ?3 WHERE id = ?1")
            .bind(id)
            .bind(new_status)
            .bind(now)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        debug!(order_id = %id, from = %current, to = %new_status, "Order status updated");

        match self.get_by_id(id).await? {
            Some(order) => Ok(order),
            None => Err(DbError::not_found("Order", id)),
        }
    }

    /// Counts orders per status (back-office overview).
    pub async fn count_by_status(&self, status: OrderStatus) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE status = ?1")
            .bind(status)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

async fn fetch_status(tx: &mut Transaction<'_, Sqlite>, id: &str) -> DbResult<OrderStatus> {
    let status: Option<OrderStatus> =
        sqlx::query_scalar("SELECT status FROM orders WHERE id = ?1")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?;

    status.ok_or_else(|| DbError::not_found("Order", id))
}

/// Generates a new UUID for an order.
pub fn generate_order_id() -> String {
    Uuid::new_v4().to_string()
}

/// Generates a new UUID for an order line item.
pub fn generate_order_item_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
