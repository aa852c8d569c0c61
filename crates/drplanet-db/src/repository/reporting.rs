//! # Reporting Repository
//!
//! Dashboard revenue figures, recomputed from source records on every
//! request. No caching, no materialized rollups.
//!
//! ## Three Channels, Three Windows
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 window: today │ this month │ all time                  │
//! │                                                                         │
//! │   web    SUM(orders.total_paisa)        WHERE status != cancelled      │
//! │   pos    SUM(sales.total_paisa)         unconditional                  │
//! │   udhar  SUM(udhar_payments.amount_paisa) unconditional                │
//! │   ────────────────────────────────────                                 │
//! │   total  web + pos + udhar                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Window cutoffs are computed in shop-local time (midnight, first of
//! month) and converted to UTC before they hit SQL, so "today" matches
//! the calendar on the shop wall, not the server's UTC clock.

use chrono::{DateTime, Local, Utc};
use sqlx::SqlitePool;

use crate::error::DbResult;
use drplanet_core::window;
use drplanet_core::{Money, OrderStatus, RevenueBreakdown, RevenueReport};

/// Repository for dashboard aggregation queries.
#[derive(Debug, Clone)]
pub struct ReportingRepository {
    pool: SqlitePool,
}

impl ReportingRepository {
    /// Creates a new ReportingRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportingRepository { pool }
    }

    /// Builds the full three-window revenue report.
    pub async fn revenue_report(&self) -> DbResult<RevenueReport> {
        let now = Local::now();
        let today = window::start_of_day(&now).with_timezone(&Utc);
        let month = window::start_of_month(&now).with_timezone(&Utc);

        Ok(RevenueReport {
            today: self.revenue_since(Some(today)).await?,
            this_month: self.revenue_since(Some(month)).await?,
            all_time: self.revenue_since(None).await?,
        })
    }

    /// Sums all three channels from a UTC cutoff (None = all time).
    ///
    /// Each channel is one aggregate statement; a sale committed between
    /// statements can appear in one channel and not another, which is
    /// acceptable for a dashboard that refreshes on every load.
    pub async fn revenue_since(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> DbResult<RevenueBreakdown> {
        let web: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(total_paisa), 0) FROM orders \
             WHERE status != ?1 AND (?2 IS NULL OR created_at >= ?2)",
        )
        .bind(OrderStatus::Cancelled)
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        let pos: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(total_paisa), 0) FROM sales \
             WHERE (?1 IS NULL OR created_at >= ?1)",
        )
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        let udhar: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount_paisa), 0) FROM udhar_payments \
             WHERE (?1 IS NULL OR created_at >= ?1)",
        )
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        Ok(RevenueBreakdown {
            web: Money::from_paisa(web),
            pos: Money::from_paisa(pos),
            udhar: Money::from_paisa(udhar),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::order::{generate_order_id, generate_order_item_id};
    use crate::repository::product::generate_product_id;
    use crate::repository::sale::{NewSale, NewSaleItem};
    use chrono::Duration;
    use drplanet_core::pricing::SaleDiscount;
    use drplanet_core::{Order, OrderItem, PaymentMethod, PaymentStatus, Product};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_product(db: &Database, price: i64) -> Product {
        let now = Utc::now();
        let id = generate_product_id();
        let product = Product {
            id: id.clone(),
            sku: format!("CAP-{}", &id[..8]),
            barcode: None,
            name: "Surgical Cap".to_string(),
            description: None,
            category: Some("caps".to_string()),
            price_paisa: price,
            sale_price_paisa: None,
            stock: 100,
            variant_stock: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        db.products().insert(&product).await.unwrap();
        product
    }

    async fn seed_order(
        db: &Database,
        product_id: &str,
        status: OrderStatus,
        total: i64,
        created_at: DateTime<Utc>,
    ) {
        let order_id = generate_order_id();
        let order = Order {
            id: order_id.clone(),
            status,
            payment_status: PaymentStatus::Paid,
            subtotal_paisa: total,
            shipping_paisa: 0,
            total_paisa: total,
            customer_name: "Walk-in".to_string(),
            customer_email: None,
            shipping_address: None,
            created_at,
            updated_at: created_at,
        };
        let items = vec![OrderItem {
            id: generate_order_item_id(),
            order_id,
            product_id: product_id.to_string(),
            name_snapshot: "Surgical Cap".to_string(),
            unit_price_paisa: total,
            quantity: 1,
            size: None,
            color: None,
            line_total_paisa: total,
        }];
        db.orders().insert_with_items(&order, &items).await.unwrap();
    }

    async fn record_pos_sale(db: &Database, product: &Product, quantity: i64) {
        db.sales()
            .create_sale(NewSale {
                items: vec![NewSaleItem {
                    product_id: product.id.clone(),
                    quantity,
                    size: None,
                    color: None,
                }],
                discount: SaleDiscount::None,
                payment_method: PaymentMethod::Cash,
                amount_received: None,
                customer_name: None,
                customer_phone: None,
                notes: None,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_empty_db_reports_zero_everywhere() {
        let db = test_db().await;

        let report = db.reporting().revenue_report().await.unwrap();

        assert!(report.today.total().is_zero());
        assert!(report.this_month.total().is_zero());
        assert!(report.all_time.total().is_zero());
    }

    #[tokio::test]
    async fn test_three_channels_sum_independently() {
        let db = test_db().await;
        let product = seed_product(&db, 30_000).await;
        let now = Utc::now();

        seed_order(&db, &product.id, OrderStatus::Delivered, 120_000, now).await;
        record_pos_sale(&db, &product, 2).await;
        db.udhar()
            .record(None, Money::from_paisa(40_000), None)
            .await
            .unwrap();

        let breakdown = db.reporting().revenue_since(None).await.unwrap();

        assert_eq!(breakdown.web.paisa(), 120_000);
        assert_eq!(breakdown.pos.paisa(), 60_000);
        assert_eq!(breakdown.udhar.paisa(), 40_000);
        assert_eq!(breakdown.total().paisa(), 220_000);
    }

    #[tokio::test]
    async fn test_cancelled_orders_excluded_from_web_revenue() {
        let db = test_db().await;
        let product = seed_product(&db, 30_000).await;
        let now = Utc::now();

        seed_order(&db, &product.id, OrderStatus::Confirmed, 100_000, now).await;
        seed_order(&db, &product.id, OrderStatus::Cancelled, 999_000, now).await;

        let breakdown = db.reporting().revenue_since(None).await.unwrap();

        assert_eq!(breakdown.web.paisa(), 100_000);
        assert_eq!(breakdown.total().paisa(), 100_000);
    }

    #[tokio::test]
    async fn test_cutoff_excludes_older_records() {
        let db = test_db().await;
        let product = seed_product(&db, 30_000).await;
        let now = Utc::now();

        seed_order(
            &db,
            &product.id,
            OrderStatus::Delivered,
            70_000,
            now - Duration::days(40),
        )
        .await;
        seed_order(&db, &product.id, OrderStatus::Delivered, 50_000, now).await;

        let recent = db
            .reporting()
            .revenue_since(Some(now - Duration::days(1)))
            .await
            .unwrap();
        let all = db.reporting().revenue_since(None).await.unwrap();

        assert_eq!(recent.web.paisa(), 50_000);
        assert_eq!(all.web.paisa(), 120_000);
    }

    #[tokio::test]
    async fn test_full_report_windows_nest() {
        let db = test_db().await;
        let product = seed_product(&db, 30_000).await;

        record_pos_sale(&db, &product, 1).await;

        let report = db.reporting().revenue_report().await.unwrap();

        // A sale made right now is inside every window
        assert_eq!(report.today.pos.paisa(), 30_000);
        assert_eq!(report.this_month.pos.paisa(), 30_000);
        assert_eq!(report.all_time.pos.paisa(), 30_000);
        assert!(report.today.total() <= report.all_time.total());
    }
}
