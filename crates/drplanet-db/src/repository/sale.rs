//! # Sale Repository
//!
//! POS checkout: pricing, stock decrement, receipt numbering, and the
//! sale/sale_items rows, all inside one transaction.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       create_sale()                                     │
//! │                                                                         │
//! │  BEGIN TRANSACTION                                                      │
//! │       │                                                                 │
//! │       ├── 1. Resolve every product (any miss → rollback, NotFound)     │
//! │       │                                                                 │
//! │       ├── 2. Price lines (salePrice else price, discount, total)       │
//! │       │                                                                 │
//! │       ├── 3. Claim receipt number (atomic per-day counter upsert)      │
//! │       │                                                                 │
//! │       ├── 4. INSERT sale + sale_items (snapshot pattern)               │
//! │       │                                                                 │
//! │       ├── 5. Decrement stock per line, floored at zero                 │
//! │       │      ├── size+color on a variant product → matrix cell,        │
//! │       │      │   then stock := sum of cells                            │
//! │       │      └── otherwise → stock := MAX(0, stock - qty)              │
//! │       │                                                                 │
//! │  COMMIT (or rollback on any error - no partial sales, ever)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Receipt Numbers
//! `POS-YYYYMMDD-NNNN`, daily-sequential in shop-local time. The sequence
//! comes from an upsert on `receipt_counters` that increments and returns
//! in one statement, so concurrent checkouts can never claim the same
//! number. The UNIQUE index on `sales.receipt_number` is the backstop.

use chrono::{DateTime, Local, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::repository::product::{ProductRow, PRODUCT_COLUMNS};
use drplanet_core::pricing::{self, LineRequest, SaleDiscount};
use drplanet_core::window;
use drplanet_core::{Money, PaymentMethod, Product, Sale, SaleItem, VariantMatrix, RECEIPT_PREFIX};

// =============================================================================
// Inputs
// =============================================================================

/// One requested checkout line, by product reference.
#[derive(Debug, Clone)]
pub struct NewSaleItem {
    pub product_id: String,
    pub quantity: i64,
    pub size: Option<String>,
    pub color: Option<String>,
}

/// Everything needed to record a checkout.
///
/// The HTTP layer validates field lengths and ranges before building this;
/// the repository assumes the shape is sane and owns the transactional
/// work.
#[derive(Debug)]
pub struct NewSale {
    pub items: Vec<NewSaleItem>,
    pub discount: SaleDiscount,
    pub payment_method: PaymentMethod,
    pub amount_received: Option<Money>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub notes: Option<String>,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Records a checkout atomically.
    ///
    /// ## What This Does
    /// 1. Resolves every product; a missing product fails the whole sale
    /// 2. Prices the lines and the requested discount
    /// 3. Claims the next daily receipt number
    /// 4. Inserts the sale and its line items
    /// 5. Decrements stock for each line, floored at zero
    ///
    /// All of it commits together or not at all.
    ///
    /// ## Returns
    /// The persisted sale with its line items.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - A line references a product that doesn't exist
    /// * `DbError::UniqueViolation` - Receipt number collision (backstop)
    pub async fn create_sale(&self, new_sale: NewSale) -> DbResult<(Sale, Vec<SaleItem>)> {
        let sale_id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;

        // Resolve products up front. Any miss aborts before we write.
        let mut products = Vec::with_capacity(new_sale.items.len());
        for item in &new_sale.items {
            let product = fetch_product(&mut tx, &item.product_id).await?;
            products.push(product);
        }

        let line_requests: Vec<LineRequest<'_>> = new_sale
            .items
            .iter()
            .zip(products.iter())
            .map(|(item, product)| LineRequest {
                product,
                quantity: item.quantity,
                size: item.size.as_deref(),
                color: item.color.as_deref(),
            })
            .collect();

        let priced = pricing::price_sale(&line_requests, new_sale.discount);

        // Shop-local day code: the receipt sequence resets at local
        // midnight, matching what the cashier sees on the wall clock.
        let day = window::day_stamp(&Local::now());
        let seq = next_receipt_seq(&mut tx, &day).await?;
        let receipt_number = format!("{RECEIPT_PREFIX}-{day}-{seq:04}");

        debug!(
            sale_id = %sale_id,
            receipt_number = %receipt_number,
            lines = priced.lines.len(),
            total_paisa = priced.total.paisa(),
            "Recording sale"
        );

        let change = new_sale
            .amount_received
            .map(|received| pricing::change_due(priced.total, received));

        let sale = Sale {
            id: sale_id.clone(),
            receipt_number,
            subtotal_paisa: priced.subtotal.paisa(),
            discount_paisa: priced.discount.paisa(),
            discount_type: new_sale.discount.discount_type(),
            total_paisa: priced.total.paisa(),
            payment_method: new_sale.payment_method,
            amount_received_paisa: new_sale.amount_received.map(|m| m.paisa()),
            change_paisa: change.map(|m| m.paisa()),
            customer_name: new_sale.customer_name,
            customer_phone: new_sale.customer_phone,
            notes: new_sale.notes,
            created_at: now,
        };

        sqlx::query(
            "INSERT INTO sales (\
                 id, receipt_number, subtotal_paisa, discount_paisa, discount_type, \
                 total_paisa, payment_method, amount_received_paisa, change_paisa, \
                 customer_name, customer_phone, notes, created_at\
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        )
        .bind(&sale.id)
        .bind(&sale.receipt_number)
        .bind(sale.subtotal_paisa)
        .bind(sale.discount_paisa)
        .bind(sale.discount_type)
        .bind(sale.total_paisa)
        .bind(sale.payment_method)
        .bind(sale.amount_received_paisa)
        .bind(sale.change_paisa)
        .bind(&sale.customer_name)
        .bind(&sale.customer_phone)
        .bind(&sale.notes)
        .bind(sale.created_at)
        .execute(&mut *tx)
        .await?;

        let mut items = Vec::with_capacity(priced.lines.len());
        for line in &priced.lines {
            let item = SaleItem {
                id: Uuid::new_v4().to_string(),
                sale_id: sale_id.clone(),
                product_id: line.product_id.clone(),
                sku_snapshot: line.sku_snapshot.clone(),
                name_snapshot: line.name_snapshot.clone(),
                unit_price_paisa: line.unit_price.paisa(),
                quantity: line.quantity,
                size: line.size.clone(),
                color: line.color.clone(),
                line_total_paisa: line.line_total.paisa(),
                created_at: now,
            };

            sqlx::query(
                "INSERT INTO sale_items (\
                     id, sale_id, product_id, sku_snapshot, name_snapshot, \
                     unit_price_paisa, quantity, size, color, line_total_paisa, created_at\
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            )
            .bind(&item.id)
            .bind(&item.sale_id)
            .bind(&item.product_id)
            .bind(&item.sku_snapshot)
            .bind(&item.name_snapshot)
            .bind(item.unit_price_paisa)
            .bind(item.quantity)
            .bind(&item.size)
            .bind(&item.color)
            .bind(item.line_total_paisa)
            .bind(item.created_at)
            .execute(&mut *tx)
            .await?;

            items.push(item);
        }

        // Stock work reads fresh inside the transaction so two lines
        // hitting the same product see each other's decrements.
        for item in &new_sale.items {
            decrement_stock(
                &mut tx,
                &item.product_id,
                item.size.as_deref(),
                item.color.as_deref(),
                item.quantity,
                now,
            )
            .await?;
        }

        tx.commit().await?;

        Ok((sale, items))
    }

    /// Gets a sale by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(
            "SELECT id, receipt_number, subtotal_paisa, discount_paisa, discount_type, \
                    total_paisa, payment_method, amount_received_paisa, change_paisa, \
                    customer_name, customer_phone, notes, created_at \
             FROM sales WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Gets all items for a sale.
    pub async fn get_items(&self, sale_id: &str) -> DbResult<Vec<SaleItem>> {
        let items = sqlx::query_as::<_, SaleItem>(
            "SELECT id, sale_id, product_id, sku_snapshot, name_snapshot, \
                    unit_price_paisa, quantity, size, color, line_total_paisa, created_at \
             FROM sale_items WHERE sale_id = ?1 ORDER BY created_at, id",
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Gets a sale and its items in one call (receipt rendering).
    pub async fn get_with_items(&self, id: &str) -> DbResult<Option<(Sale, Vec<SaleItem>)>> {
        let Some(sale) = self.get_by_id(id).await? else {
            return Ok(None);
        };
        let items = self.get_items(id).await?;
        Ok(Some((sale, items)))
    }

    /// Lists the most recent sales, newest first.
    pub async fn list_recent(&self, limit: u32) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(
            "SELECT id, receipt_number, subtotal_paisa, discount_paisa, discount_type, \
                    total_paisa, payment_method, amount_received_paisa, change_paisa, \
                    customer_name, customer_phone, notes, created_at \
             FROM sales ORDER BY created_at DESC, receipt_number DESC LIMIT ?1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }
}

// =============================================================================
// Transaction Helpers
// =============================================================================

/// Fetches a product inside the checkout transaction.
/// A miss is a hard error: the whole sale rolls back.
async fn fetch_product(tx: &mut Transaction<'_, Sqlite>, id: &str) -> DbResult<Product> {
    let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1");

    let row = sqlx::query_as::<_, ProductRow>(&sql)
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;

    match row {
        Some(row) => Product::try_from(row),
        None => Err(DbError::not_found("Product", id)),
    }
}

/// Claims the next receipt sequence for a local day.
///
/// Single-statement upsert: insert 1 for a fresh day, otherwise increment
/// and return. Serialized by the write transaction, so no two sales can
/// read the same value.
async fn next_receipt_seq(tx: &mut Transaction<'_, Sqlite>, day: &str) -> DbResult<i64> {
    let seq: i64 = sqlx::query_scalar(
        "INSERT INTO receipt_counters (day, next_seq) VALUES (?1, 1) \
         ON CONFLICT(day) DO UPDATE SET next_seq = next_seq + 1 \
         RETURNING next_seq",
    )
    .bind(day)
    .fetch_one(&mut **tx)
    .await?;

    Ok(seq)
}

/// Applies one line's stock decrement, floored at zero.
///
/// The variant path runs only when the line picked both size and color AND
/// the product carries a matrix; it rewrites the cell and recomputes the
/// flat stock as the matrix sum. Every other line takes the flat path.
async fn decrement_stock(
    tx: &mut Transaction<'_, Sqlite>,
    product_id: &str,
    size: Option<&str>,
    color: Option<&str>,
    quantity: i64,
    now: DateTime<Utc>,
) -> DbResult<()> {
    let (stock, variant_json): (i64, Option<String>) =
        sqlx::query_as("SELECT stock, variant_stock FROM products WHERE id = ?1")
            .bind(product_id)
            .fetch_one(&mut **tx)
            .await?;

    if let (Some(size), Some(color), Some(json)) = (size, color, variant_json) {
        let mut matrix: VariantMatrix = serde_json::from_str(&json)
            .map_err(|e| DbError::corrupt_column("Product", product_id, "variant_stock", e))?;

        let removed = matrix.decrement_clamped(color, size, quantity);
        if removed < quantity {
            warn!(
                product_id = %product_id,
                color = %color,
                size = %size,
                requested = quantity,
                removed,
                "Variant stock clamped at zero"
            );
        }

        let new_stock = matrix.total();
        let updated_json = serde_json::to_string(&matrix)
            .map_err(|e| DbError::corrupt_column("Product", product_id, "variant_stock", e))?;

        sqlx::query(
            "UPDATE products SET variant_stock = ?2, stock = ?3, updated_at = ?4 WHERE id = ?1",
        )
        .bind(product_id)
        .bind(updated_json)
        .bind(new_stock)
        .bind(now)
        .execute(&mut **tx)
        .await?;

        return Ok(());
    }

    if stock < quantity {
        warn!(
            product_id = %product_id,
            available = stock,
            requested = quantity,
            "Stock clamped at zero"
        );
    }

    // Atomic clamped decrement: never goes negative, even if another
    // process slips a write between our read and this statement.
    sqlx::query("UPDATE products SET stock = MAX(0, stock - ?2), updated_at = ?3 WHERE id = ?1")
        .bind(product_id)
        .bind(quantity)
        .bind(now)
        .execute(&mut **tx)
        .await?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
