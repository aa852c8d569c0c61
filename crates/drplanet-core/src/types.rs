//! # Domain Types
//!
//! Core domain types used throughout Doctor Planet.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Sale       │   │      Order      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  sku (business) │   │  receipt_number │   │  status         │       │
//! │  │  price_paisa    │   │  total_paisa    │   │  total_paisa    │       │
//! │  │  variant_stock  │   │  payment_method │   │  payment_status │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  DiscountRate   │   │   OrderStatus   │   │ PaymentMethod   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  Pending        │   │  Cash           │       │
//! │  │  1500 = 15%     │   │  ...            │   │  Card           │       │
//! │  └─────────────────┘   │  Cancelled      │   │  MobileWallet   │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has:
//! - `id`: UUID v4 - immutable, used for database relations
//! - Business ID: (sku, receipt_number, etc.) - human-readable, potentially mutable

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;
use crate::variant::VariantMatrix;

// =============================================================================
// Discount Rate
// =============================================================================

/// Discount rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1500 bps = 15% (e.g., an Eid storewide sale)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a discount rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a discount rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        DiscountRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero discount rate.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    /// Checks if discount rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::zero()
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale (storefront and POS).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Stock Keeping Unit - business identifier.
    pub sku: String,

    /// Barcode (EAN-13, UPC-A, etc.).
    pub barcode: Option<String>,

    /// Display name shown on storefront, POS, and receipts.
    pub name: String,

    /// Optional description for product details.
    pub description: Option<String>,

    /// Category ("scrubs", "lab-coats", "accessories", ...).
    pub category: Option<String>,

    /// Regular price in paisa (smallest currency unit).
    pub price_paisa: i64,

    /// Promotional price in paisa. When set, this wins over `price_paisa`.
    pub sale_price_paisa: Option<i64>,

    /// Total units on hand. For variant products this is kept equal to the
    /// sum of the variant matrix cells.
    pub stock: i64,

    /// Per color/size stock counts for apparel. `None` for flat-stock items
    /// like stethoscopes.
    pub variant_stock: Option<VariantMatrix>,

    /// Whether product is active (soft delete).
    pub is_active: bool,

    /// When the product was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the regular price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_paisa(self.price_paisa)
    }

    /// Returns the promotional price as Money, if one is set.
    #[inline]
    pub fn sale_price(&self) -> Option<Money> {
        self.sale_price_paisa.map(Money::from_paisa)
    }

    /// The price a unit actually sells for: promotional price when set,
    /// regular price otherwise.
    pub fn unit_price(&self) -> Money {
        match self.sale_price_paisa {
            Some(paisa) => Money::from_paisa(paisa),
            None => Money::from_paisa(self.price_paisa),
        }
    }

    /// Checks whether this product tracks stock per color/size.
    #[inline]
    pub fn has_variants(&self) -> bool {
        self.variant_stock.is_some()
    }
}

// =============================================================================
// Discount Type
// =============================================================================

/// How a per-sale discount is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// A fixed amount off the subtotal (in paisa).
    Flat,
    /// A percentage of the subtotal.
    Percentage,
}

// =============================================================================
// Payment Method
// =============================================================================

#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Card payment on external terminal.
    Card,
    /// JazzCash / Easypaisa style wallet transfer.
    MobileWallet,
    /// Direct bank transfer.
    BankTransfer,
}

// =============================================================================
// Sale
// =============================================================================

/// A finalized POS sale.
///
/// Sales are immutable once recorded. There is no edit or void flow; a
/// mistake is corrected with a compensating entry.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: String,
    /// Date-coded daily-sequential receipt number, e.g. "POS-20260822-0035".
    pub receipt_number: String,
    pub subtotal_paisa: i64,
    pub discount_paisa: i64,
    pub discount_type: Option<DiscountType>,
    pub total_paisa: i64,
    pub payment_method: PaymentMethod,
    /// Cash tendered by the customer, when captured.
    pub amount_received_paisa: Option<i64>,
    /// Change returned. Never negative; underpayment is recorded as zero.
    pub change_paisa: Option<i64>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub notes: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Sale {
    /// Returns the sale total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_paisa(self.total_paisa)
    }

    /// Returns the subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_paisa(self.subtotal_paisa)
    }
}

// =============================================================================
// Sale Item
// =============================================================================

/// A line item in a sale.
/// Uses snapshot pattern to freeze product data at time of sale.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub id: String,
    pub sale_id: String,
    pub product_id: String,
    /// SKU at time of sale (frozen).
    pub sku_snapshot: String,
    /// Product name at time of sale (frozen).
    pub name_snapshot: String,
    /// Unit price in paisa at time of sale (frozen).
    pub unit_price_paisa: i64,
    /// Quantity sold.
    pub quantity: i64,
    /// Apparel size, when the customer picked a variant.
    pub size: Option<String>,
    /// Apparel color, when the customer picked a variant.
    pub color: Option<String>,
    /// Line total (unit_price × quantity).
    pub line_total_paisa: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl SaleItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_paisa(self.unit_price_paisa)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_paisa(self.line_total_paisa)
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// Fulfillment state of a web order.
///
/// ## State Machine
/// ```text
/// pending → confirmed → processing → shipped → delivered
///    │          │           │           │
///    └──────────┴───────────┴───────────┴──► cancelled
/// ```
/// `delivered` and `cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed at checkout, awaiting review.
    Pending,
    /// Reviewed and accepted by the back office.
    Confirmed,
    /// Being picked and packed.
    Processing,
    /// Handed to the courier.
    Shipped,
    /// Received by the customer.
    Delivered,
    /// Called off before delivery. Excluded from revenue.
    Cancelled,
}

impl OrderStatus {
    /// Whether an order in this status can move to `to`.
    ///
    /// Forward moves advance one step at a time. Any non-terminal status
    /// can be cancelled.
    pub fn can_transition(self, to: OrderStatus) -> bool {
        use OrderStatus::*;
        match (self, to) {
            (Pending, Confirmed)
            | (Confirmed, Processing)
            | (Processing, Shipped)
            | (Shipped, Delivered) => true,
            (from, Cancelled) => !from.is_terminal(),
            _ => false,
        }
    }

    /// Terminal statuses permit no further transitions.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Lowercase name as stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

// =============================================================================
// Payment Status
// =============================================================================

/// Whether a web order has been paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Unpaid,
    Paid,
    Refunded,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Unpaid
    }
}

// =============================================================================
// Shipping Address
// =============================================================================

/// Address captured at checkout, stored denormalized with the order.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub postal_code: Option<String>,
    pub phone: Option<String>,
}

// =============================================================================
// Order
// =============================================================================

/// A web storefront order.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub subtotal_paisa: i64,
    pub shipping_paisa: i64,
    pub total_paisa: i64,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub shipping_address: Option<ShippingAddress>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Returns the order total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_paisa(self.total_paisa)
    }

    /// Cancelled orders never count towards revenue.
    #[inline]
    pub fn counts_towards_revenue(&self) -> bool {
        self.status != OrderStatus::Cancelled
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// A line item in a web order. Snapshot pattern, same as SaleItem.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub product_id: String,
    pub name_snapshot: String,
    pub unit_price_paisa: i64,
    pub quantity: i64,
    pub size: Option<String>,
    pub color: Option<String>,
    pub line_total_paisa: i64,
}

// =============================================================================
// Udhar Payment
// =============================================================================

/// A credit ("udhar") payment received from a customer.
///
/// The shop extends informal credit to regulars; when they settle up, the
/// payment is recorded here and counts as realized revenue at `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UdharPayment {
    pub id: String,
    pub customer_name: Option<String>,
    pub amount_paisa: i64,
    pub notes: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl UdharPayment {
    /// Returns the payment amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_paisa(self.amount_paisa)
    }
}

// =============================================================================
// Global Discount
// =============================================================================

/// The storewide discount singleton.
///
/// At most one storewide discount exists at a time. It applies to every
/// product's displayed price while in effect.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GlobalDiscount {
    /// Admin on/off switch.
    pub is_active: bool,

    /// Discount in basis points (1500 = 15%).
    pub percentage_bps: u32,

    /// Optional window start. Missing bound = no restriction.
    #[ts(as = "Option<String>")]
    pub starts_at: Option<DateTime<Utc>>,

    /// Optional window end (inclusive).
    #[ts(as = "Option<String>")]
    pub ends_at: Option<DateTime<Utc>>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl GlobalDiscount {
    /// Returns the discount rate.
    #[inline]
    pub fn rate(&self) -> DiscountRate {
        DiscountRate::from_bps(self.percentage_bps)
    }

    /// Whether the discount applies at the given instant.
    ///
    /// Requires the active flag and `now` inside the [starts_at, ends_at]
    /// window. Both bounds are inclusive; a missing bound does not
    /// constrain.
    pub fn is_in_effect(&self, now: DateTime<Utc>) -> bool {
        if !self.is_active {
            return false;
        }
        if let Some(starts) = self.starts_at {
            if now < starts {
                return false;
            }
        }
        if let Some(ends) = self.ends_at {
            if now > ends {
                return false;
            }
        }
        true
    }

    /// The discounted price for a given regular price.
    pub fn apply_to(&self, price: Money) -> Money {
        price - price.percentage_of(self.percentage_bps)
    }

    /// An inactive zero discount, used when no row exists yet.
    pub fn inactive(updated_at: DateTime<Utc>) -> Self {
        GlobalDiscount {
            is_active: false,
            percentage_bps: 0,
            starts_at: None,
            ends_at: None,
            updated_at,
        }
    }
}

// =============================================================================
// Revenue Types
// =============================================================================

/// Revenue for one time window, broken down by source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RevenueBreakdown {
    /// Web order totals, cancelled orders excluded.
    pub web: Money,
    /// POS sale totals, unconditional.
    pub pos: Money,
    /// Udhar payments, unconditional.
    pub udhar: Money,
}

impl RevenueBreakdown {
    /// Grand total across the three sources.
    #[inline]
    pub fn total(&self) -> Money {
        self.web + self.pos + self.udhar
    }
}

/// The full dashboard revenue report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RevenueReport {
    pub today: RevenueBreakdown,
    pub this_month: RevenueBreakdown,
    pub all_time: RevenueBreakdown,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_discount_rate_from_bps() {
        let rate = DiscountRate::from_bps(1500);
        assert_eq!(rate.bps(), 1500);
        assert!((rate.percentage() - 15.0).abs() < 0.001);
    }

    #[test]
    fn test_discount_rate_from_percentage() {
        let rate = DiscountRate::from_percentage(12.5);
        assert_eq!(rate.bps(), 1250);
    }

    fn test_product(price: i64, sale_price: Option<i64>) -> Product {
        let now = Utc::now();
        Product {
            id: "p-1".to_string(),
            sku: "SCRUB-TOP-CB".to_string(),
            barcode: None,
            name: "Classic Scrub Top".to_string(),
            description: None,
            category: Some("scrubs".to_string()),
            price_paisa: price,
            sale_price_paisa: sale_price,
            stock: 10,
            variant_stock: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_unit_price_prefers_sale_price() {
        let regular = test_product(149_900, None);
        assert_eq!(regular.unit_price().paisa(), 149_900);

        let on_sale = test_product(149_900, Some(119_900));
        assert_eq!(on_sale.unit_price().paisa(), 119_900);
    }

    #[test]
    fn test_order_status_forward_chain() {
        use OrderStatus::*;
        assert!(Pending.can_transition(Confirmed));
        assert!(Confirmed.can_transition(Processing));
        assert!(Processing.can_transition(Shipped));
        assert!(Shipped.can_transition(Delivered));

        // No skipping steps
        assert!(!Pending.can_transition(Processing));
        assert!(!Pending.can_transition(Shipped));
        assert!(!Confirmed.can_transition(Delivered));

        // No going backwards
        assert!(!Shipped.can_transition(Processing));
        assert!(!Delivered.can_transition(Shipped));
    }

    #[test]
    fn test_order_status_cancellation() {
        use OrderStatus::*;
        assert!(Pending.can_transition(Cancelled));
        assert!(Confirmed.can_transition(Cancelled));
        assert!(Processing.can_transition(Cancelled));
        assert!(Shipped.can_transition(Cancelled));

        // Terminal states stay terminal
        assert!(!Delivered.can_transition(Cancelled));
        assert!(!Cancelled.can_transition(Cancelled));
        assert!(!Cancelled.can_transition(Pending));
    }

    #[test]
    fn test_order_status_default() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    fn test_discount(
        active: bool,
        bps: u32,
        starts: Option<DateTime<Utc>>,
        ends: Option<DateTime<Utc>>,
    ) -> GlobalDiscount {
        GlobalDiscount {
            is_active: active,
            percentage_bps: bps,
            starts_at: starts,
            ends_at: ends,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_discount_in_effect_requires_active_flag() {
        let now = Utc::now();
        assert!(!test_discount(false, 1500, None, None).is_in_effect(now));
        assert!(test_discount(true, 1500, None, None).is_in_effect(now));
    }

    #[test]
    fn test_discount_zero_percentage_in_effect_but_free_of_charge() {
        // The in-effect check only looks at the flag and the window. A 0%
        // discount is "in effect" yet changes no price.
        let now = Utc::now();
        let discount = test_discount(true, 0, None, None);
        assert!(discount.is_in_effect(now));
        assert_eq!(discount.apply_to(Money::from_paisa(5000)).paisa(), 5000);
    }

    #[test]
    fn test_discount_window_bounds_are_inclusive() {
        let starts = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        let ends = Utc.with_ymd_and_hms(2026, 3, 31, 23, 59, 59).unwrap();
        let discount = test_discount(true, 1000, Some(starts), Some(ends));

        assert!(discount.is_in_effect(starts));
        assert!(discount.is_in_effect(ends));
        assert!(discount.is_in_effect(Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap()));

        let before = starts - chrono::Duration::seconds(1);
        let after = ends + chrono::Duration::seconds(1);
        assert!(!discount.is_in_effect(before));
        assert!(!discount.is_in_effect(after));
    }

    #[test]
    fn test_discount_open_ended_window() {
        let now = Utc::now();
        let past = now - chrono::Duration::days(7);

        // Only a start bound
        assert!(test_discount(true, 1000, Some(past), None).is_in_effect(now));
        // Only an end bound
        assert!(test_discount(true, 1000, None, Some(now + chrono::Duration::days(1)))
            .is_in_effect(now));
    }

    #[test]
    fn test_discount_apply_to() {
        let discount = test_discount(true, 1500, None, None);
        let price = Money::from_paisa(100_000); // Rs 1,000.00
        assert_eq!(discount.apply_to(price).paisa(), 85_000); // Rs 850.00
    }

    #[test]
    fn test_revenue_breakdown_total() {
        let breakdown = RevenueBreakdown {
            web: Money::from_paisa(500_000),
            pos: Money::from_paisa(230_000),
            udhar: Money::from_paisa(45_000),
        };
        assert_eq!(breakdown.total().paisa(), 775_000);
    }
}
