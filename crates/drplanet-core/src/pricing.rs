//! # Sale Pricing
//!
//! Pure checkout math: line totals, subtotal, discount, change.
//!
//! ## Where This Runs
//! ```text
//! POST /api/pos/sales
//!      │
//!      ▼
//! resolve products ──► price_sale() ◄── THIS MODULE (no I/O)
//!      │                    │
//!      ▼                    ▼
//! stock decrement      Sale + SaleItems persisted in one transaction
//! ```
//!
//! All arithmetic is integer paisa via [`Money`]. A discount larger than
//! the subtotal yields a negative total; that is recorded as-is.

use crate::money::Money;
use crate::types::{DiscountRate, DiscountType, Product};

// =============================================================================
// Inputs
// =============================================================================

/// One requested line, with its product already resolved.
#[derive(Debug)]
pub struct LineRequest<'a> {
    pub product: &'a Product,
    pub quantity: i64,
    pub size: Option<&'a str>,
    pub color: Option<&'a str>,
}

/// The discount requested for a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaleDiscount {
    /// No discount.
    None,
    /// Fixed amount off the subtotal.
    Flat(Money),
    /// Percentage of the subtotal.
    Percentage(DiscountRate),
}

impl SaleDiscount {
    /// The discount type to persist with the sale, if any.
    pub fn discount_type(&self) -> Option<DiscountType> {
        match self {
            SaleDiscount::None => None,
            SaleDiscount::Flat(_) => Some(DiscountType::Flat),
            SaleDiscount::Percentage(_) => Some(DiscountType::Percentage),
        }
    }
}

// =============================================================================
// Outputs
// =============================================================================

/// A priced line ready to persist as a sale item.
///
/// Carries the product snapshots so later product edits never rewrite
/// receipt history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine {
    pub product_id: String,
    pub sku_snapshot: String,
    pub name_snapshot: String,
    pub unit_price: Money,
    pub quantity: i64,
    pub size: Option<String>,
    pub color: Option<String>,
    pub line_total: Money,
}

/// The computed money columns for a sale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalePricing {
    pub lines: Vec<PricedLine>,
    pub subtotal: Money,
    pub discount: Money,
    pub total: Money,
}

// =============================================================================
// Pricing
// =============================================================================

/// Prices a sale from resolved lines and a discount request.
///
/// Unit price per line is the product's promotional price when set, else
/// the regular price. Percentage discounts apply to the subtotal, rounded
/// to the nearest paisa. The total is NOT floored: an over-large discount
/// produces a negative total on purpose.
pub fn price_sale(lines: &[LineRequest<'_>], discount: SaleDiscount) -> SalePricing {
    let mut priced = Vec::with_capacity(lines.len());
    let mut subtotal = Money::zero();

    for line in lines {
        let unit_price = line.product.unit_price();
        let line_total = unit_price.multiply_quantity(line.quantity);
        subtotal += line_total;

        priced.push(PricedLine {
            product_id: line.product.id.clone(),
            sku_snapshot: line.product.sku.clone(),
            name_snapshot: line.product.name.clone(),
            unit_price,
            quantity: line.quantity,
            size: line.size.map(str::to_string),
            color: line.color.map(str::to_string),
            line_total,
        });
    }

    let discount_amount = match discount {
        SaleDiscount::None => Money::zero(),
        SaleDiscount::Flat(amount) => amount,
        SaleDiscount::Percentage(rate) => subtotal.percentage_of(rate.bps()),
    };

    SalePricing {
        lines: priced,
        subtotal,
        discount: discount_amount,
        total: subtotal - discount_amount,
    }
}

/// Change owed on a cash sale.
///
/// Underpayment yields zero change, never a negative amount. The delta is
/// visible from the stored `amount_received` and `total` columns anyway.
pub fn change_due(total: Money, amount_received: Money) -> Money {
    let change = amount_received - total;
    if change.is_negative() {
        Money::zero()
    } else {
        change
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(id: &str, price: i64, sale_price: Option<i64>) -> Product {
        let now = Utc::now();
        Product {
            id: id.to_string(),
            sku: format!("SKU-{id}"),
            barcode: None,
            name: format!("Product {id}"),
            description: None,
            category: None,
            price_paisa: price,
            sale_price_paisa: sale_price,
            stock: 100,
            variant_stock: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_single_line_subtotal() {
        let scrub = product("p1", 50_000, None);
        let lines = [LineRequest {
            product: &scrub,
            quantity: 3,
            size: None,
            color: None,
        }];

        let pricing = price_sale(&lines, SaleDiscount::None);

        assert_eq!(pricing.subtotal.paisa(), 150_000);
        assert_eq!(pricing.discount.paisa(), 0);
        assert_eq!(pricing.total.paisa(), 150_000);
        assert_eq!(pricing.lines[0].line_total.paisa(), 150_000);
    }

    #[test]
    fn test_sale_price_wins_over_regular() {
        let coat = product("p1", 200_000, Some(160_000));
        let lines = [LineRequest {
            product: &coat,
            quantity: 2,
            size: Some("M"),
            color: Some("White"),
        }];

        let pricing = price_sale(&lines, SaleDiscount::None);

        assert_eq!(pricing.lines[0].unit_price.paisa(), 160_000);
        assert_eq!(pricing.subtotal.paisa(), 320_000);
        assert_eq!(pricing.lines[0].size.as_deref(), Some("M"));
        assert_eq!(pricing.lines[0].color.as_deref(), Some("White"));
    }

    #[test]
    fn test_multiple_lines_accumulate() {
        let top = product("p1", 50_000, None);
        let pants = product("p2", 45_000, None);
        let lines = [
            LineRequest {
                product: &top,
                quantity: 2,
                size: None,
                color: None,
            },
            LineRequest {
                product: &pants,
                quantity: 1,
                size: None,
                color: None,
            },
        ];

        let pricing = price_sale(&lines, SaleDiscount::None);

        assert_eq!(pricing.lines.len(), 2);
        assert_eq!(pricing.subtotal.paisa(), 145_000);
    }

    #[test]
    fn test_percentage_discount() {
        // Rs 1,000 subtotal at 10% → Rs 100 off, Rs 900 total
        let item = product("p1", 100_000, None);
        let lines = [LineRequest {
            product: &item,
            quantity: 1,
            size: None,
            color: None,
        }];

        let pricing = price_sale(
            &lines,
            SaleDiscount::Percentage(DiscountRate::from_bps(1000)),
        );

        assert_eq!(pricing.subtotal.paisa(), 100_000);
        assert_eq!(pricing.discount.paisa(), 10_000);
        assert_eq!(pricing.total.paisa(), 90_000);
    }

    #[test]
    fn test_flat_discount() {
        let item = product("p1", 80_000, None);
        let lines = [LineRequest {
            product: &item,
            quantity: 1,
            size: None,
            color: None,
        }];

        let pricing = price_sale(&lines, SaleDiscount::Flat(Money::from_paisa(5_000)));

        assert_eq!(pricing.discount.paisa(), 5_000);
        assert_eq!(pricing.total.paisa(), 75_000);
    }

    #[test]
    fn test_oversized_flat_discount_goes_negative() {
        let item = product("p1", 50_000, None);
        let lines = [LineRequest {
            product: &item,
            quantity: 1,
            size: None,
            color: None,
        }];

        let pricing = price_sale(&lines, SaleDiscount::Flat(Money::from_paisa(80_000)));

        // Recorded as-is; the books show the giveaway
        assert_eq!(pricing.total.paisa(), -30_000);
    }

    #[test]
    fn test_snapshots_frozen_from_product() {
        let item = product("p9", 30_000, None);
        let lines = [LineRequest {
            product: &item,
            quantity: 1,
            size: None,
            color: None,
        }];

        let pricing = price_sale(&lines, SaleDiscount::None);

        assert_eq!(pricing.lines[0].product_id, "p9");
        assert_eq!(pricing.lines[0].sku_snapshot, "SKU-p9");
        assert_eq!(pricing.lines[0].name_snapshot, "Product p9");
    }

    #[test]
    fn test_change_due() {
        let total = Money::from_paisa(90_000);

        // Exact payment
        assert_eq!(change_due(total, Money::from_paisa(90_000)).paisa(), 0);
        // Overpayment
        assert_eq!(change_due(total, Money::from_paisa(100_000)).paisa(), 10_000);
        // Underpayment clamps to zero
        assert_eq!(change_due(total, Money::from_paisa(50_000)).paisa(), 0);
    }

    #[test]
    fn test_discount_type_mapping() {
        assert_eq!(SaleDiscount::None.discount_type(), None);
        assert_eq!(
            SaleDiscount::Flat(Money::zero()).discount_type(),
            Some(DiscountType::Flat)
        );
        assert_eq!(
            SaleDiscount::Percentage(DiscountRate::zero()).discount_type(),
            Some(DiscountType::Percentage)
        );
    }
}
