//! POS sale routes: checkout, history, and the printable receipt.
//!
//! All request validation lives here at the boundary. By the time a
//! request reaches the repository it is structurally sound; the
//! repository only adds the things that need the database (product
//! existence, receipt sequence).

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use drplanet_core::pricing::SaleDiscount;
use drplanet_core::validation;
use drplanet_core::{DiscountRate, DiscountType, Money, PaymentMethod, Sale, SaleItem, ValidationError};
use drplanet_db::{NewSale, NewSaleItem};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

const DEFAULT_LIST_LIMIT: u32 = 20;
const MAX_LIST_LIMIT: u32 = 100;

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaleRequest {
    pub items: Vec<SaleLineRequest>,
    /// Rupee amount for flat discounts, percentage points for percentage.
    pub discount: Option<f64>,
    pub discount_type: Option<DiscountType>,
    pub payment_method: PaymentMethod,
    /// Cash tendered, in rupees.
    pub amount_received: Option<f64>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleLineRequest {
    pub product_id: String,
    pub quantity: i64,
    pub size: Option<String>,
    pub color: Option<String>,
}

/// A sale with its line items, as returned to clients.
#[derive(Debug, Serialize)]
pub struct SaleBody {
    #[serde(flatten)]
    pub sale: Sale,
    pub items: Vec<SaleItem>,
}

/// The receipt payload, ready for a thermal-printer renderer.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptBody {
    pub store_name: String,
    #[serde(flatten)]
    pub sale: Sale,
    pub items: Vec<SaleItem>,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<u32>,
}

// =============================================================================
// Handlers
// =============================================================================

/// `POST /api/pos/sales` - record a checkout.
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateSaleRequest>,
) -> ApiResult<(StatusCode, Json<SaleBody>)> {
    validation::validate_sale_items(req.items.len())?;
    for line in &req.items {
        validation::validate_quantity(line.quantity)?;
    }

    let discount = parse_discount(req.discount, req.discount_type)?;

    let amount_received = match req.amount_received {
        Some(rupees) => {
            let paisa = rupees_to_paisa("amountReceived", rupees)?;
            validation::validate_amount_received(paisa)?;
            Some(Money::from_paisa(paisa))
        }
        None => None,
    };

    if let Some(name) = req.customer_name.as_deref() {
        validation::validate_customer_name(name)?;
    }
    if let Some(phone) = req.customer_phone.as_deref() {
        validation::validate_customer_phone(phone)?;
    }
    if let Some(notes) = req.notes.as_deref() {
        validation::validate_notes(notes)?;
    }

    let new_sale = NewSale {
        items: req
            .items
            .into_iter()
            .map(|line| NewSaleItem {
                product_id: line.product_id,
                quantity: line.quantity,
                size: line.size,
                color: line.color,
            })
            .collect(),
        discount,
        payment_method: req.payment_method,
        amount_received,
        customer_name: req.customer_name,
        customer_phone: req.customer_phone,
        notes: req.notes,
    };

    let (sale, items) = state.db.sales().create_sale(new_sale).await?;

    info!(
        receipt_number = %sale.receipt_number,
        total_paisa = sale.total_paisa,
        lines = items.len(),
        "Sale recorded"
    );

    Ok((StatusCode::CREATED, Json(SaleBody { sale, items })))
}

/// `GET /api/pos/sales?limit=` - recent sales, newest first.
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<Sale>>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIST_LIMIT).min(MAX_LIST_LIMIT);
    let sales = state.db.sales().list_recent(limit).await?;
    Ok(Json(sales))
}

/// `GET /api/pos/sales/{id}` - sale with line items.
pub async fn detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<SaleBody>> {
    let (sale, items) = state
        .db
        .sales()
        .get_with_items(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Sale not found: {id}")))?;

    Ok(Json(SaleBody { sale, items }))
}

/// `GET /api/pos/sales/{id}/receipt` - printable receipt payload.
///
/// Stored fields verbatim plus the configured store name. No recomputation
/// happens here; the receipt shows exactly what was persisted at checkout.
pub async fn receipt(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<ReceiptBody>> {
    let (sale, items) = state
        .db
        .sales()
        .get_with_items(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Sale not found: {id}")))?;

    Ok(Json(ReceiptBody {
        store_name: state.config.store_name.clone(),
        sale,
        items,
    }))
}

// =============================================================================
// Boundary Conversions
// =============================================================================

/// Maps the wire discount fields onto the typed discount.
///
/// A value with no type is treated as a flat rupee amount. Percentage
/// values convert to basis points once, here, so everything downstream is
/// integer math.
fn parse_discount(
    value: Option<f64>,
    discount_type: Option<DiscountType>,
) -> Result<SaleDiscount, ValidationError> {
    let Some(value) = value else {
        return Ok(SaleDiscount::None);
    };

    validation::validate_discount_value(value)?;

    match discount_type {
        Some(DiscountType::Percentage) => {
            Ok(SaleDiscount::Percentage(DiscountRate::from_percentage(value)))
        }
        Some(DiscountType::Flat) | None => {
            let paisa = rupees_to_paisa("discount", value)?;
            Ok(SaleDiscount::Flat(Money::from_paisa(paisa)))
        }
    }
}

/// Converts a rupee amount from the wire to integer paisa.
pub(crate) fn rupees_to_paisa(field: &str, value: f64) -> Result<i64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a finite number".to_string(),
        });
    }
    Ok((value * 100.0).round() as i64)
}
