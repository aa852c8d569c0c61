//! Storefront-wide discount admin routes.
//!
//! One record, read by the storefront on every product render and written
//! from the back office. The PUT replaces the whole record; there is no
//! partial update.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;

use drplanet_core::{validation, DiscountRate, GlobalDiscount};

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDiscountRequest {
    pub is_active: bool,
    /// Discount in percentage points, 0 to 100.
    pub percentage: f64,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

/// `GET /api/admin/discount` - the current record.
///
/// Reads as an inactive zero discount when nothing has been saved yet, so
/// clients never need a missing-record branch.
pub async fn get_discount(State(state): State<Arc<AppState>>) -> ApiResult<Json<GlobalDiscount>> {
    let discount = state.db.discount().get().await?;
    Ok(Json(discount))
}

/// `PUT /api/admin/discount` - validated upsert.
pub async fn put_discount(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateDiscountRequest>,
) -> ApiResult<Json<GlobalDiscount>> {
    validation::validate_global_discount_percentage(req.percentage)?;
    validation::validate_discount_window(req.starts_at, req.ends_at)?;

    let discount = GlobalDiscount {
        is_active: req.is_active,
        percentage_bps: DiscountRate::from_percentage(req.percentage).bps(),
        starts_at: req.starts_at,
        ends_at: req.ends_at,
        updated_at: Utc::now(),
    };

    state.db.discount().upsert(&discount).await?;

    info!(
        is_active = discount.is_active,
        percentage_bps = discount.percentage_bps,
        "Global discount updated"
    );

    Ok(Json(discount))
}
