//! Udhar (store credit) payment routes.
//!
//! Walk-in repayments against informal credit. Each POST is one ledger
//! entry; there is no running balance to reconcile here.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use drplanet_core::{validation, Money, UdharPayment};

use crate::error::ApiResult;
use crate::state::AppState;

const DEFAULT_LIST_LIMIT: u32 = 50;
const MAX_LIST_LIMIT: u32 = 200;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPaymentRequest {
    pub customer_name: Option<String>,
    /// Amount repaid, in rupees.
    pub amount: f64,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<u32>,
}

/// `POST /api/udhar/payments` - record a repayment.
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RecordPaymentRequest>,
) -> ApiResult<(StatusCode, Json<UdharPayment>)> {
    let paisa = super::sales::rupees_to_paisa("amount", req.amount)?;
    validation::validate_udhar_amount(paisa)?;

    if let Some(name) = req.customer_name.as_deref() {
        validation::validate_customer_name(name)?;
    }
    if let Some(notes) = req.notes.as_deref() {
        validation::validate_notes(notes)?;
    }

    let payment = state
        .db
        .udhar()
        .record(
            req.customer_name.as_deref(),
            Money::from_paisa(paisa),
            req.notes.as_deref(),
        )
        .await?;

    info!(payment_id = %payment.id, amount_paisa = payment.amount_paisa, "Udhar payment recorded");

    Ok((StatusCode::CREATED, Json(payment)))
}

/// `GET /api/udhar/payments?limit=` - recent payments, newest first.
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<UdharPayment>>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIST_LIMIT).min(MAX_LIST_LIMIT);
    let payments = state.db.udhar().list_recent(limit).await?;
    Ok(Json(payments))
}
