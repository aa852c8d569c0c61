//! Dashboard routes.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use drplanet_core::RevenueReport;

use crate::error::ApiResult;
use crate::state::AppState;

/// `GET /api/dashboard/revenue` - today / this month / all time, each
/// split into web, POS, and udhar.
pub async fn revenue(State(state): State<Arc<AppState>>) -> ApiResult<Json<RevenueReport>> {
    let report = state.db.reporting().revenue_report().await?;
    Ok(Json(report))
}
