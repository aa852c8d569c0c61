//! Liveness endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthBody {
    pub status: &'static str,
    pub database: &'static str,
}

/// Reports process liveness and whether the database answers a ping.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    if state.db.health_check().await {
        (
            StatusCode::OK,
            Json(HealthBody {
                status: "ok",
                database: "ok",
            }),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthBody {
                status: "degraded",
                database: "unreachable",
            }),
        )
    }
}
