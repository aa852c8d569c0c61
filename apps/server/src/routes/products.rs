//! Product routes: storefront catalog reads and the POS search box.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use tracing::debug;

use drplanet_core::validation;
use drplanet_core::Product;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Hard ceiling on page size, whatever the client asks for.
const MAX_PAGE_SIZE: u32 = 200;

/// Result cap for the POS search box.
const SEARCH_LIMIT: u32 = 20;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// `GET /api/products` - active products, name-sorted, paged.
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<Product>>> {
    let limit = params.limit.unwrap_or(50).min(MAX_PAGE_SIZE);
    let offset = params.offset.unwrap_or(0);

    let products = state.db.products().list_active(limit, offset).await?;
    Ok(Json(products))
}

/// `GET /api/products/{id}` - product detail.
pub async fn detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Product>> {
    let product = state
        .db
        .products()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Product not found: {id}")))?;

    Ok(Json(product))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
}

/// `GET /api/pos/products/search?q=` - the POS search box.
///
/// A purely numeric query of barcode length takes the exact-match path
/// first, so scanning a barcode resolves without a text search. Everything
/// else (including a barcode with no exact hit) goes to full-text search.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<Vec<Product>>> {
    let query = validation::validate_search_query(&params.q)?;

    if is_barcode_query(&query) {
        if let Some(product) = state.db.products().get_by_barcode(&query).await? {
            debug!(barcode = %query, "Barcode scan hit");
            return Ok(Json(vec![product]));
        }
    }

    let products = state.db.products().search(&query, SEARCH_LIMIT).await?;
    Ok(Json(products))
}

/// EAN-8 through EAN-13/UPC-A shapes: all digits, 8 to 13 of them.
fn is_barcode_query(query: &str) -> bool {
    (8..=13).contains(&query.len()) && query.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_barcode_shapes() {
        assert!(is_barcode_query("12345678"));
        assert!(is_barcode_query("8961234567890"));
        assert!(!is_barcode_query("1234567"));
        assert!(!is_barcode_query("12345678901234"));
        assert!(!is_barcode_query("scrub top"));
        assert!(!is_barcode_query("896123456789a"));
    }
}
