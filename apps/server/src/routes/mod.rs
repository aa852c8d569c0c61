//! # Route Layer
//!
//! One module per resource, assembled into the full API router here.
//!
//! ## API Surface
//! ```text
//! GET   /health                         liveness + db ping
//! GET   /api/products                   storefront product list
//! GET   /api/products/{id}              product detail
//! GET   /api/pos/products/search?q=     barcode fast path + text search
//! POST  /api/pos/sales                  record a sale
//! GET   /api/pos/sales?limit=           recent sales
//! GET   /api/pos/sales/{id}             sale with line items
//! GET   /api/pos/sales/{id}/receipt     printable receipt payload
//! GET   /api/udhar/payments?limit=      recent udhar payments
//! POST  /api/udhar/payments             record udhar payment
//! GET   /api/dashboard/revenue          three-window revenue report
//! GET   /api/admin/discount             storewide discount record
//! PUT   /api/admin/discount             validated upsert
//! GET   /api/orders?status=&limit=      order list
//! GET   /api/orders/{id}                order with items
//! PATCH /api/orders/{id}/status         advance fulfillment status
//! ```

pub mod dashboard;
pub mod discount;
pub mod health;
pub mod orders;
pub mod products;
pub mod sales;
pub mod udhar;

use std::sync::Arc;

use axum::routing::{get, patch};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the complete application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/products", get(products::list))
        .route("/api/products/{id}", get(products::detail))
        .route("/api/pos/products/search", get(products::search))
        .route("/api/pos/sales", get(sales::list).post(sales::create))
        .route("/api/pos/sales/{id}", get(sales::detail))
        .route("/api/pos/sales/{id}/receipt", get(sales::receipt))
        .route("/api/udhar/payments", get(udhar::list).post(udhar::create))
        .route("/api/dashboard/revenue", get(dashboard::revenue))
        .route(
            "/api/admin/discount",
            get(discount::get_discount).put(discount::put_discount),
        )
        .route("/api/orders", get(orders::list))
        .route("/api/orders/{id}", get(orders::detail))
        .route("/api/orders/{id}/status", patch(orders::update_status))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;

    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use chrono::Utc;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use drplanet_core::{
        Order, OrderItem, OrderStatus, PaymentStatus, Product, ShippingAddress, VariantMatrix,
    };
    use drplanet_db::{Database, DbConfig};
    use drplanet_db::repository::order::{generate_order_id, generate_order_item_id};
    use drplanet_db::repository::product::generate_product_id;

    async fn test_app() -> (Router, Database) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            database_path: ":memory:".into(),
            store_name: "Doctor Planet".to_string(),
        };
        let state = AppState::new(db.clone(), config);
        (router(state), db)
    }

    async fn seed_product(db: &Database, sku: &str, barcode: Option<&str>, stock: i64) -> String {
        let now = Utc::now();
        let id = generate_product_id();
        let product = Product {
            id: id.clone(),
            sku: sku.to_string(),
            barcode: barcode.map(str::to_string),
            name: "Classic Scrub Top".to_string(),
            description: Some("Poly-cotton, anti-wrinkle".to_string()),
            category: Some("scrubs".to_string()),
            price_paisa: 149_900,
            sale_price_paisa: None,
            stock,
            variant_stock: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        db.products().insert(&product).await.unwrap();
        id
    }

    async fn seed_variant_product(db: &Database, sku: &str) -> String {
        let now = Utc::now();
        let id = generate_product_id();
        let mut matrix = VariantMatrix::new();
        matrix.set("Ceil Blue", "M", 6);
        matrix.set("Ceil Blue", "L", 4);
        let product = Product {
            id: id.clone(),
            sku: sku.to_string(),
            barcode: None,
            name: "Stretch Scrub Set".to_string(),
            description: None,
            category: Some("scrubs".to_string()),
            price_paisa: 249_900,
            sale_price_paisa: None,
            stock: matrix.total(),
            variant_stock: Some(matrix),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        db.products().insert(&product).await.unwrap();
        id
    }

    async fn seed_order(db: &Database, product_id: &str, status: OrderStatus) -> String {
        let now = Utc::now();
        let order_id = generate_order_id();
        let order = Order {
            id: order_id.clone(),
            status,
            payment_status: PaymentStatus::Unpaid,
            subtotal_paisa: 149_900,
            shipping_paisa: 20_000,
            total_paisa: 169_900,
            customer_name: "Dr. Sana Malik".to_string(),
            customer_email: Some("sana@example.com".to_string()),
            shipping_address: Some(ShippingAddress {
                line1: "14-B Liberty Market".to_string(),
                line2: None,
                city: "Lahore".to_string(),
                postal_code: Some("54000".to_string()),
                phone: Some("+92 300 1234567".to_string()),
            }),
            created_at: now,
            updated_at: now,
        };
        let items = vec![OrderItem {
            id: generate_order_item_id(),
            order_id: order_id.clone(),
            product_id: product_id.to_string(),
            name_snapshot: "Classic Scrub Top".to_string(),
            unit_price_paisa: 149_900,
            quantity: 1,
            size: Some("M".to_string()),
            color: Some("Ceil Blue".to_string()),
            line_total_paisa: 149_900,
        }];
        db.orders().insert_with_items(&order, &items).await.unwrap();
        order_id
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn send_json(app: &Router, method: Method, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_reports_ok() {
        let (app, _db) = test_app().await;
        let (status, body) = get_json(&app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"], "ok");
    }

    #[tokio::test]
    async fn test_product_list_and_detail() {
        let (app, db) = test_app().await;
        let id = seed_product(&db, "SCRUB-TOP-CB", None, 10).await;

        let (status, body) = get_json(&app, "/api/products").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["sku"], "SCRUB-TOP-CB");
        assert_eq!(body[0]["pricePaisa"], 149_900);

        let (status, body) = get_json(&app, &format!("/api/products/{id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], id.as_str());
    }

    #[tokio::test]
    async fn test_product_detail_missing_is_enveloped_404() {
        let (app, _db) = test_app().await;
        let (status, body) = get_json(&app, "/api/products/no-such-id").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_search_barcode_fast_path() {
        let (app, db) = test_app().await;
        seed_product(&db, "STETH-CL3", Some("8961234567890"), 5).await;
        seed_product(&db, "SCRUB-TOP-CB", None, 10).await;

        let (status, body) = get_json(&app, "/api/pos/products/search?q=8961234567890").await;
        assert_eq!(status, StatusCode::OK);
        let hits = body.as_array().unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0]["sku"], "STETH-CL3");
    }

    #[tokio::test]
    async fn test_create_sale_end_to_end() {
        let (app, db) = test_app().await;
        let product_id = seed_variant_product(&db, "SCRUB-SET-CB").await;

        let (status, body) = send_json(
            &app,
            Method::POST,
            "/api/pos/sales",
            json!({
                "items": [
                    {"productId": product_id, "quantity": 2, "size": "M", "color": "Ceil Blue"}
                ],
                "discount": 10.0,
                "discountType": "percentage",
                "paymentMethod": "cash",
                "amountReceived": 4500.0
            }),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert!(body["receiptNumber"].as_str().unwrap().starts_with("POS-"));
        // 2 x 249,900 = 499,800; 10% off = 49,980; total 449,820
        assert_eq!(body["subtotalPaisa"], 499_800);
        assert_eq!(body["discountPaisa"], 49_980);
        assert_eq!(body["totalPaisa"], 449_820);
        assert_eq!(body["amountReceivedPaisa"], 450_000);
        assert_eq!(body["changePaisa"], 180);
        assert_eq!(body["items"].as_array().unwrap().len(), 1);

        // Stock came down through the variant matrix
        let product = db.products().get_by_id(&product_id).await.unwrap().unwrap();
        assert_eq!(product.stock, 8);
        assert_eq!(product.variant_stock.unwrap().get("Ceil Blue", "M"), Some(4));

        // Receipt carries the configured store name and stored totals
        let sale_id = body["id"].as_str().unwrap().to_string();
        let (status, receipt) = get_json(&app, &format!("/api/pos/sales/{sale_id}/receipt")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(receipt["storeName"], "Doctor Planet");
        assert_eq!(receipt["totalPaisa"], 449_820);
    }

    #[tokio::test]
    async fn test_create_sale_rejects_empty_cart() {
        let (app, _db) = test_app().await;
        let (status, body) = send_json(
            &app,
            Method::POST,
            "/api/pos/sales",
            json!({"items": [], "paymentMethod": "cash"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_create_sale_unknown_product_is_404() {
        let (app, _db) = test_app().await;
        let (status, body) = send_json(
            &app,
            Method::POST,
            "/api/pos/sales",
            json!({
                "items": [{"productId": "no-such-product", "quantity": 1}],
                "paymentMethod": "card"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_order_status_transitions_over_http() {
        let (app, db) = test_app().await;
        let product_id = seed_product(&db, "SCRUB-TOP-CB", None, 10).await;
        let order_id = seed_order(&db, &product_id, OrderStatus::Pending).await;

        let (status, body) = send_json(
            &app,
            Method::PATCH,
            &format!("/api/orders/{order_id}/status"),
            json!({"status": "confirmed"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "confirmed");

        // Skipping ahead is a business-rule violation, not a crash
        let (status, body) = send_json(
            &app,
            Method::PATCH,
            &format!("/api/orders/{order_id}/status"),
            json!({"status": "delivered"}),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "BUSINESS_RULE");
    }

    #[tokio::test]
    async fn test_order_list_filters_by_status() {
        let (app, db) = test_app().await;
        let product_id = seed_product(&db, "SCRUB-TOP-CB", None, 10).await;
        seed_order(&db, &product_id, OrderStatus::Pending).await;
        seed_order(&db, &product_id, OrderStatus::Delivered).await;

        let (status, body) = get_json(&app, "/api/orders?status=pending").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["status"], "pending");

        let (_, all) = get_json(&app, "/api/orders").await;
        assert_eq!(all.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_discount_put_validates_and_round_trips() {
        let (app, _db) = test_app().await;

        let (status, body) = send_json(
            &app,
            Method::PUT,
            "/api/admin/discount",
            json!({"isActive": true, "percentage": 150.0}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");

        let (status, _) = send_json(
            &app,
            Method::PUT,
            "/api/admin/discount",
            json!({"isActive": true, "percentage": 15.0}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = get_json(&app, "/api/admin/discount").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isActive"], true);
        assert_eq!(body["percentageBps"], 1500);
    }

    #[tokio::test]
    async fn test_udhar_payment_recorded_and_listed() {
        let (app, _db) = test_app().await;

        let (status, body) = send_json(
            &app,
            Method::POST,
            "/api/udhar/payments",
            json!({"customerName": "Shifa Clinic", "amount": 1500.0}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["amountPaisa"], 150_000);

        let (status, body) = send_json(
            &app,
            Method::POST,
            "/api/udhar/payments",
            json!({"amount": -50.0}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");

        let (status, body) = get_json(&app, "/api/udhar/payments").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_revenue_report_empty_db_is_all_zeros() {
        let (app, _db) = test_app().await;
        let (status, body) = get_json(&app, "/api/dashboard/revenue").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["today"]["pos"], 0);
        assert_eq!(body["thisMonth"]["web"], 0);
        assert_eq!(body["allTime"]["udhar"], 0);
    }
}
