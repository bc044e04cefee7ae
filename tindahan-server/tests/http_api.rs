//! HTTP 全链路集成测试 — 路由 + 认证中间件 + handler
//!
//! Run: cargo test -p tindahan-server --test http_api

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use surrealdb::RecordId;
use tempfile::TempDir;
use tower::ServiceExt;

use tindahan_server::auth::{JwtConfig, JwtService};
use tindahan_server::core::{Config, Server, ServerState};
use tindahan_server::db::DbService;
use tindahan_server::db::repository::StoreRepository;

struct HttpContext {
    app: Router,
    jwt: Arc<JwtService>,
    _tmp: TempDir,
}

async fn setup_http(seed_store: bool) -> HttpContext {
    let tmp = tempfile::tempdir().unwrap();
    let db = DbService::new(&tmp.path().join("tindahan.db"))
        .await
        .unwrap()
        .db;

    let jwt_config = JwtConfig {
        secret: "http-test-secret-http-test-secret-http!".to_string(),
        expiration_minutes: 60,
        issuer: "tindahan-server".to_string(),
        audience: "tindahan-clients".to_string(),
    };
    let jwt = Arc::new(JwtService::with_config(jwt_config.clone()));

    let mut config = Config::with_overrides(tmp.path().to_string_lossy().to_string(), 0);
    config.jwt = jwt_config;
    config.timezone = chrono_tz::UTC;

    if seed_store {
        StoreRepository::new(db.clone())
            .create(
                &RecordId::from_table_key("user", "owner1"),
                "Aling Nena Tindahan",
                "09171234567",
            )
            .await
            .unwrap();
    }

    let state = ServerState::new(config, db, jwt.clone());
    let app = Server::build_router(state);

    HttpContext { app, jwt, _tmp: tmp }
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

fn send_json(method: &str, uri: &str, token: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let ctx = setup_http(true).await;
    let response = ctx.app.clone().oneshot(get("/api/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_or_garbage_token_is_unauthorized() {
    let ctx = setup_http(true).await;

    let response = ctx.app.clone().oneshot(get("/api/products", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = ctx
        .app
        .clone()
        .oneshot(get("/api/products", Some("not.a.jwt")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn non_owner_role_is_forbidden() {
    let ctx = setup_http(true).await;
    let token = ctx.jwt.generate_token("staff1", "staff").unwrap();

    let response = ctx
        .app
        .clone()
        .oneshot(get("/api/dashboard?timeframe=today", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn owner_without_store_is_not_found() {
    let ctx = setup_http(false).await;
    let token = ctx.jwt.generate_token("owner1", "owner").unwrap();

    let response = ctx
        .app
        .clone()
        .oneshot(get("/api/inventories", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn checkout_flow_end_to_end() {
    let ctx = setup_http(true).await;
    let token = ctx.jwt.generate_token("owner1", "owner").unwrap();

    // Create a product
    let response = ctx
        .app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/products",
            &token,
            serde_json::json!({
                "price": 100.0,
                "quantity": 20,
                "product_name": "Bigas 5kg",
                "product_description": "Premium rice",
                "product_image": null,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let product = body_json(response).await;
    let product_id = product["id"].as_str().unwrap().to_string();

    // Place an order for 5 units
    let response = ctx
        .app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/orders",
            &token,
            serde_json::json!({
                "order_items": [{ "product": product_id, "quantity": 5 }],
                "order_total": 500.0,
                "order_type": "walk-in",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let order = body_json(response).await;
    assert_eq!(order["order_total"], 500.0);
    let order_id = order["id"].as_str().unwrap().to_string();

    // A second order exceeding remaining stock is a 400
    let response = ctx
        .app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/orders",
            &token,
            serde_json::json!({
                "order_items": [{ "product": product_id, "quantity": 20 }],
                "order_total": 2000.0,
                "order_type": "walk-in",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Dashboard reflects the successful order
    let response = ctx
        .app
        .clone()
        .oneshot(get("/api/dashboard?timeframe=today", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let dashboard = body_json(response).await;
    assert_eq!(dashboard["totalIncome"], 500.0);
    assert_eq!(dashboard["totalBalance"], 500.0);

    // Inventory reconstruction matches the worked scenario
    let response = ctx
        .app
        .clone()
        .oneshot(get("/api/inventories", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let inventories = body_json(response).await;
    assert_eq!(inventories[0]["available_stock"], 15);
    assert_eq!(inventories[0]["quantity_sold"], 5);
    assert_eq!(inventories[0]["quantity_onhand"], 20);
    assert_eq!(inventories[0]["status"], "In Stock");

    // Deleting the order removes its ledger pair; a repeat is a 404
    let uri = format!("/api/orders/{order_id}");
    let response = ctx
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(&uri)
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = ctx
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(&uri)
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn mismatched_totals_and_misplaced_details_are_rejected() {
    let ctx = setup_http(true).await;
    let token = ctx.jwt.generate_token("owner1", "owner").unwrap();

    let response = ctx
        .app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/products",
            &token,
            serde_json::json!({
                "price": 50.0,
                "quantity": 10,
                "product_name": "Toyo",
                "product_description": "Soy sauce",
                "product_image": null,
            }),
        ))
        .await
        .unwrap();
    let product_id = body_json(response).await["id"].as_str().unwrap().to_string();

    // Claimed total disagrees with line totals
    let response = ctx
        .app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/orders",
            &token,
            serde_json::json!({
                "order_items": [{ "product": product_id, "quantity": 2 }],
                "order_total": 120.0,
                "order_type": "walk-in",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Customer details on a walk-in order
    let response = ctx
        .app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/orders",
            &token,
            serde_json::json!({
                "order_items": [{ "product": product_id, "quantity": 2 }],
                "order_total": 100.0,
                "order_type": "walk-in",
                "order_online_details": { "customer_name": "Juan" },
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // An online order with valid details goes through
    let response = ctx
        .app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/orders",
            &token,
            serde_json::json!({
                "order_items": [{ "product": product_id, "quantity": 2 }],
                "order_total": 100.0,
                "order_type": "online",
                "order_online_details": {
                    "customer_name": "Juan Dela Cruz",
                    "customer_phone": "+639171234567",
                    "customer_address": "123 Mabini St",
                },
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Duplicate product name within the store conflicts
    let response = ctx
        .app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/products",
            &token,
            serde_json::json!({
                "price": 50.0,
                "quantity": 3,
                "product_name": "Toyo",
                "product_description": "Soy sauce again",
                "product_image": null,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
