//! Drives `MultiSafepayClient` over real HTTP against a local stub of the API.

use std::net::SocketAddr;

use axum::{
    extract::Path,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use msp_sdk::{MultiSafepayClient, OrderRequest, OrderType, PaymentApi};
use msp_shared::Masked;

const STUB_KEY: &str = "stub-key";

fn authorized(headers: &HeaderMap) -> bool {
    headers.get("api_key").and_then(|v| v.to_str().ok()) == Some(STUB_KEY)
}

fn invalid_key() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "success": false, "data": {}, "error_code": 1032, "error_info": "Invalid API key" })),
    )
}

async fn issuers(Path(code): Path<String>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return invalid_key();
    }
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": [{ "code": "0031", "description": format!("ABN AMRO ({})", code) }]
        })),
    )
}

async fn create_order(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return invalid_key();
    }
    if body["type"] != "redirect" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "error_code": 1000, "error_info": "Unexpected order type" })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": {
                "order_id": body["order_id"],
                "payment_url": format!("https://payv2.multisafepay.com/connect/{}", body["order_id"].as_str().unwrap_or_default())
            }
        })),
    )
}

async fn spawn_stub() -> SocketAddr {
    let router = Router::new()
        .route("/v1/json/issuers/{code}", get(issuers))
        .route("/v1/json/orders", post(create_order));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

fn client(addr: SocketAddr, api_key: &str) -> MultiSafepayClient {
    MultiSafepayClient::new(Masked::from(api_key), false, reqwest::Client::new())
        .with_base_url(format!("http://{}/v1/json/", addr))
}

#[tokio::test]
async fn test_issuers_are_fetched_with_api_key_header() {
    let addr = spawn_stub().await;

    let issuers = client(addr, STUB_KEY).issuers_by_gateway_code("IDEAL").await.unwrap();
    assert_eq!(issuers.len(), 1);
    assert_eq!(issuers[0].code, "0031");
    assert_eq!(issuers[0].description, "ABN AMRO (IDEAL)");
}

#[tokio::test]
async fn test_wrong_api_key_is_reported() {
    let addr = spawn_stub().await;

    let err = client(addr, "other-key").issuers_by_gateway_code("IDEAL").await.unwrap_err();
    assert!(err.is_invalid_api_key());
}

#[tokio::test]
async fn test_create_order_posts_json_body() {
    let addr = spawn_stub().await;

    let request = OrderRequest::new(OrderType::Redirect, "10001", "EUR", 5925);
    let response = client(addr, STUB_KEY).create_order(&request).await.unwrap();
    assert_eq!(response.order_id, "10001");
    assert_eq!(
        response.payment_url.as_deref(),
        Some("https://payv2.multisafepay.com/connect/10001")
    );
}
