// REST APIの統合テスト
// axum-testでルーター全体をHTTPレベルで検証する

use axum_test::TestServer;
use serde_json::{json, Value};

use ecommerce_order_management::adapter::driven::{
    ConsoleEventPublisher, ConsoleLogger, InMemoryOrderRegistry, InMemoryProductCatalog,
};
use ecommerce_order_management::adapter::driver::rest_api::{create_router, AppStateInner};
use ecommerce_order_management::application::service::{
    CatalogApplicationService, OrderApplicationService,
};
use ecommerce_order_management::domain::payment::PaymentProcessor;

use axum::http::StatusCode;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

fn test_server() -> TestServer {
    let catalog_service =
        CatalogApplicationService::new(Arc::new(InMemoryProductCatalog::new()));
    let order_service = OrderApplicationService::new(
        InMemoryOrderRegistry::new(),
        Arc::new(PaymentProcessor::new()),
        Arc::new(ConsoleEventPublisher::new()),
        Arc::new(ConsoleLogger::new()),
    );

    let state = AppStateInner {
        catalog_service: Arc::new(catalog_service),
        order_service: Arc::new(order_service),
        carts: Arc::new(RwLock::new(HashMap::new())),
    };

    let app = create_router().with_state(state);
    TestServer::new(app).unwrap()
}

fn delivery_address_json() -> Value {
    json!({
        "street": "Avenida Paulista 1000",
        "city": "São Paulo",
        "state": "SP",
        "postal_code": "01310100",
        "complement": null
    })
}

async fn register_product(server: &TestServer, price: &str, stock: u32) -> String {
    let response = server
        .post("/products")
        .json(&json!({
            "name": "Notebook",
            "description": "Notebook 15 polegadas",
            "price": price,
            "stock": stock,
            "category": "Eletrônicos"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let body: Value = response.json();
    body["product_id"].as_str().unwrap().to_string()
}

async fn create_cart(server: &TestServer) -> String {
    let response = server.post("/carts").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    body["cart_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_check_reports_healthy() {
    let server = test_server();

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "ecommerce-order-management");
}

#[tokio::test]
async fn full_checkout_round_trip() {
    let server = test_server();

    let product_id = register_product(&server, "100.00", 10).await;
    let cart_id = create_cart(&server).await;

    // 商品をカートへ追加
    let response = server
        .post(&format!("/carts/{}/items", cart_id))
        .json(&json!({ "product_id": product_id, "quantity": 3 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    // カートの合計を確認
    let response = server.get(&format!("/carts/{}", cart_id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let cart: Value = response.json();
    assert_eq!(cart["total_amount"], "300.00");
    assert_eq!(cart["lines"].as_array().unwrap().len(), 1);

    // PIXでチェックアウト
    let response = server
        .post(&format!("/carts/{}/checkout", cart_id))
        .json(&json!({
            "payment_method": "Pix",
            "delivery_address": delivery_address_json()
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    let order_id = body["order_id"].as_str().unwrap().to_string();

    // 注文は支払い済み
    let response = server.get(&format!("/orders/{}", order_id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let order: Value = response.json();
    assert_eq!(order["status"], "Paid");
    assert_eq!(order["total_amount"], "300.00");
    assert!(order["paid_at"].is_string());

    // 在庫は引き落とされている
    let response = server.get(&format!("/products/{}", product_id)).await;
    let product: Value = response.json();
    assert_eq!(product["stock"], 7);

    // カートは空になっている
    let response = server.get(&format!("/carts/{}", cart_id)).await;
    let cart: Value = response.json();
    assert_eq!(cart["lines"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn checkout_with_empty_cart_returns_empty_cart_code() {
    let server = test_server();
    let cart_id = create_cart(&server).await;

    let response = server
        .post(&format!("/carts/{}/checkout", cart_id))
        .json(&json!({
            "payment_method": "CreditCard",
            "delivery_address": delivery_address_json()
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "EMPTY_CART");
}

#[tokio::test]
async fn checkout_with_invalid_payment_method_is_rejected() {
    let server = test_server();
    let cart_id = create_cart(&server).await;

    let response = server
        .post(&format!("/carts/{}/checkout", cart_id))
        .json(&json!({
            "payment_method": "Bitcoin",
            "delivery_address": delivery_address_json()
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_PAYMENT_METHOD");
}

#[tokio::test]
async fn checkout_with_invalid_installments_is_rejected() {
    let server = test_server();

    let product_id = register_product(&server, "100.00", 10).await;
    let cart_id = create_cart(&server).await;

    server
        .post(&format!("/carts/{}/items", cart_id))
        .json(&json!({ "product_id": product_id, "quantity": 1 }))
        .await;

    let response = server
        .post(&format!("/carts/{}/checkout", cart_id))
        .json(&json!({
            "payment_method": "CreditCardInstallments",
            "installments": 13,
            "delivery_address": delivery_address_json()
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_INSTALLMENT_COUNT");
}

#[tokio::test]
async fn adding_more_than_stock_is_rejected() {
    let server = test_server();

    let product_id = register_product(&server, "50.00", 2).await;
    let cart_id = create_cart(&server).await;

    let response = server
        .post(&format!("/carts/{}/items", cart_id))
        .json(&json!({ "product_id": product_id, "quantity": 5 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "INSUFFICIENT_STOCK");
}

#[tokio::test]
async fn adding_unknown_product_returns_404() {
    let server = test_server();
    let cart_id = create_cart(&server).await;

    let response = server
        .post(&format!("/carts/{}/items", cart_id))
        .json(&json!({
            "product_id": "00000000-0000-0000-0000-000000000000",
            "quantity": 1
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["code"], "PRODUCT_NOT_FOUND");
}

#[tokio::test]
async fn cancel_restores_stock_through_the_api() {
    let server = test_server();

    let product_id = register_product(&server, "100.00", 10).await;
    let cart_id = create_cart(&server).await;

    server
        .post(&format!("/carts/{}/items", cart_id))
        .json(&json!({ "product_id": product_id, "quantity": 4 }))
        .await;

    let response = server
        .post(&format!("/carts/{}/checkout", cart_id))
        .json(&json!({
            "payment_method": "CreditCard",
            "delivery_address": delivery_address_json()
        }))
        .await;
    let body: Value = response.json();
    let order_id = body["order_id"].as_str().unwrap().to_string();

    let response = server.get(&format!("/products/{}", product_id)).await;
    let product: Value = response.json();
    assert_eq!(product["stock"], 6);

    let response = server.post(&format!("/orders/{}/cancel", order_id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = server.get(&format!("/products/{}", product_id)).await;
    let product: Value = response.json();
    assert_eq!(product["stock"], 10);

    let response = server.get(&format!("/orders/{}", order_id)).await;
    let order: Value = response.json();
    assert_eq!(order["status"], "Cancelled");
}

#[tokio::test]
async fn cancelling_unknown_order_returns_404() {
    let server = test_server();

    let response = server
        .post("/orders/00000000-0000-0000-0000-000000000000/cancel")
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["code"], "ORDER_NOT_FOUND");
}

#[tokio::test]
async fn ship_deliver_and_filter_orders_by_status() {
    let server = test_server();

    let product_id = register_product(&server, "100.00", 10).await;
    let cart_id = create_cart(&server).await;

    server
        .post(&format!("/carts/{}/items", cart_id))
        .json(&json!({ "product_id": product_id, "quantity": 1 }))
        .await;

    let response = server
        .post(&format!("/carts/{}/checkout", cart_id))
        .json(&json!({
            "payment_method": "Pix",
            "delivery_address": delivery_address_json()
        }))
        .await;
    let body: Value = response.json();
    let order_id = body["order_id"].as_str().unwrap().to_string();

    let response = server.post(&format!("/orders/{}/ship", order_id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = server.post(&format!("/orders/{}/deliver", order_id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = server.get("/orders").add_query_param("status", "Delivered").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let orders: Value = response.json();
    assert_eq!(orders.as_array().unwrap().len(), 1);
    assert_eq!(orders[0]["order_id"], order_id.as_str());

    // 配達完了後のキャンセルは状態遷移違反
    let response = server.post(&format!("/orders/{}/cancel", order_id)).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_TRANSITION");
}

#[tokio::test]
async fn removing_item_from_cart() {
    let server = test_server();

    let product_id = register_product(&server, "100.00", 10).await;
    let cart_id = create_cart(&server).await;

    server
        .post(&format!("/carts/{}/items", cart_id))
        .json(&json!({ "product_id": product_id, "quantity": 3 }))
        .await;

    let response = server
        .delete(&format!("/carts/{}/items/{}", cart_id, product_id))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = server.get(&format!("/carts/{}", cart_id)).await;
    let cart: Value = response.json();
    assert_eq!(cart["lines"].as_array().unwrap().len(), 0);
    assert_eq!(cart["total_amount"], "0");
}

#[tokio::test]
async fn unknown_cart_returns_404() {
    let server = test_server();

    let response = server
        .get("/carts/00000000-0000-0000-0000-000000000000")
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["code"], "CART_NOT_FOUND");
}
