use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::adapter::driven::InMemoryOrderRegistry;
use crate::adapter::driver::request_dto::{
    AddCartItemRequest, CheckoutRequest, CreateProductRequest, OrdersQueryParams,
    RemoveItemQueryParams,
};
use crate::adapter::driver::response_dto::{
    CartResponse, OrderDetailResponse, OrderSummaryResponse, ProductResponse,
};
use crate::application::service::{CatalogApplicationService, OrderApplicationService};
use crate::application::ApplicationError;
use crate::domain::error::DomainError;
use crate::domain::model::{
    Cart, CartId, DeliveryAddress, Money, OrderId, OrderStatus, PaymentMethod, ProductId,
};

// REST API用のレスポンスDTO
#[derive(Serialize, Deserialize)]
pub struct CreateProductResponse {
    pub product_id: Uuid,
}

#[derive(Serialize, Deserialize)]
pub struct CreateCartResponse {
    pub cart_id: Uuid,
}

#[derive(Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub order_id: Uuid,
}

#[derive(Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

// アプリケーションサービスとカートストアを含む状態
pub type AppState = AppStateInner;

#[derive(Clone)]
pub struct AppStateInner {
    pub catalog_service: Arc<CatalogApplicationService>,
    pub order_service: Arc<OrderApplicationService<InMemoryOrderRegistry>>,
    /// RESTセッション用のインメモリカートストア
    pub carts: Arc<RwLock<HashMap<CartId, Cart>>>,
}

// REST APIルーターを作成
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/products", post(create_product).get(get_products))
        .route("/products/:product_id", get(get_product_by_id))
        .route("/carts", post(create_cart))
        .route("/carts/:cart_id", get(get_cart))
        .route("/carts/:cart_id/items", post(add_cart_item))
        .route(
            "/carts/:cart_id/items/:product_id",
            delete(remove_cart_item),
        )
        .route("/carts/:cart_id/checkout", post(checkout))
        .route("/orders", get(get_orders))
        .route("/orders/:order_id", get(get_order_by_id))
        .route("/orders/:order_id/cancel", post(cancel_order))
        .route("/orders/:order_id/ship", post(mark_order_as_shipped))
        .route("/orders/:order_id/deliver", post(mark_order_as_delivered))
}

// ヘルスチェックエンドポイント
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "ecommerce-order-management",
        "version": "0.1.0"
    }))
}

// 商品登録エンドポイント
async fn create_product(
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<CreateProductResponse>), (StatusCode, Json<ApiError>)> {
    let price = Money::brl(request.price);

    match state
        .catalog_service
        .register_product(
            request.name,
            request.description,
            price,
            request.stock,
            request.category,
        )
        .await
    {
        Ok(product_id) => Ok((
            StatusCode::CREATED,
            Json(CreateProductResponse {
                product_id: product_id.as_uuid(),
            }),
        )),
        Err(err) => Err(map_application_error(err)),
    }
}

// 商品一覧取得エンドポイント
async fn get_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, (StatusCode, Json<ApiError>)> {
    match state.catalog_service.get_all_products().await {
        Ok(products) => {
            let response: Vec<ProductResponse> = products
                .iter()
                .map(ProductResponse::from_shared_product)
                .collect();
            Ok(Json(response))
        }
        Err(err) => Err(map_application_error(err)),
    }
}

// 商品詳細取得エンドポイント
async fn get_product_by_id(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> Result<Json<ProductResponse>, (StatusCode, Json<ApiError>)> {
    let product_id = ProductId::from_uuid(product_id);

    match state.catalog_service.get_product_by_id(product_id).await {
        Ok(Some(product)) => Ok(Json(ProductResponse::from_shared_product(&product))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiError {
                error: "指定された商品が見つかりません".to_string(),
                code: "PRODUCT_NOT_FOUND".to_string(),
            }),
        )),
        Err(err) => Err(map_application_error(err)),
    }
}

// カート作成エンドポイント
async fn create_cart(State(state): State<AppState>) -> Json<CreateCartResponse> {
    let cart_id = CartId::new();
    let mut carts = state.carts.write().await;
    carts.insert(cart_id, Cart::new());

    Json(CreateCartResponse {
        cart_id: cart_id.as_uuid(),
    })
}

// カート詳細取得エンドポイント
async fn get_cart(
    State(state): State<AppState>,
    Path(cart_id): Path<Uuid>,
) -> Result<Json<CartResponse>, (StatusCode, Json<ApiError>)> {
    let cart_id = CartId::from_uuid(cart_id);
    let carts = state.carts.read().await;

    match carts.get(&cart_id) {
        Some(cart) => Ok(Json(CartResponse::from_cart(cart_id, cart))),
        None => Err(cart_not_found()),
    }
}

// カートに商品を追加するエンドポイント
async fn add_cart_item(
    State(state): State<AppState>,
    Path(cart_id): Path<Uuid>,
    Json(request): Json<AddCartItemRequest>,
) -> Result<StatusCode, (StatusCode, Json<ApiError>)> {
    let cart_id = CartId::from_uuid(cart_id);
    let product_id = ProductId::from_uuid(request.product_id);

    let product = match state.catalog_service.get_product_by_id(product_id).await {
        Ok(Some(product)) => product,
        Ok(None) => {
            return Err((
                StatusCode::NOT_FOUND,
                Json(ApiError {
                    error: "指定された商品が見つかりません".to_string(),
                    code: "PRODUCT_NOT_FOUND".to_string(),
                }),
            ))
        }
        Err(err) => return Err(map_application_error(err)),
    };

    let mut carts = state.carts.write().await;
    let cart = match carts.get_mut(&cart_id) {
        Some(cart) => cart,
        None => return Err(cart_not_found()),
    };

    match cart.add(product, request.quantity) {
        Ok(()) => Ok(StatusCode::OK),
        Err(err) => Err(map_domain_error(err)),
    }
}

// カートから商品を削除するエンドポイント
async fn remove_cart_item(
    State(state): State<AppState>,
    Path((cart_id, product_id)): Path<(Uuid, Uuid)>,
    Query(params): Query<RemoveItemQueryParams>,
) -> Result<StatusCode, (StatusCode, Json<ApiError>)> {
    let cart_id = CartId::from_uuid(cart_id);
    let product_id = ProductId::from_uuid(product_id);

    let mut carts = state.carts.write().await;
    let cart = match carts.get_mut(&cart_id) {
        Some(cart) => cart,
        None => return Err(cart_not_found()),
    };

    // 存在しない商品IDの場合は何もしない
    cart.remove(product_id, params.quantity);
    Ok(StatusCode::OK)
}

// チェックアウトエンドポイント
async fn checkout(
    State(state): State<AppState>,
    Path(cart_id): Path<Uuid>,
    Json(request): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, (StatusCode, Json<ApiError>)> {
    let cart_id = CartId::from_uuid(cart_id);

    let payment_method = match PaymentMethod::from_string(&request.payment_method) {
        Ok(method) => method,
        Err(_) => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ApiError {
                    error: format!("無効な支払い方法: {}", request.payment_method),
                    code: "INVALID_PAYMENT_METHOD".to_string(),
                }),
            ))
        }
    };

    let address = request.delivery_address;
    let delivery_address = match DeliveryAddress::new(
        address.street,
        address.city,
        address.state,
        address.postal_code,
        address.complement,
    ) {
        Ok(addr) => addr,
        Err(err) => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ApiError {
                    error: format!("Invalid delivery address: {}", err),
                    code: "INVALID_ADDRESS".to_string(),
                }),
            ))
        }
    };

    let mut carts = state.carts.write().await;
    let cart = match carts.get_mut(&cart_id) {
        Some(cart) => cart,
        None => return Err(cart_not_found()),
    };

    match state
        .order_service
        .create_order(cart, payment_method, delivery_address, request.installments)
        .await
    {
        Ok(order_id) => Ok(Json(CheckoutResponse {
            order_id: order_id.as_uuid(),
        })),
        Err(err) => Err(map_application_error(err)),
    }
}

// 注文一覧取得エンドポイント
async fn get_orders(
    State(state): State<AppState>,
    Query(params): Query<OrdersQueryParams>,
) -> Result<Json<Vec<OrderSummaryResponse>>, (StatusCode, Json<ApiError>)> {
    let orders = if let Some(status_str) = params.status {
        let status = match OrderStatus::from_string(&status_str) {
            Ok(status) => status,
            Err(_) => {
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(ApiError {
                        error: format!("無効なステータス値: {}", status_str),
                        code: "INVALID_STATUS".to_string(),
                    }),
                ))
            }
        };

        match state.order_service.get_orders_by_status(status).await {
            Ok(orders) => orders,
            Err(err) => return Err(map_application_error(err)),
        }
    } else {
        match state.order_service.get_all_orders().await {
            Ok(orders) => orders,
            Err(err) => return Err(map_application_error(err)),
        }
    };

    let response: Vec<OrderSummaryResponse> =
        orders.iter().map(OrderSummaryResponse::from_order).collect();

    Ok(Json(response))
}

// 注文詳細取得エンドポイント
async fn get_order_by_id(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<Json<OrderDetailResponse>, (StatusCode, Json<ApiError>)> {
    let order_id = OrderId::from_uuid(order_id);

    match state.order_service.get_order_by_id(order_id).await {
        Ok(Some(order)) => Ok(Json(OrderDetailResponse::from_order(&order))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiError {
                error: "指定された注文が見つかりません".to_string(),
                code: "ORDER_NOT_FOUND".to_string(),
            }),
        )),
        Err(err) => Err(map_application_error(err)),
    }
}

// 注文キャンセルエンドポイント
async fn cancel_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, Json<ApiError>)> {
    let order_id = OrderId::from_uuid(order_id);

    match state.order_service.cancel_order(order_id).await {
        Ok(()) => Ok(StatusCode::OK),
        Err(err) => Err(map_application_error(err)),
    }
}

// 注文発送エンドポイント
async fn mark_order_as_shipped(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, Json<ApiError>)> {
    let order_id = OrderId::from_uuid(order_id);

    match state.order_service.mark_order_as_shipped(order_id).await {
        Ok(()) => Ok(StatusCode::OK),
        Err(err) => Err(map_application_error(err)),
    }
}

// 注文配達完了エンドポイント
async fn mark_order_as_delivered(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, Json<ApiError>)> {
    let order_id = OrderId::from_uuid(order_id);

    match state.order_service.mark_order_as_delivered(order_id).await {
        Ok(()) => Ok(StatusCode::OK),
        Err(err) => Err(map_application_error(err)),
    }
}

// カート未検出エラー
fn cart_not_found() -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiError {
            error: "指定されたカートが見つかりません".to_string(),
            code: "CART_NOT_FOUND".to_string(),
        }),
    )
}

// アプリケーションエラーをHTTPエラーにマッピング
fn map_application_error(err: ApplicationError) -> (StatusCode, Json<ApiError>) {
    match err {
        ApplicationError::Domain(domain_err) => map_domain_error(domain_err),
        ApplicationError::Registry(registry_err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError {
                error: format!("{}", registry_err),
                code: "REGISTRY_ERROR".to_string(),
            }),
        ),
        ApplicationError::Publisher(publisher_err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError {
                error: format!("{}", publisher_err),
                code: "PUBLISHER_ERROR".to_string(),
            }),
        ),
        ApplicationError::PaymentFailed(reason) => (
            StatusCode::PAYMENT_REQUIRED,
            Json(ApiError {
                error: format!("支払いが承認されませんでした: {}", reason),
                code: "PAYMENT_FAILED".to_string(),
            }),
        ),
        ApplicationError::OrderNotFound(order_id) => (
            StatusCode::NOT_FOUND,
            Json(ApiError {
                error: format!("指定された注文が見つかりません: {}", order_id),
                code: "ORDER_NOT_FOUND".to_string(),
            }),
        ),
        ApplicationError::ProductNotFound(product_id) => (
            StatusCode::NOT_FOUND,
            Json(ApiError {
                error: format!("指定された商品が見つかりません: {}", product_id),
                code: "PRODUCT_NOT_FOUND".to_string(),
            }),
        ),
    }
}

// ドメインエラーを適切なHTTPステータスコードとエラーコードにマッピング
fn map_domain_error(domain_err: DomainError) -> (StatusCode, Json<ApiError>) {
    match domain_err {
        DomainError::InsufficientStock { available } => (
            StatusCode::BAD_REQUEST,
            Json(ApiError {
                error: format!("在庫不足です。利用可能: {}", available),
                code: "INSUFFICIENT_STOCK".to_string(),
            }),
        ),
        DomainError::InvalidTransition { from, to } => (
            StatusCode::BAD_REQUEST,
            Json(ApiError {
                error: format!("{}から{}へは遷移できません", from, to),
                code: "INVALID_TRANSITION".to_string(),
            }),
        ),
        DomainError::EmptyCart => (
            StatusCode::BAD_REQUEST,
            Json(ApiError {
                error: "カートが空です".to_string(),
                code: "EMPTY_CART".to_string(),
            }),
        ),
        DomainError::InvalidQuantity => (
            StatusCode::BAD_REQUEST,
            Json(ApiError {
                error: "無効な数量です".to_string(),
                code: "INVALID_QUANTITY".to_string(),
            }),
        ),
        DomainError::InvalidInstallmentCount(count) => (
            StatusCode::BAD_REQUEST,
            Json(ApiError {
                error: format!("分割回数は2〜12回である必要があります: {}", count),
                code: "INVALID_INSTALLMENT_COUNT".to_string(),
            }),
        ),
        DomainError::InvalidAddress(msg) => (
            StatusCode::BAD_REQUEST,
            Json(ApiError {
                error: msg,
                code: "INVALID_ADDRESS".to_string(),
            }),
        ),
        DomainError::CurrencyMismatch => (
            StatusCode::BAD_REQUEST,
            Json(ApiError {
                error: "通貨が一致しません".to_string(),
                code: "CURRENCY_MISMATCH".to_string(),
            }),
        ),
        DomainError::InvalidValue(msg) => (
            StatusCode::BAD_REQUEST,
            Json(ApiError {
                error: msg,
                code: "INVALID_VALUE".to_string(),
            }),
        ),
    }
}
