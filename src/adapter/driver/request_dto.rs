use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 商品登録用のリクエストDTO
#[derive(Serialize, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: u32,
    pub category: String,
}

/// カート追加用のリクエストDTO
#[derive(Serialize, Deserialize)]
pub struct AddCartItemRequest {
    pub product_id: Uuid,
    pub quantity: u32,
}

/// 配送先住所のリクエストDTO
#[derive(Serialize, Deserialize)]
pub struct DeliveryAddressRequest {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub complement: Option<String>,
}

/// チェックアウト用のリクエストDTO
#[derive(Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub payment_method: String,
    #[serde(default = "default_installments")]
    pub installments: u32,
    pub delivery_address: DeliveryAddressRequest,
}

/// 分割払い以外の支払い方法で使用されるデフォルト値
fn default_installments() -> u32 {
    1
}

/// カート明細削除用のクエリパラメータ
#[derive(Deserialize)]
pub struct RemoveItemQueryParams {
    pub quantity: Option<u32>,
}

/// 注文一覧取得用のクエリパラメータ
#[derive(Deserialize)]
pub struct OrdersQueryParams {
    pub status: Option<String>,
}
