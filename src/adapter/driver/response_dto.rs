use crate::domain::model::{
    Cart, CartId, CartLine, DeliveryAddress, Order, ProductId, SharedProduct,
};
use serde::Serialize;

/// 商品用のレスポンスDTO
#[derive(Serialize)]
pub struct ProductResponse {
    pub product_id: String,
    pub name: String,
    pub description: String,
    pub price_amount: String,
    pub price_currency: String,
    pub stock: u32,
    pub category: String,
}

/// カート明細用のレスポンスDTO
#[derive(Serialize)]
pub struct CartLineResponse {
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price_amount: String,
    pub unit_price_currency: String,
    pub subtotal_amount: String,
    pub subtotal_currency: String,
}

/// カート用のレスポンスDTO
#[derive(Serialize)]
pub struct CartResponse {
    pub cart_id: String,
    pub lines: Vec<CartLineResponse>,
    pub total_amount: String,
    pub total_currency: String,
}

/// 配送先住所用のレスポンスDTO
#[derive(Serialize)]
pub struct DeliveryAddressResponse {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub complement: Option<String>,
}

/// 注文一覧用のレスポンスDTO
#[derive(Serialize)]
pub struct OrderSummaryResponse {
    pub order_id: String,
    pub status: String,
    pub payment_method: String,
    pub total_amount: String,
    pub total_currency: String,
    pub created_at: String,
}

/// 注文詳細用のレスポンスDTO
#[derive(Serialize)]
pub struct OrderDetailResponse {
    pub order_id: String,
    pub status: String,
    pub payment_method: String,
    pub installments: u32,
    pub lines: Vec<CartLineResponse>,
    pub delivery_address: DeliveryAddressResponse,
    pub total_amount: String,
    pub total_currency: String,
    pub created_at: String,
    pub paid_at: Option<String>,
    pub shipped_at: Option<String>,
}

impl ProductResponse {
    /// 共有ハンドルからProductResponseを作成
    pub fn from_shared_product(product: &SharedProduct) -> Self {
        let product = product.read().expect("商品ロックの取得に失敗しました");
        let price = product.price();
        Self {
            product_id: product.id().to_string(),
            name: product.name().to_string(),
            description: product.description().to_string(),
            price_amount: price.amount().to_string(),
            price_currency: price.currency(),
            stock: product.stock(),
            category: product.category().to_string(),
        }
    }
}

impl CartLineResponse {
    /// カート明細からCartLineResponseを作成
    pub fn from_line(product_id: &ProductId, line: &CartLine) -> Self {
        let subtotal = line.subtotal();
        let (product_name, unit_price) = {
            let product = line
                .product()
                .read()
                .expect("商品ロックの取得に失敗しました");
            (product.name().to_string(), product.price())
        };
        Self {
            product_id: product_id.to_string(),
            product_name,
            quantity: line.quantity(),
            unit_price_amount: unit_price.amount().to_string(),
            unit_price_currency: unit_price.currency(),
            subtotal_amount: subtotal.amount().to_string(),
            subtotal_currency: subtotal.currency(),
        }
    }
}

impl CartResponse {
    /// カートからCartResponseを作成
    pub fn from_cart(cart_id: CartId, cart: &Cart) -> Self {
        let lines: Vec<CartLineResponse> = cart
            .lines()
            .iter()
            .map(|(product_id, line)| CartLineResponse::from_line(product_id, line))
            .collect();

        let total = cart.total();
        Self {
            cart_id: cart_id.to_string(),
            lines,
            total_amount: total.amount().to_string(),
            total_currency: total.currency(),
        }
    }
}

impl DeliveryAddressResponse {
    /// ドメインオブジェクトからDeliveryAddressResponseを作成
    pub fn from_delivery_address(address: &DeliveryAddress) -> Self {
        Self {
            street: address.street().to_string(),
            city: address.city().to_string(),
            state: address.state().to_string(),
            postal_code: address.postal_code().to_string(),
            complement: address.complement().map(|s| s.to_string()),
        }
    }
}

impl OrderSummaryResponse {
    /// ドメインオブジェクトからOrderSummaryResponseを作成
    pub fn from_order(order: &Order) -> Self {
        let total = order.total_amount();
        Self {
            order_id: order.id().to_string(),
            status: order.status().to_string(),
            payment_method: order.payment_method().to_string(),
            total_amount: total.amount().to_string(),
            total_currency: total.currency(),
            created_at: order.created_at().to_rfc3339(),
        }
    }
}

impl OrderDetailResponse {
    /// ドメインオブジェクトからOrderDetailResponseを作成
    pub fn from_order(order: &Order) -> Self {
        let lines: Vec<CartLineResponse> = order
            .lines()
            .iter()
            .map(|(product_id, line)| CartLineResponse::from_line(product_id, line))
            .collect();

        let total = order.total_amount();
        Self {
            order_id: order.id().to_string(),
            status: order.status().to_string(),
            payment_method: order.payment_method().to_string(),
            installments: order.installments(),
            lines,
            delivery_address: DeliveryAddressResponse::from_delivery_address(
                order.delivery_address(),
            ),
            total_amount: total.amount().to_string(),
            total_currency: total.currency(),
            created_at: order.created_at().to_rfc3339(),
            paid_at: order.paid_at().map(|t| t.to_rfc3339()),
            shipped_at: order.shipped_at().map(|t| t.to_rfc3339()),
        }
    }
}
