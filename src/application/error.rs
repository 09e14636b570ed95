use crate::domain::error::DomainError;
use crate::domain::model::{OrderId, ProductId};
use crate::domain::port::{PublisherError, RegistryError};

/// アプリケーション層のエラー型
/// ドメインエラー、レジストリエラー、支払い・検索の失敗をラップする
#[derive(Debug)]
pub enum ApplicationError {
    /// ドメインエラー（ビジネスルール違反）
    Domain(DomainError),
    /// レジストリエラー（カタログ・注文レジストリの失敗）
    Registry(RegistryError),
    /// イベント発行エラー
    Publisher(PublisherError),
    /// 支払いが承認されなかった
    PaymentFailed(String),
    /// 注文が見つからない
    OrderNotFound(OrderId),
    /// 商品が見つからない
    ProductNotFound(ProductId),
}

impl std::fmt::Display for ApplicationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApplicationError::Domain(err) => write!(f, "Domain error: {}", err),
            ApplicationError::Registry(err) => write!(f, "Registry error: {}", err),
            ApplicationError::Publisher(err) => write!(f, "Publisher error: {}", err),
            ApplicationError::PaymentFailed(reason) => {
                write!(f, "Payment failed: {}", reason)
            }
            ApplicationError::OrderNotFound(order_id) => {
                write!(f, "Order not found: {}", order_id)
            }
            ApplicationError::ProductNotFound(product_id) => {
                write!(f, "Product not found: {}", product_id)
            }
        }
    }
}

impl std::error::Error for ApplicationError {}

// From実装でエラー変換を簡潔に
impl From<DomainError> for ApplicationError {
    fn from(err: DomainError) -> Self {
        ApplicationError::Domain(err)
    }
}

impl From<RegistryError> for ApplicationError {
    fn from(err: RegistryError) -> Self {
        ApplicationError::Registry(err)
    }
}

impl From<PublisherError> for ApplicationError {
    fn from(err: PublisherError) -> Self {
        ApplicationError::Publisher(err)
    }
}
