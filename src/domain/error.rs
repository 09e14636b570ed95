use crate::domain::model::OrderStatus;

/// ドメイン層のエラー型
/// ビジネスルール違反を表現する
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// 在庫不足（利用可能な数量を保持する）
    InsufficientStock { available: u32 },
    /// 無効な状態遷移（例: 配達完了の注文をキャンセルしようとした）
    InvalidTransition { from: OrderStatus, to: OrderStatus },
    /// 空のカートで注文を作成しようとした
    EmptyCart,
    /// 無効な数量（例: 0の数量）
    InvalidQuantity,
    /// 分割払いの回数が許容範囲（2〜12回）の外
    InvalidInstallmentCount(u32),
    /// 無効な配送先住所（例: CEPが8桁でない）
    InvalidAddress(String),
    /// 通貨の不一致
    CurrencyMismatch,
    /// 無効な値
    InvalidValue(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::InsufficientStock { available } => {
                write!(f, "Insufficient stock: {} available", available)
            }
            DomainError::InvalidTransition { from, to } => {
                write!(f, "Invalid transition: {} -> {}", from, to)
            }
            DomainError::EmptyCart => write!(f, "Cart is empty"),
            DomainError::InvalidQuantity => write!(f, "Invalid quantity"),
            DomainError::InvalidInstallmentCount(count) => {
                write!(f, "Invalid installment count: {}", count)
            }
            DomainError::InvalidAddress(msg) => write!(f, "Invalid address: {}", msg),
            DomainError::CurrencyMismatch => write!(f, "Currency mismatch"),
            DomainError::InvalidValue(msg) => write!(f, "Invalid value: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
