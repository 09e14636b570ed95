use crate::domain::error::DomainError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;

/// 商品の一意識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductId(Uuid);

impl ProductId {
    /// 新しい一意のProductIdを生成
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// UUIDから ProductId を作成
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// 文字列からProductIdを作成
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        let uuid = Uuid::parse_str(s)?;
        Ok(Self(uuid))
    }

    /// 内部のUUIDを取得
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

/// 注文の一意識別子
/// 注文作成時にランダムな128ビットのトークンとして採番される
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(Uuid);

impl OrderId {
    /// 新しい一意のOrderIdを生成
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// UUIDから OrderId を作成
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// 文字列からOrderIdを作成
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        let uuid = Uuid::parse_str(s)?;
        Ok(Self(uuid))
    }

    /// 内部のUUIDを取得
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

/// カートの一意識別子
/// RESTアダプターがカートストアのキーとして使用する
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartId(Uuid);

impl CartId {
    /// 新しい一意のCartIdを生成
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// UUIDから CartId を作成
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// 内部のUUIDを取得
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for CartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for CartId {
    fn default() -> Self {
        Self::new()
    }
}

/// 通貨
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    /// ブラジルレアル
    #[allow(clippy::upper_case_acronyms)]
    BRL,
}

/// 金額を表す値オブジェクト
/// 10進数演算で保持するため、割引や分割払いの計算で誤差が出ない
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// ブラジルレアルの金額を作成
    pub fn brl(amount: Decimal) -> Self {
        Self {
            amount,
            currency: Currency::BRL,
        }
    }

    /// 0の金額を作成
    pub fn zero() -> Self {
        Self::brl(Decimal::ZERO)
    }

    /// 金額を取得
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// 通貨を文字列として取得
    pub fn currency(&self) -> String {
        match self.currency {
            Currency::BRL => "BRL".to_string(),
        }
    }

    /// 金額を加算
    pub fn add(&self, other: &Money) -> Result<Money, DomainError> {
        if self.currency != other.currency {
            return Err(DomainError::CurrencyMismatch);
        }
        Ok(Money {
            amount: self.amount + other.amount,
            currency: self.currency,
        })
    }

    /// 金額を乗算
    pub fn multiply(&self, factor: u32) -> Money {
        Money {
            amount: self.amount * Decimal::from(factor),
            currency: self.currency,
        }
    }

    /// 金額に係数を掛ける（小数第2位で丸める）
    pub fn scale(&self, factor: Decimal) -> Money {
        Money {
            amount: (self.amount * factor).round_dp(2),
            currency: self.currency,
        }
    }

    /// 金額を等分する（小数第2位で丸める）
    pub fn split(&self, parts: u32) -> Result<Money, DomainError> {
        if parts == 0 {
            return Err(DomainError::InvalidValue(
                "0分割はできません".to_string(),
            ));
        }
        Ok(Money {
            amount: (self.amount / Decimal::from(parts)).round_dp(2),
            currency: self.currency,
        })
    }
}

/// 支払い方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    /// クレジットカード一括払い
    CreditCard,
    /// クレジットカード分割払い（2〜12回）
    CreditCardInstallments,
    /// PIX即時払い（割引あり）
    Pix,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let method_str = match self {
            PaymentMethod::CreditCard => "CreditCard",
            PaymentMethod::CreditCardInstallments => "CreditCardInstallments",
            PaymentMethod::Pix => "Pix",
        };
        write!(f, "{}", method_str)
    }
}

impl PaymentMethod {
    /// 文字列からPaymentMethodを作成
    pub fn from_string(s: &str) -> Result<Self, DomainError> {
        match s {
            "CreditCard" => Ok(PaymentMethod::CreditCard),
            "CreditCardInstallments" => Ok(PaymentMethod::CreditCardInstallments),
            "Pix" => Ok(PaymentMethod::Pix),
            _ => Err(DomainError::InvalidValue(format!(
                "無効な支払い方法: {}",
                s
            ))),
        }
    }
}

/// 注文のステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    /// 保留中（作成直後）
    Pending,
    /// 支払い済み
    Paid,
    /// 発送済み
    Shipped,
    /// 配達完了（終端）
    Delivered,
    /// キャンセル済み（終端）
    Cancelled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status_str = match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Paid => "Paid",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        };
        write!(f, "{}", status_str)
    }
}

impl OrderStatus {
    /// 文字列からOrderStatusを作成
    pub fn from_string(s: &str) -> Result<Self, DomainError> {
        match s {
            "Pending" => Ok(OrderStatus::Pending),
            "Paid" => Ok(OrderStatus::Paid),
            "Shipped" => Ok(OrderStatus::Shipped),
            "Delivered" => Ok(OrderStatus::Delivered),
            "Cancelled" => Ok(OrderStatus::Cancelled),
            _ => Err(DomainError::InvalidValue(format!(
                "無効な注文ステータス: {}",
                s
            ))),
        }
    }

    /// 指定されたステータスへの遷移が許可されているかを返す
    ///
    /// 遷移表:
    /// - Pending   -> Paid, Cancelled
    /// - Paid      -> Shipped, Cancelled
    /// - Shipped   -> Delivered
    /// - Delivered -> （終端）
    /// - Cancelled -> （終端）
    pub fn can_transition_to(&self, target: OrderStatus) -> bool {
        matches!(
            (*self, target),
            (OrderStatus::Pending, OrderStatus::Paid)
                | (OrderStatus::Pending, OrderStatus::Cancelled)
                | (OrderStatus::Paid, OrderStatus::Shipped)
                | (OrderStatus::Paid, OrderStatus::Cancelled)
                | (OrderStatus::Shipped, OrderStatus::Delivered)
        )
    }
}

/// 配送先住所を表す値オブジェクト
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryAddress {
    street: String,
    city: String,
    state: String,
    postal_code: String,
    complement: Option<String>,
}

impl DeliveryAddress {
    /// 新しい配送先住所を作成
    /// バリデーション:
    /// - 郵便番号（CEP）は8桁の数字である必要がある
    /// - 通り、市、州は空でない必要がある
    pub fn new(
        street: String,
        city: String,
        state: String,
        postal_code: String,
        complement: Option<String>,
    ) -> Result<Self, DomainError> {
        if !Self::is_valid_postal_code(&postal_code) {
            return Err(DomainError::InvalidAddress(
                "CEPは8桁の数字である必要があります".to_string(),
            ));
        }

        if street.trim().is_empty() {
            return Err(DomainError::InvalidAddress(
                "通りは空にできません".to_string(),
            ));
        }
        if city.trim().is_empty() {
            return Err(DomainError::InvalidAddress(
                "市は空にできません".to_string(),
            ));
        }
        if state.trim().is_empty() {
            return Err(DomainError::InvalidAddress(
                "州は空にできません".to_string(),
            ));
        }

        Ok(Self {
            street,
            city,
            state,
            postal_code,
            complement,
        })
    }

    /// CEPが有効かチェック（8桁の数字）
    fn is_valid_postal_code(postal_code: &str) -> bool {
        postal_code.len() == 8 && postal_code.chars().all(|c| c.is_ascii_digit())
    }

    /// 通りを取得
    pub fn street(&self) -> &str {
        &self.street
    }

    /// 市を取得
    pub fn city(&self) -> &str {
        &self.city
    }

    /// 州を取得
    pub fn state(&self) -> &str {
        &self.state
    }

    /// CEPを取得
    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    /// 補足情報（建物名など）を取得
    pub fn complement(&self) -> Option<&str> {
        self.complement.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_product_id_creation() {
        let id1 = ProductId::new();
        let id2 = ProductId::new();
        assert_ne!(id1, id2, "Each ProductId should be unique");
    }

    #[test]
    fn test_order_id_creation() {
        let id1 = OrderId::new();
        let id2 = OrderId::new();
        assert_ne!(id1, id2, "Each OrderId should be unique");
    }

    #[test]
    fn test_money_addition() {
        let money1 = Money::brl(dec!(100.00));
        let money2 = Money::brl(dec!(50.50));
        let result = money1.add(&money2).unwrap();
        assert_eq!(result.amount(), dec!(150.50));
    }

    #[test]
    fn test_money_multiplication() {
        let money = Money::brl(dec!(10.50));
        let result = money.multiply(3);
        assert_eq!(result.amount(), dec!(31.50));
    }

    #[test]
    fn test_money_scale_rounds_to_two_decimals() {
        let money = Money::brl(dec!(300.00));
        let result = money.scale(dec!(0.90));
        assert_eq!(result.amount(), dec!(270.00));
    }

    #[test]
    fn test_money_split() {
        let money = Money::brl(dec!(1250.00));
        let result = money.split(6).unwrap();
        assert_eq!(result.amount(), dec!(208.33));
    }

    #[test]
    fn test_money_split_by_zero_fails() {
        let money = Money::brl(dec!(100.00));
        assert!(money.split(0).is_err());
    }

    #[test]
    fn test_money_zero() {
        let money = Money::zero();
        assert_eq!(money.amount(), Decimal::ZERO);
        assert_eq!(money.currency(), "BRL");
    }

    #[test]
    fn test_payment_method_from_string() {
        assert_eq!(
            PaymentMethod::from_string("CreditCard").unwrap(),
            PaymentMethod::CreditCard
        );
        assert_eq!(
            PaymentMethod::from_string("CreditCardInstallments").unwrap(),
            PaymentMethod::CreditCardInstallments
        );
        assert_eq!(
            PaymentMethod::from_string("Pix").unwrap(),
            PaymentMethod::Pix
        );
        assert!(PaymentMethod::from_string("Bitcoin").is_err());
    }

    #[test]
    fn test_order_status_from_string() {
        assert_eq!(
            OrderStatus::from_string("Pending").unwrap(),
            OrderStatus::Pending
        );
        assert_eq!(OrderStatus::from_string("Paid").unwrap(), OrderStatus::Paid);
        assert!(OrderStatus::from_string("pending").is_err());
        assert!(OrderStatus::from_string("").is_err());
    }

    #[test]
    fn test_terminal_statuses_allow_no_transition() {
        let all = [
            OrderStatus::Pending,
            OrderStatus::Paid,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ];
        for target in all {
            assert!(!OrderStatus::Delivered.can_transition_to(target));
            assert!(!OrderStatus::Cancelled.can_transition_to(target));
        }
    }

    #[test]
    fn test_pending_transitions() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Paid));
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Shipped));
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Delivered));
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Pending));
    }

    #[test]
    fn test_delivery_address_valid() {
        let address = DeliveryAddress::new(
            "Avenida Paulista 1000".to_string(),
            "São Paulo".to_string(),
            "SP".to_string(),
            "01310100".to_string(),
            Some("Apto 42".to_string()),
        );
        assert!(address.is_ok());
    }

    #[test]
    fn test_delivery_address_invalid_postal_code() {
        let result = DeliveryAddress::new(
            "Avenida Paulista 1000".to_string(),
            "São Paulo".to_string(),
            "SP".to_string(),
            "0131010".to_string(), // 8桁でない
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_delivery_address_empty_required_field() {
        let result = DeliveryAddress::new(
            "Avenida Paulista 1000".to_string(),
            "".to_string(), // 空の市
            "SP".to_string(),
            "01310100".to_string(),
            None,
        );
        assert!(result.is_err());
    }
}
