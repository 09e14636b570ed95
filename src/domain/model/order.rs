use crate::domain::error::DomainError;
use crate::domain::model::{
    CartLine, DeliveryAddress, Money, OrderId, OrderStatus, PaymentMethod, ProductId,
};

use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// 注文集約
/// 注文のライフサイクルを管理し、状態遷移のルールを適用する
///
/// 明細は作成時点のカートのスナップショット。マッピング自体は独立しているが、
/// 各明細はカタログの商品そのものへの参照を持つ
#[derive(Debug, Clone)]
pub struct Order {
    id: OrderId,
    lines: HashMap<ProductId, CartLine>,
    payment_method: PaymentMethod,
    installments: u32,
    total_amount: Money,
    delivery_address: DeliveryAddress,
    status: OrderStatus,
    created_at: DateTime<Utc>,
    paid_at: Option<DateTime<Utc>>,
    shipped_at: Option<DateTime<Utc>>,
}

impl Order {
    /// 新しい注文を作成
    /// 初期ステータスはPending
    pub fn new(
        id: OrderId,
        lines: HashMap<ProductId, CartLine>,
        payment_method: PaymentMethod,
        installments: u32,
        total_amount: Money,
        delivery_address: DeliveryAddress,
    ) -> Self {
        Self {
            id,
            lines,
            payment_method,
            installments,
            total_amount,
            delivery_address,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            paid_at: None,
            shipped_at: None,
        }
    }

    /// 注文IDを取得
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// 明細のスナップショットを取得
    pub fn lines(&self) -> &HashMap<ProductId, CartLine> {
        &self.lines
    }

    /// 支払い方法を取得
    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// 分割払いの回数を取得
    pub fn installments(&self) -> u32 {
        self.installments
    }

    /// 作成時に記録された合計金額を取得
    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    /// 配送先住所を取得
    pub fn delivery_address(&self) -> &DeliveryAddress {
        &self.delivery_address
    }

    /// 注文ステータスを取得
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// 作成日時を取得
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// 支払い日時を取得
    pub fn paid_at(&self) -> Option<DateTime<Utc>> {
        self.paid_at
    }

    /// 発送日時を取得
    pub fn shipped_at(&self) -> Option<DateTime<Utc>> {
        self.shipped_at
    }

    /// 注文のステータスを遷移させる
    ///
    /// 遷移表で許可されていない遷移はInvalidTransitionとなり、
    /// 現在のステータスと要求されたステータスの両方をエラーに含める。
    ///
    /// 副作用: Paidへの遷移時はpaid_atを、Shippedへの遷移時はshipped_atを
    /// 記録する（未設定の場合のみ）。在庫や支払いには一切触れない。
    pub fn transition(&mut self, target: OrderStatus) -> Result<(), DomainError> {
        if !self.status.can_transition_to(target) {
            return Err(DomainError::InvalidTransition {
                from: self.status,
                to: target,
            });
        }

        self.status = target;

        match target {
            OrderStatus::Paid => {
                if self.paid_at.is_none() {
                    self.paid_at = Some(Utc::now());
                }
            }
            OrderStatus::Shipped => {
                if self.shipped_at.is_none() {
                    self.shipped_at = Some(Utc::now());
                }
            }
            _ => {}
        }

        Ok(())
    }
}
