use crate::domain::model::{DeliveryAddress, Money, OrderId, PaymentMethod};
use chrono::{DateTime, Utc};

/// ドメインイベント列挙型
/// ビジネス上の重要なイベントを表現する
/// 通知専用で、ハンドラーがドメインの状態を変更することはない
#[derive(Debug, Clone)]
pub enum DomainEvent {
    /// 注文の支払いが完了した
    OrderPaid(OrderPaid),
    /// 注文が発送された
    OrderShipped(OrderShipped),
    /// 注文が配達完了した
    OrderDelivered(OrderDelivered),
    /// 注文がキャンセルされた
    OrderCancelled(OrderCancelled),
}

/// 注文支払い完了イベント
#[derive(Debug, Clone)]
pub struct OrderPaid {
    /// 注文ID
    pub order_id: OrderId,
    /// 支払い方法
    pub payment_method: PaymentMethod,
    /// 注文に記録された合計金額
    pub total_amount: Money,
    /// 支払い計算後の請求額（割引・利息適用後）
    pub charged_amount: Money,
    /// イベント発生日時
    pub occurred_at: DateTime<Utc>,
}

impl OrderPaid {
    /// 新しい注文支払い完了イベントを作成
    pub fn new(
        order_id: OrderId,
        payment_method: PaymentMethod,
        total_amount: Money,
        charged_amount: Money,
    ) -> Self {
        Self {
            order_id,
            payment_method,
            total_amount,
            charged_amount,
            occurred_at: Utc::now(),
        }
    }
}

/// 注文発送イベント
#[derive(Debug, Clone)]
pub struct OrderShipped {
    /// 注文ID
    pub order_id: OrderId,
    /// 配送先住所
    pub delivery_address: DeliveryAddress,
    /// イベント発生日時
    pub occurred_at: DateTime<Utc>,
}

impl OrderShipped {
    /// 新しい注文発送イベントを作成
    pub fn new(order_id: OrderId, delivery_address: DeliveryAddress) -> Self {
        Self {
            order_id,
            delivery_address,
            occurred_at: Utc::now(),
        }
    }
}

/// 注文配達完了イベント
#[derive(Debug, Clone)]
pub struct OrderDelivered {
    /// 注文ID
    pub order_id: OrderId,
    /// イベント発生日時
    pub occurred_at: DateTime<Utc>,
}

impl OrderDelivered {
    /// 新しい注文配達完了イベントを作成
    pub fn new(order_id: OrderId) -> Self {
        Self {
            order_id,
            occurred_at: Utc::now(),
        }
    }
}

/// 注文キャンセルイベント
#[derive(Debug, Clone)]
pub struct OrderCancelled {
    /// 注文ID
    pub order_id: OrderId,
    /// イベント発生日時
    pub occurred_at: DateTime<Utc>,
}

impl OrderCancelled {
    /// 新しい注文キャンセルイベントを作成
    pub fn new(order_id: OrderId) -> Self {
        Self {
            order_id,
            occurred_at: Utc::now(),
        }
    }
}
