use crate::domain::event::DomainEvent;
use crate::domain::port::{EventPublisher, PublisherError};

/// コンソールイベント発行者
/// ドメインイベントをコンソールに出力する
pub struct ConsoleEventPublisher;

impl ConsoleEventPublisher {
    /// 新しいコンソールイベント発行者を作成
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleEventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl EventPublisher for ConsoleEventPublisher {
    fn publish(&self, event: &DomainEvent) -> Result<(), PublisherError> {
        match event {
            DomainEvent::OrderPaid(e) => {
                println!("💳 [イベント] 注文支払い完了");
                println!("  注文ID: {}", e.order_id);
                println!("  支払い方法: {}", e.payment_method);
                println!("  合計金額: R$ {}", e.total_amount.amount());
                println!("  請求金額: R$ {}", e.charged_amount.amount());
                println!("  発生日時: {}", e.occurred_at.format("%Y-%m-%d %H:%M:%S"));
            }
            DomainEvent::OrderShipped(e) => {
                println!("🚚 [イベント] 注文発送");
                println!("  注文ID: {}", e.order_id);
                println!(
                    "  配送先: {} - {}, {} (CEP {})",
                    e.delivery_address.street(),
                    e.delivery_address.city(),
                    e.delivery_address.state(),
                    e.delivery_address.postal_code()
                );
                if let Some(complement) = e.delivery_address.complement() {
                    println!("  補足: {}", complement);
                }
                println!("  発生日時: {}", e.occurred_at.format("%Y-%m-%d %H:%M:%S"));
            }
            DomainEvent::OrderDelivered(e) => {
                println!("✅ [イベント] 注文配達完了");
                println!("  注文ID: {}", e.order_id);
                println!("  発生日時: {}", e.occurred_at.format("%Y-%m-%d %H:%M:%S"));
            }
            DomainEvent::OrderCancelled(e) => {
                println!("❌ [イベント] 注文キャンセル");
                println!("  注文ID: {}", e.order_id);
                println!("  発生日時: {}", e.occurred_at.format("%Y-%m-%d %H:%M:%S"));
            }
        }
        println!();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event::{OrderCancelled, OrderDelivered, OrderPaid, OrderShipped};
    use crate::domain::model::{DeliveryAddress, Money, OrderId, PaymentMethod};
    use rust_decimal_macros::dec;

    fn test_address() -> DeliveryAddress {
        DeliveryAddress::new(
            "Rua XV de Novembro 100".to_string(),
            "Curitiba".to_string(),
            "PR".to_string(),
            "80020310".to_string(),
            Some("Sala 3".to_string()),
        )
        .unwrap()
    }

    #[test]
    fn test_publish_all_event_kinds() {
        let publisher = ConsoleEventPublisher::new();
        let order_id = OrderId::new();

        let paid = OrderPaid::new(
            order_id,
            PaymentMethod::Pix,
            Money::brl(dec!(300.00)),
            Money::brl(dec!(270.00)),
        );
        assert!(publisher.publish(&DomainEvent::OrderPaid(paid)).is_ok());

        let shipped = OrderShipped::new(order_id, test_address());
        assert!(publisher.publish(&DomainEvent::OrderShipped(shipped)).is_ok());

        let delivered = OrderDelivered::new(order_id);
        assert!(publisher
            .publish(&DomainEvent::OrderDelivered(delivered))
            .is_ok());

        let cancelled = OrderCancelled::new(order_id);
        assert!(publisher
            .publish(&DomainEvent::OrderCancelled(cancelled))
            .is_ok());
    }
}
