use crate::domain::model::{Order, OrderId, OrderStatus};
use crate::domain::port::{OrderRegistry, RegistryError};

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// インメモリ注文レジストリ
/// プロセス内のHashMapで注文を管理する（永続化なし）
#[derive(Default)]
pub struct InMemoryOrderRegistry {
    orders: RwLock<HashMap<OrderId, Order>>,
}

impl InMemoryOrderRegistry {
    /// 新しい空のレジストリを作成
    pub fn new() -> Self {
        Self {
            orders: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl OrderRegistry for InMemoryOrderRegistry {
    async fn save(&self, order: &Order) -> Result<(), RegistryError> {
        let mut orders = self.orders.write().await;
        orders.insert(order.id(), order.clone());
        Ok(())
    }

    async fn find_by_id(&self, order_id: OrderId) -> Result<Option<Order>, RegistryError> {
        let orders = self.orders.read().await;
        Ok(orders.get(&order_id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Order>, RegistryError> {
        let orders = self.orders.read().await;
        let mut all: Vec<Order> = orders.values().cloned().collect();
        all.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(all)
    }

    async fn find_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, RegistryError> {
        let orders = self.orders.read().await;
        let mut matching: Vec<Order> = orders
            .values()
            .filter(|order| order.status() == status)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(matching)
    }

    fn next_identity(&self) -> OrderId {
        OrderId::new()
    }
}
