use crate::application::ApplicationError;
use crate::domain::error::DomainError;
use crate::domain::event::{
    DomainEvent, OrderCancelled, OrderDelivered, OrderPaid, OrderShipped,
};
use crate::domain::model::{
    Cart, DeliveryAddress, Money, Order, OrderId, OrderStatus, PaymentMethod, Product,
    ProductId, SharedProduct,
};
use crate::domain::port::{
    EventPublisher, Logger, OrderRegistry, PaymentCalculator, ProductCatalog,
};

use std::sync::Arc;

/// 注文アプリケーションサービス
/// カートから注文への変換と注文ライフサイクルの操作を編成する
pub struct OrderApplicationService<R>
where
    R: OrderRegistry,
{
    order_registry: R,
    payment_calculator: Arc<dyn PaymentCalculator>,
    event_publisher: Arc<dyn EventPublisher>,
    logger: Arc<dyn Logger>,
}

impl<R> OrderApplicationService<R>
where
    R: OrderRegistry,
{
    /// 新しい注文アプリケーションサービスを作成
    ///
    /// # Arguments
    /// * `order_registry` - 注文レジストリ
    /// * `payment_calculator` - 支払い計算機
    /// * `event_publisher` - イベント発行者
    /// * `logger` - ロガー
    pub fn new(
        order_registry: R,
        payment_calculator: Arc<dyn PaymentCalculator>,
        event_publisher: Arc<dyn EventPublisher>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            order_registry,
            payment_calculator,
            event_publisher,
            logger,
        }
    }

    /// カートから新しい注文を作成する
    ///
    /// 1. カートが空でないことを検証する
    /// 2. カートの合計金額を算出し、新しい注文IDを採番する
    /// 3. カート明細のスナップショットを持つPending状態の注文を構築する
    /// 4. 支払いを計算する。承認されない場合は在庫・レジストリ・カートの
    ///    いずれにも触れずにPaymentFailedで中断する
    /// 5. スナップショットの各明細について在庫を引き落とす。途中で失敗した
    ///    場合は即座に伝播し、先行して引き落とした分は戻さない（同一商品への
    ///    並行アクセスの直列化は呼び出し側の責務）
    /// 6. 注文をPendingからPaidへ遷移させる
    /// 7. 注文をレジストリに保存し、カートをクリアする
    ///
    /// # Arguments
    /// * `cart` - チェックアウトするカート
    /// * `payment_method` - 支払い方法
    /// * `delivery_address` - 配送先住所
    /// * `installments` - 分割回数（分割払い以外では1）
    ///
    /// # Returns
    /// * `Ok(OrderId)` - 作成された注文のID
    /// * `Err(ApplicationError)` - 作成失敗
    pub async fn create_order(
        &self,
        cart: &mut Cart,
        payment_method: PaymentMethod,
        delivery_address: DeliveryAddress,
        installments: u32,
    ) -> Result<OrderId, ApplicationError> {
        if cart.is_empty() {
            return Err(ApplicationError::Domain(DomainError::EmptyCart));
        }

        let total_amount = cart.total();
        let order_id = self.order_registry.next_identity();

        let mut order = Order::new(
            order_id,
            cart.lines().clone(),
            payment_method,
            installments,
            total_amount,
            delivery_address,
        );

        let outcome =
            self.payment_calculator
                .calculate(&total_amount, payment_method, installments)?;
        if !outcome.is_approved() {
            let reason = outcome
                .decline_reason()
                .unwrap_or("理由不明")
                .to_string();
            self.logger.warn(
                "OrderApplicationService",
                &format!("支払いが承認されませんでした: {}", reason),
                None,
                None,
            );
            return Err(ApplicationError::PaymentFailed(reason));
        }

        for line in order.lines().values() {
            let mut product = line
                .product()
                .write()
                .expect("商品ロックの取得に失敗しました");
            product.debit(line.quantity())?;
        }

        // Pendingからは常に許可されている遷移
        order.transition(OrderStatus::Paid)?;

        self.order_registry.save(&order).await?;
        cart.clear();

        self.logger.info(
            "OrderApplicationService",
            &format!("注文を作成しました: {}", order_id),
            None,
            None,
        );

        let event = OrderPaid::new(
            order_id,
            payment_method,
            total_amount,
            outcome.final_amount(),
        );
        self.event_publisher.publish(&DomainEvent::OrderPaid(event))?;

        Ok(order_id)
    }

    /// 注文をキャンセルし、在庫を戻す
    ///
    /// 遷移の可否を先に検証し、キャンセル不可能な状態（Pending・Paid以外）
    /// では在庫に触れない。キャンセル可能な場合は、注文作成時に引き落とした
    /// 在庫を明細ごとに1:1で戻す。
    ///
    /// # Arguments
    /// * `order_id` - キャンセルする注文のID
    ///
    /// # Returns
    /// * `Ok(())` - キャンセル成功
    /// * `Err(ApplicationError::OrderNotFound)` - 注文が存在しない
    /// * `Err(ApplicationError::Domain(DomainError::InvalidTransition))` - キャンセル不可能な状態
    pub async fn cancel_order(&self, order_id: OrderId) -> Result<(), ApplicationError> {
        let mut order = self
            .order_registry
            .find_by_id(order_id)
            .await?
            .ok_or(ApplicationError::OrderNotFound(order_id))?;

        order.transition(OrderStatus::Cancelled)?;

        for line in order.lines().values() {
            let mut product = line
                .product()
                .write()
                .expect("商品ロックの取得に失敗しました");
            product.restock(line.quantity());
        }

        self.order_registry.save(&order).await?;

        self.logger.info(
            "OrderApplicationService",
            &format!("注文をキャンセルしました: {}", order_id),
            None,
            None,
        );

        let event = OrderCancelled::new(order_id);
        self.event_publisher
            .publish(&DomainEvent::OrderCancelled(event))?;

        Ok(())
    }

    /// 注文を発送済みにマーク
    ///
    /// # Arguments
    /// * `order_id` - 注文ID
    ///
    /// # Returns
    /// * `Ok(())` - マーク成功
    /// * `Err(ApplicationError)` - マーク失敗
    pub async fn mark_order_as_shipped(&self, order_id: OrderId) -> Result<(), ApplicationError> {
        let mut order = self
            .order_registry
            .find_by_id(order_id)
            .await?
            .ok_or(ApplicationError::OrderNotFound(order_id))?;

        order.transition(OrderStatus::Shipped)?;
        self.order_registry.save(&order).await?;

        let event = OrderShipped::new(order_id, order.delivery_address().clone());
        self.event_publisher
            .publish(&DomainEvent::OrderShipped(event))?;

        Ok(())
    }

    /// 注文を配達完了にマーク
    ///
    /// # Arguments
    /// * `order_id` - 注文ID
    ///
    /// # Returns
    /// * `Ok(())` - マーク成功
    /// * `Err(ApplicationError)` - マーク失敗
    pub async fn mark_order_as_delivered(
        &self,
        order_id: OrderId,
    ) -> Result<(), ApplicationError> {
        let mut order = self
            .order_registry
            .find_by_id(order_id)
            .await?
            .ok_or(ApplicationError::OrderNotFound(order_id))?;

        order.transition(OrderStatus::Delivered)?;
        self.order_registry.save(&order).await?;

        let event = OrderDelivered::new(order_id);
        self.event_publisher
            .publish(&DomainEvent::OrderDelivered(event))?;

        Ok(())
    }

    /// 注文IDで注文を取得
    ///
    /// # Returns
    /// * `Ok(Some(Order))` - 注文が見つかった
    /// * `Ok(None)` - 注文が見つからなかった
    pub async fn get_order_by_id(&self, order_id: OrderId) -> Result<Option<Order>, ApplicationError> {
        self.order_registry
            .find_by_id(order_id)
            .await
            .map_err(ApplicationError::from)
    }

    /// すべての注文を取得
    /// 作成日時の降順で並べて返す
    pub async fn get_all_orders(&self) -> Result<Vec<Order>, ApplicationError> {
        self.order_registry
            .find_all()
            .await
            .map_err(ApplicationError::from)
    }

    /// 指定されたステータスの注文を取得
    /// 作成日時の降順で並べて返す
    ///
    /// # Arguments
    /// * `status` - フィルタリングする注文ステータス
    pub async fn get_orders_by_status(
        &self,
        status: OrderStatus,
    ) -> Result<Vec<Order>, ApplicationError> {
        self.order_registry
            .find_by_status(status)
            .await
            .map_err(ApplicationError::from)
    }
}

/// カタログアプリケーションサービス
/// 商品の登録と検索を提供する
pub struct CatalogApplicationService {
    product_catalog: Arc<dyn ProductCatalog>,
}

impl CatalogApplicationService {
    /// 新しいカタログアプリケーションサービスを作成
    ///
    /// # Arguments
    /// * `product_catalog` - 商品カタログ
    pub fn new(product_catalog: Arc<dyn ProductCatalog>) -> Self {
        Self { product_catalog }
    }

    /// 新しい商品をカタログに登録する
    ///
    /// # Arguments
    /// * `name` - 商品名
    /// * `description` - 商品説明
    /// * `price` - 単価
    /// * `stock` - 初期在庫数
    /// * `category` - カテゴリ
    ///
    /// # Returns
    /// * `Ok(ProductId)` - 登録された商品のID
    /// * `Err(ApplicationError)` - 登録失敗
    pub async fn register_product(
        &self,
        name: String,
        description: String,
        price: Money,
        stock: u32,
        category: String,
    ) -> Result<ProductId, ApplicationError> {
        let product_id = ProductId::new();
        let product = Product::new(product_id, name, description, price, stock, category);
        self.product_catalog.save(product).await?;
        Ok(product_id)
    }

    /// 商品IDで商品を取得
    ///
    /// # Returns
    /// * `Ok(Some(SharedProduct))` - 商品が見つかった
    /// * `Ok(None)` - 商品が見つからなかった
    pub async fn get_product_by_id(
        &self,
        product_id: ProductId,
    ) -> Result<Option<SharedProduct>, ApplicationError> {
        self.product_catalog
            .find_by_id(product_id)
            .await
            .map_err(ApplicationError::from)
    }

    /// すべての商品を取得
    /// 商品IDの昇順で並べて返す
    pub async fn get_all_products(&self) -> Result<Vec<SharedProduct>, ApplicationError> {
        self.product_catalog
            .find_all()
            .await
            .map_err(ApplicationError::from)
    }
}
