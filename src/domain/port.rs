// 出力ポート
// ドメイン層が外部に依存する機能をトレイトとして定義
// アダプター層でこれらのトレイトを実装する

use crate::domain::error::DomainError;
use crate::domain::event::DomainEvent;
use crate::domain::model::{
    Money, Order, OrderId, OrderStatus, PaymentMethod, Product, ProductId, SharedProduct,
};

use async_trait::async_trait;
use std::collections::HashMap;
use uuid::Uuid;

/// ログレベル
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

/// ロガートレイト
/// ログ出力を抽象化するポート
pub trait Logger: Send + Sync {
    /// デバッグレベルのログを出力
    fn debug(
        &self,
        component: &str,
        message: &str,
        correlation_id: Option<Uuid>,
        context: Option<HashMap<String, String>>,
    );

    /// 情報レベルのログを出力
    fn info(
        &self,
        component: &str,
        message: &str,
        correlation_id: Option<Uuid>,
        context: Option<HashMap<String, String>>,
    );

    /// 警告レベルのログを出力
    fn warn(
        &self,
        component: &str,
        message: &str,
        correlation_id: Option<Uuid>,
        context: Option<HashMap<String, String>>,
    );

    /// エラーレベルのログを出力
    fn error(
        &self,
        component: &str,
        message: &str,
        correlation_id: Option<Uuid>,
        context: Option<HashMap<String, String>>,
    );
}

/// レジストリエラー型
/// カタログ・注文レジストリの操作で発生するエラーを表現する
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// 操作に失敗
    OperationFailed(String),
    /// データの取得に失敗
    FetchFailed(String),
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::OperationFailed(msg) => write!(f, "Operation failed: {}", msg),
            RegistryError::FetchFailed(msg) => write!(f, "Fetch failed: {}", msg),
        }
    }
}

impl std::error::Error for RegistryError {}

/// 商品カタログトレイト
/// 商品の登録と検索を抽象化する
/// 商品は共有ハンドルとして保持され、カートや注文の明細と実体を共有する
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// 商品をカタログに登録する
    /// 同じ商品IDが既に存在する場合は置き換える
    ///
    /// # Arguments
    /// * `product` - 登録する商品
    async fn save(&self, product: Product) -> Result<(), RegistryError>;

    /// 商品IDで商品を検索する
    ///
    /// # Returns
    /// * `Ok(Some(SharedProduct))` - 商品が見つかった
    /// * `Ok(None)` - 商品が見つからなかった
    async fn find_by_id(&self, product_id: ProductId)
        -> Result<Option<SharedProduct>, RegistryError>;

    /// すべての商品を取得する
    /// 商品IDの昇順で並べて返す
    async fn find_all(&self) -> Result<Vec<SharedProduct>, RegistryError>;
}

/// 注文レジストリトレイト
/// 注文集約の保管を抽象化する
#[async_trait]
pub trait OrderRegistry: Send + Sync {
    /// 注文を保存する
    /// 同じ注文IDが既に存在する場合は置き換える
    ///
    /// # Arguments
    /// * `order` - 保存する注文
    async fn save(&self, order: &Order) -> Result<(), RegistryError>;

    /// 注文IDで注文を検索する
    ///
    /// # Returns
    /// * `Ok(Some(Order))` - 注文が見つかった
    /// * `Ok(None)` - 注文が見つからなかった
    async fn find_by_id(&self, order_id: OrderId) -> Result<Option<Order>, RegistryError>;

    /// すべての注文を取得する
    /// 作成日時の降順で並べて返す
    async fn find_all(&self) -> Result<Vec<Order>, RegistryError>;

    /// 指定されたステータスの注文を取得する
    /// 作成日時の降順で並べて返す
    ///
    /// # Arguments
    /// * `status` - フィルタリングする注文ステータス
    async fn find_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, RegistryError>;

    /// 新しい一意の注文IDを生成する
    fn next_identity(&self) -> OrderId;
}

/// 支払い計算トレイト
/// 請求額の算出と承認判断を抽象化するポート
///
/// 分割払い以外の支払い方法では installments = 1 で呼び出せる
pub trait PaymentCalculator: Send + Sync {
    /// 支払いを計算する
    ///
    /// # Arguments
    /// * `amount` - 基準金額（カートの合計）
    /// * `method` - 支払い方法
    /// * `installments` - 分割回数
    ///
    /// # Returns
    /// * `Ok(PaymentOutcome)` - 承認可否を含む計算結果
    /// * `Err(DomainError::InvalidInstallmentCount)` - 分割回数が範囲外
    fn calculate(
        &self,
        amount: &Money,
        method: PaymentMethod,
        installments: u32,
    ) -> Result<crate::domain::payment::PaymentOutcome, DomainError>;
}

/// イベント発行エラー
#[derive(Debug, thiserror::Error)]
pub enum PublisherError {
    #[error("Event publishing failed: {0}")]
    PublishingFailed(String),
}

/// イベント発行トレイト
/// ドメインイベントの通知を抽象化するポート
pub trait EventPublisher: Send + Sync {
    /// イベントを発行する
    fn publish(&self, event: &DomainEvent) -> Result<(), PublisherError>;
}
