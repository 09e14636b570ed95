use ecommerce_order_management::adapter::driven::{
    ConsoleEventPublisher, ConsoleLogger, InMemoryOrderRegistry, InMemoryProductCatalog,
};
use ecommerce_order_management::adapter::driver::rest_api::{create_router, AppStateInner};
use ecommerce_order_management::adapter::ServerConfig;
use ecommerce_order_management::application::service::{
    CatalogApplicationService, OrderApplicationService,
};
use ecommerce_order_management::domain::payment::PaymentProcessor;

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Eコマース注文処理システム REST API ===");
    println!("ドメイン駆動設計サンプルプロジェクト");
    println!();

    // .envファイルから環境変数を読み込む
    dotenvy::dotenv().ok();

    // サーバー設定を読み込む
    let config = ServerConfig::from_env()?;

    // 駆動される側アダプターを作成
    let product_catalog = Arc::new(InMemoryProductCatalog::new());
    let order_registry = InMemoryOrderRegistry::new();
    let event_publisher = Arc::new(ConsoleEventPublisher::new());
    let logger = Arc::new(ConsoleLogger::new());

    // 支払い計算機を作成（一括払い・分割払い・PIXの標準料率）
    let payment_calculator = Arc::new(PaymentProcessor::new());

    // アプリケーションサービスを作成
    let order_service = OrderApplicationService::new(
        order_registry,
        payment_calculator,
        event_publisher,
        logger,
    );
    let catalog_service = CatalogApplicationService::new(product_catalog);

    // アプリケーション状態を作成
    let app_state = AppStateInner {
        catalog_service: Arc::new(catalog_service),
        order_service: Arc::new(order_service),
        carts: Arc::new(RwLock::new(HashMap::new())),
    };

    // REST APIルーターを作成
    let app = create_router()
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // サーバーを起動
    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    println!(
        "REST APIサーバーが起動しました: http://{}",
        config.bind_address()
    );
    println!("ヘルスチェック: GET http://{}/health", config.bind_address());
    println!("API仕様:");
    println!("  POST   /products - 商品登録");
    println!("  GET    /products - 商品一覧取得");
    println!("  GET    /products/:id - 商品詳細取得");
    println!("  POST   /carts - カート作成");
    println!("  GET    /carts/:id - カート詳細取得");
    println!("  POST   /carts/:id/items - カートに商品を追加");
    println!("  DELETE /carts/:id/items/:product_id - カートから商品を削除");
    println!("  POST   /carts/:id/checkout - チェックアウト（注文作成）");
    println!("  GET    /orders - 注文一覧取得");
    println!("  GET    /orders/:id - 注文詳細取得");
    println!("  POST   /orders/:id/cancel - 注文キャンセル");
    println!("  POST   /orders/:id/ship - 注文発送");
    println!("  POST   /orders/:id/deliver - 注文配達完了");
    println!();

    axum::serve(listener, app).await?;

    Ok(())
}
