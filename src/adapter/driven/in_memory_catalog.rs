use crate::domain::model::{Product, ProductId, SharedProduct};
use crate::domain::port::{ProductCatalog, RegistryError};

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// インメモリ商品カタログ
/// プロセス内のHashMapで商品を管理する（永続化なし）
///
/// 商品は共有ハンドルとして保持され、カートや注文の明細と同一の実体を
/// 共有する。在庫の変更を行うのはドメイン操作（引き落とし・返却）のみ
#[derive(Default)]
pub struct InMemoryProductCatalog {
    products: RwLock<HashMap<ProductId, SharedProduct>>,
}

impl InMemoryProductCatalog {
    /// 新しい空のカタログを作成
    pub fn new() -> Self {
        Self {
            products: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl ProductCatalog for InMemoryProductCatalog {
    async fn save(&self, product: Product) -> Result<(), RegistryError> {
        let mut products = self.products.write().await;
        products.insert(product.id(), product.into_shared());
        Ok(())
    }

    async fn find_by_id(
        &self,
        product_id: ProductId,
    ) -> Result<Option<SharedProduct>, RegistryError> {
        let products = self.products.read().await;
        Ok(products.get(&product_id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<SharedProduct>, RegistryError> {
        let products = self.products.read().await;
        let mut all: Vec<SharedProduct> = products.values().cloned().collect();
        all.sort_by_key(|product| {
            product
                .read()
                .expect("商品ロックの取得に失敗しました")
                .id()
        });
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Money;
    use rust_decimal_macros::dec;

    fn test_product(name: &str) -> Product {
        Product::new(
            ProductId::new(),
            name.to_string(),
            "Descrição".to_string(),
            Money::brl(dec!(99.90)),
            5,
            "Geral".to_string(),
        )
    }

    #[tokio::test]
    async fn test_save_and_find_by_id() {
        let catalog = InMemoryProductCatalog::new();
        let product = test_product("Caneca");
        let product_id = product.id();

        catalog.save(product).await.unwrap();

        let found = catalog.find_by_id(product_id).await.unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().read().unwrap().name(), "Caneca");
    }

    #[tokio::test]
    async fn test_find_by_id_missing_returns_none() {
        let catalog = InMemoryProductCatalog::new();

        let found = catalog.find_by_id(ProductId::new()).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_find_all_sorted_by_id() {
        let catalog = InMemoryProductCatalog::new();
        catalog.save(test_product("A")).await.unwrap();
        catalog.save(test_product("B")).await.unwrap();
        catalog.save(test_product("C")).await.unwrap();

        let all = catalog.find_all().await.unwrap();
        assert_eq!(all.len(), 3);

        let ids: Vec<_> = all
            .iter()
            .map(|p| p.read().unwrap().id())
            .collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[tokio::test]
    async fn test_save_replaces_existing_product() {
        let catalog = InMemoryProductCatalog::new();
        let product = test_product("Velho");
        let product_id = product.id();
        catalog.save(product).await.unwrap();

        let replacement = Product::new(
            product_id,
            "Novo".to_string(),
            "Descrição".to_string(),
            Money::brl(dec!(49.90)),
            10,
            "Geral".to_string(),
        );
        catalog.save(replacement).await.unwrap();

        let found = catalog.find_by_id(product_id).await.unwrap().unwrap();
        assert_eq!(found.read().unwrap().name(), "Novo");
    }
}
