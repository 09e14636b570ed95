use crate::domain::error::DomainError;
use crate::domain::model::{Money, ProductId};

use std::sync::{Arc, RwLock};

/// 商品への共有ハンドル
/// カタログとカート・注文の明細が同一の商品実体を共有する。
/// 在庫の変更（引き落とし・返却）はどの参照からも観測される。
pub type SharedProduct = Arc<RwLock<Product>>;

/// 商品集約
/// 販売対象の商品と在庫数を管理する
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: ProductId,
    name: String,
    description: String,
    price: Money,
    stock: u32,
    category: String,
}

impl Product {
    /// 新しい商品を作成
    pub fn new(
        id: ProductId,
        name: String,
        description: String,
        price: Money,
        stock: u32,
        category: String,
    ) -> Self {
        Self {
            id,
            name,
            description,
            price,
            stock,
            category,
        }
    }

    /// 商品を共有ハンドルに変換
    pub fn into_shared(self) -> SharedProduct {
        Arc::new(RwLock::new(self))
    }

    /// 商品IDを取得
    pub fn id(&self) -> ProductId {
        self.id
    }

    /// 商品名を取得
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 商品説明を取得
    pub fn description(&self) -> &str {
        &self.description
    }

    /// 単価を取得
    pub fn price(&self) -> Money {
        self.price
    }

    /// 在庫数を取得
    pub fn stock(&self) -> u32 {
        self.stock
    }

    /// カテゴリを取得
    pub fn category(&self) -> &str {
        &self.category
    }

    /// 指定された数量の在庫があるかチェック
    /// 副作用はない
    pub fn check_availability(&self, quantity: u32) -> bool {
        self.stock >= quantity
    }

    /// 在庫を引き落とす
    ///
    /// # Returns
    /// * `Ok(())` - 引き落とし成功
    /// * `Err(DomainError::InsufficientStock)` - 在庫不足。在庫数は変化しない
    pub fn debit(&mut self, quantity: u32) -> Result<(), DomainError> {
        if quantity > self.stock {
            return Err(DomainError::InsufficientStock {
                available: self.stock,
            });
        }
        self.stock -= quantity;
        Ok(())
    }

    /// 在庫を戻す（注文キャンセル時）
    /// 無条件に在庫数を加算する。引き落としと1:1で対になって呼ばれる
    pub fn restock(&mut self, quantity: u32) {
        self.stock += quantity;
    }
}
