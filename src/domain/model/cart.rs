use crate::domain::error::DomainError;
use crate::domain::model::{Money, ProductId, SharedProduct};

use std::collections::HashMap;

/// カート明細
/// カタログの商品そのものへの参照と数量を保持する（コピーではない）
#[derive(Debug, Clone)]
pub struct CartLine {
    product: SharedProduct,
    quantity: u32,
}

impl CartLine {
    /// 新しいカート明細を作成
    /// 数量は1以上である必要がある
    fn new(product: SharedProduct, quantity: u32) -> Result<Self, DomainError> {
        if quantity == 0 {
            return Err(DomainError::InvalidQuantity);
        }
        Ok(Self { product, quantity })
    }

    /// 商品への共有ハンドルを取得
    pub fn product(&self) -> &SharedProduct {
        &self.product
    }

    /// 数量を取得
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// 小計を計算（単価 × 数量）
    pub fn subtotal(&self) -> Money {
        let product = self.product.read().expect("商品ロックの取得に失敗しました");
        product.price().multiply(self.quantity)
    }
}

/// ショッピングカート
/// 商品IDをキーとした明細の集まり。明細の順序は合計金額に影響しない
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: HashMap<ProductId, CartLine>,
}

impl Cart {
    /// 新しい空のカートを作成
    pub fn new() -> Self {
        Self {
            lines: HashMap::new(),
        }
    }

    /// カートに商品を追加
    ///
    /// 追加時点で要求数量ぶんの在庫の可用性をチェックする。
    /// 在庫の引き落としはチェックアウト時のみで、ここでは行わない。
    /// 同じ商品が既に存在する場合は数量を加算する。
    ///
    /// # Returns
    /// * `Ok(())` - 追加成功
    /// * `Err(DomainError::InvalidQuantity)` - 数量が0
    /// * `Err(DomainError::InsufficientStock)` - 在庫不足
    pub fn add(&mut self, product: SharedProduct, quantity: u32) -> Result<(), DomainError> {
        if quantity == 0 {
            return Err(DomainError::InvalidQuantity);
        }

        let product_id = {
            let current = product.read().expect("商品ロックの取得に失敗しました");
            if !current.check_availability(quantity) {
                return Err(DomainError::InsufficientStock {
                    available: current.stock(),
                });
            }
            current.id()
        };

        if let Some(line) = self.lines.get_mut(&product_id) {
            line.quantity += quantity;
        } else {
            self.lines.insert(product_id, CartLine::new(product, quantity)?);
        }

        Ok(())
    }

    /// カートから商品を削除
    ///
    /// 数量未指定または現在の数量以上の場合は明細ごと削除し、
    /// それ以外の場合は数量を減らす。
    /// 存在しない商品IDの場合は何もしない。
    pub fn remove(&mut self, product_id: ProductId, quantity: Option<u32>) {
        if let Some(line) = self.lines.get_mut(&product_id) {
            match quantity {
                Some(qty) if qty < line.quantity => {
                    line.quantity -= qty;
                }
                _ => {
                    self.lines.remove(&product_id);
                }
            }
        }
    }

    /// カートの合計金額を計算
    /// 空のカートでは0を返す
    pub fn total(&self) -> Money {
        self.lines
            .values()
            .map(|line| line.subtotal())
            .fold(Money::zero(), |acc, amount| acc.add(&amount).unwrap_or(acc))
    }

    /// すべての明細を削除
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// カートが空かどうか
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// 明細のマッピングを取得
    pub fn lines(&self) -> &HashMap<ProductId, CartLine> {
        &self.lines
    }

    /// 明細数を取得
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}
