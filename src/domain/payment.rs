// 支払い計算
// (金額, 支払い方法, 分割回数) から請求額を算出する純粋な計算。
// 状態遷移や在庫への副作用は持たない

use crate::domain::error::DomainError;
use crate::domain::model::{Money, PaymentMethod};
use crate::domain::port::PaymentCalculator;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// 分割払いの許容回数の下限
const MIN_INSTALLMENTS: u32 = 2;
/// 分割払いの許容回数の上限
const MAX_INSTALLMENTS: u32 = 12;

/// 分割払いの内訳
#[derive(Debug, Clone, PartialEq)]
pub struct InstallmentPlan {
    total: Money,
    installment_amount: Money,
    installments: u32,
}

impl InstallmentPlan {
    /// 利息込みの総額を取得
    pub fn total(&self) -> Money {
        self.total
    }

    /// 1回あたりの支払い額を取得
    pub fn installment_amount(&self) -> Money {
        self.installment_amount
    }

    /// 分割回数を取得
    pub fn installments(&self) -> u32 {
        self.installments
    }
}

/// 支払い計算の結果
/// 承認可否と最終的な請求額、分割払いの場合はその内訳を保持する
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentOutcome {
    approved: bool,
    final_amount: Money,
    plan: Option<InstallmentPlan>,
    decline_reason: Option<String>,
}

impl PaymentOutcome {
    /// 承認された支払い結果を作成
    pub fn approved(final_amount: Money, plan: Option<InstallmentPlan>) -> Self {
        Self {
            approved: true,
            final_amount,
            plan,
            decline_reason: None,
        }
    }

    /// 拒否された支払い結果を作成
    pub fn declined(final_amount: Money, reason: String) -> Self {
        Self {
            approved: false,
            final_amount,
            plan: None,
            decline_reason: Some(reason),
        }
    }

    /// 承認されたかどうか
    pub fn is_approved(&self) -> bool {
        self.approved
    }

    /// 最終的な請求額を取得
    pub fn final_amount(&self) -> Money {
        self.final_amount
    }

    /// 分割払いの内訳を取得
    pub fn plan(&self) -> Option<&InstallmentPlan> {
        self.plan.as_ref()
    }

    /// 拒否された理由を取得
    pub fn decline_reason(&self) -> Option<&str> {
        self.decline_reason.as_deref()
    }
}

/// 支払い計算機の標準実装
///
/// - クレジットカード一括払い: 割増なし
/// - クレジットカード分割払い: 2回目以降、1回ごとに5%の利息
/// - PIX即時払い: 10%割引
#[derive(Debug, Clone)]
pub struct PaymentProcessor {
    installment_interest: Decimal,
    pix_discount: Decimal,
}

impl PaymentProcessor {
    /// 標準の利率（5%/回）と PIX割引率（10%）で作成
    pub fn new() -> Self {
        Self {
            installment_interest: dec!(0.05),
            pix_discount: dec!(0.10),
        }
    }

    /// クレジットカード一括払いの請求額
    pub fn credit_card_amount(&self, amount: &Money) -> Money {
        *amount
    }

    /// クレジットカード分割払いの請求額と内訳
    ///
    /// 分割回数は2〜12回。総額 = 金額 × (1 + 0.05 × (回数 - 1))、
    /// 1回あたりの支払い額は総額を等分して小数第2位で丸めたもの。
    ///
    /// # Returns
    /// * `Ok(InstallmentPlan)` - 内訳
    /// * `Err(DomainError::InvalidInstallmentCount)` - 回数が許容範囲外
    pub fn installment_plan(
        &self,
        amount: &Money,
        installments: u32,
    ) -> Result<InstallmentPlan, DomainError> {
        if !(MIN_INSTALLMENTS..=MAX_INSTALLMENTS).contains(&installments) {
            return Err(DomainError::InvalidInstallmentCount(installments));
        }

        let factor =
            Decimal::ONE + self.installment_interest * Decimal::from(installments - 1);
        let total = amount.scale(factor);
        let installment_amount = total.split(installments)?;

        Ok(InstallmentPlan {
            total,
            installment_amount,
            installments,
        })
    }

    /// PIX払いの請求額（10%割引）
    pub fn pix_amount(&self, amount: &Money) -> Money {
        amount.scale(Decimal::ONE - self.pix_discount)
    }
}

impl Default for PaymentProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl PaymentCalculator for PaymentProcessor {
    fn calculate(
        &self,
        amount: &Money,
        method: PaymentMethod,
        installments: u32,
    ) -> Result<PaymentOutcome, DomainError> {
        match method {
            PaymentMethod::CreditCard => {
                Ok(PaymentOutcome::approved(self.credit_card_amount(amount), None))
            }
            PaymentMethod::CreditCardInstallments => {
                let plan = self.installment_plan(amount, installments)?;
                Ok(PaymentOutcome::approved(plan.total(), Some(plan)))
            }
            PaymentMethod::Pix => Ok(PaymentOutcome::approved(self.pix_amount(amount), None)),
        }
    }
}
