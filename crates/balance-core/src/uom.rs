//! 計量單位模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{BalanceError, Result};

/// 計量單位
///
/// 同一類別內的單位透過 `factor` 換算到類別基準單位（基準單位 factor = 1）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Uom {
    /// 單位ID
    pub id: String,

    /// 名稱
    pub name: String,

    /// 符號
    pub symbol: String,

    /// 單位類別（例如：數量、長度、重量）
    pub category: String,

    /// 相對於基準單位的係數（1 本單位 = factor 基準單位）
    pub factor: Decimal,

    /// 捨入精度
    pub rounding: Decimal,

    /// 顯示小數位數
    pub digits: u32,
}

impl Uom {
    /// 創建新的計量單位（預設精度 0.01，兩位小數）
    pub fn new(id: String, name: String, category: String, factor: Decimal) -> Self {
        Self {
            symbol: id.clone(),
            id,
            name,
            category,
            factor,
            rounding: Decimal::new(1, 2),
            digits: 2,
        }
    }

    /// 建構器模式：設置符號
    pub fn with_symbol(mut self, symbol: String) -> Self {
        self.symbol = symbol;
        self
    }

    /// 建構器模式：設置捨入精度（小數位數跟隨精度）
    pub fn with_rounding(mut self, rounding: Decimal) -> Self {
        self.rounding = rounding;
        self.digits = rounding.normalize().scale();
        self
    }

    /// 檢查兩個單位是否可互相換算
    pub fn is_compatible(&self, other: &Uom) -> bool {
        self.category == other.category
    }

    /// 將數量從本單位換算到目標單位（不捨入）
    pub fn compute_qty(&self, quantity: Decimal, to: &Uom) -> Result<Decimal> {
        if self.id == to.id {
            return Ok(quantity);
        }

        if !self.is_compatible(to) {
            return Err(BalanceError::IncompatibleUom {
                from: self.id.clone(),
                to: to.id.clone(),
            });
        }

        if to.factor.is_zero() {
            return Err(BalanceError::InvalidUomFactor(to.id.clone()));
        }

        quantity
            .checked_mul(self.factor)
            .and_then(|qty| qty.checked_div(to.factor))
            .ok_or_else(|| BalanceError::QuantityOverflow(to.id.clone()))
    }

    /// 向上取整到本單位的捨入精度
    ///
    /// 精度過細導致超出 `Decimal` 範圍時回傳錯誤。
    pub fn ceil(&self, value: Decimal) -> Result<Decimal> {
        if self.rounding <= Decimal::ZERO {
            return Ok(value);
        }
        value
            .checked_div(self.rounding)
            .and_then(|steps| steps.ceil().checked_mul(self.rounding))
            .ok_or_else(|| BalanceError::QuantityOverflow(self.id.clone()))
    }
}
