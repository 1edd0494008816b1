//! 平衡記錄（報表輸出）

use balance_core::{Product, Uom};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// 以對手方產品ID為鍵的平衡記錄
pub type BalanceMap = BTreeMap<String, BalanceRecord>;

/// 差異百分比：(實際 - 計劃) / 計劃 × 100，實際或計劃為零時為零
pub fn difference_percent(consumption: Decimal, plan_consumption: Decimal) -> Decimal {
    if consumption.is_zero() || plan_consumption.is_zero() {
        return Decimal::ZERO;
    }
    consumption
        .checked_sub(plan_consumption)
        .and_then(|diff| diff.checked_div(plan_consumption))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

/// 單一工單對某對手方產品的貢獻（報表明細行）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionBalanceLine {
    /// 工單ID
    pub production_id: Uuid,

    /// 工單顯示名稱
    pub name: String,

    /// 工單主產品
    pub product: Product,

    /// 工單主單位
    pub uom: Uom,

    /// 對手方產品的預設單位
    pub default_uom: Uom,

    pub balance_quantity: Decimal,
    pub balance_consumption: Decimal,
    pub balance_plan_consumption: Decimal,
    pub balance_difference: Decimal,
    pub balance_difference_percent: Decimal,

    pub balance_quantity_uom: Uom,
    pub balance_consumption_uom: Uom,
    pub balance_plan_consumption_uom: Uom,
    pub balance_difference_uom: Uom,
}

/// 對手方產品的平衡記錄
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceRecord {
    /// 對手方產品
    pub product: Product,

    /// 追溯產品的數量
    pub balance_quantity: Decimal,

    /// 實際消耗
    pub balance_consumption: Decimal,

    /// 依 BOM 計劃的消耗
    pub balance_plan_consumption: Decimal,

    /// 實際與計劃的差異
    pub balance_difference: Decimal,

    /// 差異百分比（由消耗與計劃推導，不參與累加）
    pub balance_difference_percent: Decimal,

    pub balance_quantity_uom: Uom,
    pub balance_consumption_uom: Uom,
    pub balance_plan_consumption_uom: Uom,
    pub balance_difference_uom: Uom,

    /// 各工單明細
    pub lines: Vec<ProductionBalanceLine>,
}

impl BalanceRecord {
    /// 由單一工單明細建立記錄
    pub fn from_line(product: Product, line: ProductionBalanceLine) -> Self {
        Self {
            product,
            balance_quantity: line.balance_quantity,
            balance_consumption: line.balance_consumption,
            balance_plan_consumption: line.balance_plan_consumption,
            balance_difference: line.balance_difference,
            balance_difference_percent: line.balance_difference_percent,
            balance_quantity_uom: line.balance_quantity_uom.clone(),
            balance_consumption_uom: line.balance_consumption_uom.clone(),
            balance_plan_consumption_uom: line.balance_plan_consumption_uom.clone(),
            balance_difference_uom: line.balance_difference_uom.clone(),
            lines: vec![line],
        }
    }

    /// 合併另一工單的記錄
    ///
    /// 數值欄位累加，單位標籤以後到者為準，明細行依序附加。
    pub fn merge(&mut self, other: BalanceRecord) {
        self.balance_quantity = self.balance_quantity.saturating_add(other.balance_quantity);
        self.balance_consumption = self.balance_consumption.saturating_add(other.balance_consumption);
        self.balance_plan_consumption = self.balance_plan_consumption.saturating_add(other.balance_plan_consumption);
        self.balance_difference = self.balance_difference.saturating_add(other.balance_difference);
        self.balance_difference_percent =
            difference_percent(self.balance_consumption, self.balance_plan_consumption);

        self.product = other.product;
        self.balance_quantity_uom = other.balance_quantity_uom;
        self.balance_consumption_uom = other.balance_consumption_uom;
        self.balance_plan_consumption_uom = other.balance_plan_consumption_uom;
        self.balance_difference_uom = other.balance_difference_uom;

        self.lines.extend(other.lines);
    }

    /// 將差異百分比捨入到顯示位數（含明細行）
    pub fn round_percent(&mut self, digits: u32) {
        let round = |value: Decimal| {
            value.round_dp_with_strategy(digits, RoundingStrategy::MidpointNearestEven)
        };
        self.balance_difference_percent = round(self.balance_difference_percent);
        for line in &mut self.lines {
            line.balance_difference_percent = round(line.balance_difference_percent);
        }
    }
}
