//! 庫存移動模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Product, Result, Uom};

/// 移動狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveState {
    /// 暫存
    Staging,
    /// 草稿
    Draft,
    /// 已分配
    Assigned,
    /// 已完成
    Done,
    /// 已取消
    Cancelled,
}

/// 工單的一筆投入或產出移動
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Move {
    /// 移動ID
    pub id: Uuid,

    /// 產品
    pub product: Product,

    /// 數量（以 `uom` 計）
    pub quantity: Decimal,

    /// 單位
    pub uom: Uom,

    /// 狀態
    pub state: MoveState,

    /// 批號ID
    pub lot_id: Option<String>,

    /// 實際生效日期
    pub effective_date: Option<NaiveDate>,
}

impl Move {
    /// 創建新的移動（草稿狀態）
    pub fn new(product: Product, quantity: Decimal, uom: Uom) -> Self {
        Self {
            id: Uuid::new_v4(),
            product,
            quantity,
            uom,
            state: MoveState::Draft,
            lot_id: None,
            effective_date: None,
        }
    }

    /// 建構器模式：設置狀態
    pub fn with_state(mut self, state: MoveState) -> Self {
        self.state = state;
        self
    }

    /// 建構器模式：設置批號
    pub fn with_lot(mut self, lot_id: String) -> Self {
        self.lot_id = Some(lot_id);
        self
    }

    /// 建構器模式：設置生效日期
    pub fn with_effective_date(mut self, date: NaiveDate) -> Self {
        self.effective_date = Some(date);
        self
    }

    /// 建構器模式：於指定日期完成
    pub fn done_on(self, date: NaiveDate) -> Self {
        self.with_state(MoveState::Done).with_effective_date(date)
    }

    pub fn is_cancelled(&self) -> bool {
        self.state == MoveState::Cancelled
    }

    /// 是否符合批號篩選（無篩選時一律符合）
    pub fn matches_lot(&self, lot_id: Option<&str>) -> bool {
        match lot_id {
            Some(lot) => self.lot_id.as_deref() == Some(lot),
            None => true,
        }
    }

    /// 換算到產品預設單位的數量
    pub fn default_quantity(&self) -> Result<Decimal> {
        self.uom.compute_qty(self.quantity, &self.product.default_uom)
    }
}
