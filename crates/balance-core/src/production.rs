//! 生產工單模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Bom, Move, MoveSide, Product, Uom};

/// 生產工單
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Production {
    /// 工單ID
    pub id: Uuid,

    /// 工單編號（顯示名稱）
    pub number: String,

    /// 公司
    pub company_id: String,

    /// 主產品
    pub product: Product,

    /// 主單位
    pub uom: Uom,

    /// 計劃數量（以 `uom` 計）
    pub quantity: Decimal,

    /// 物料清單
    pub bom: Option<Bom>,

    /// 投入移動
    pub inputs: Vec<Move>,

    /// 產出移動
    pub outputs: Vec<Move>,
}

impl Production {
    /// 創建新的工單
    pub fn new(
        number: String,
        company_id: String,
        product: Product,
        uom: Uom,
        quantity: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            number,
            company_id,
            product,
            uom,
            quantity,
            bom: None,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// 建構器模式：設置 BOM
    pub fn with_bom(mut self, bom: Bom) -> Self {
        self.bom = Some(bom);
        self
    }

    /// 建構器模式：添加投入
    pub fn with_input(mut self, mv: Move) -> Self {
        self.inputs.push(mv);
        self
    }

    /// 建構器模式：添加產出
    pub fn with_output(mut self, mv: Move) -> Self {
        self.outputs.push(mv);
        self
    }

    /// 取得指定一側的移動
    pub fn moves(&self, side: MoveSide) -> &[Move] {
        match side {
            MoveSide::Inputs => &self.inputs,
            MoveSide::Outputs => &self.outputs,
        }
    }

    /// 工單單位的顯示小數位數
    pub fn unit_digits(&self) -> u32 {
        self.uom.digits
    }

    /// 顯示名稱
    pub fn rec_name(&self) -> &str {
        &self.number
    }
}
