//! 產品與批號模型

use serde::{Deserialize, Serialize};

use crate::Uom;

/// 產品
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// 產品ID
    pub id: String,

    /// 產品名稱
    pub name: String,

    /// 預設單位（所有平衡數量都換算到此單位）
    pub default_uom: Uom,
}

impl Product {
    /// 創建新的產品
    pub fn new(id: String, name: String, default_uom: Uom) -> Self {
        Self {
            id,
            name,
            default_uom,
        }
    }

    /// 是否為同一產品（依ID比較）
    pub fn same_as(&self, other: &Product) -> bool {
        self.id == other.id
    }
}

/// 批號（追溯批次）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lot {
    /// 批號ID
    pub id: String,

    /// 批號編碼
    pub number: String,

    /// 所屬產品
    pub product: Product,
}

impl Lot {
    pub fn new(id: String, number: String, product: Product) -> Self {
        Self {
            id,
            number,
            product,
        }
    }

    /// 檢查批號是否屬於指定產品
    pub fn belongs_to(&self, product: &Product) -> bool {
        self.product.same_as(product)
    }
}
