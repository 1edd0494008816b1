//! 物料平衡報表配置

use serde::{Deserialize, Serialize};

use crate::{Direction, Result};

/// 物料平衡報表配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MassBalanceConfig {
    /// 公司（所有查詢都限定在此組織範圍內）
    pub company_id: String,

    /// 是否啟用批號追蹤
    /// - true: 請求可指定批號，查詢與追溯數量都依批號篩選
    /// - false: 請求帶批號時直接拒絕（預設）
    #[serde(default)]
    pub lot_tracking: bool,

    /// 請求未指定方向時採用的追溯方向
    #[serde(default)]
    pub default_direction: Direction,

    /// 差異百分比的顯示小數位數（None 表示不捨入）
    #[serde(default)]
    pub percent_digits: Option<u32>,
}

impl MassBalanceConfig {
    /// 創建新的配置
    pub fn new(company_id: String) -> Self {
        Self {
            company_id,
            lot_tracking: false,
            default_direction: Direction::Backward,
            percent_digits: None,
        }
    }

    /// 從 JSON 載入配置
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 建構器模式：設置批號追蹤
    pub fn with_lot_tracking(mut self, enabled: bool) -> Self {
        self.lot_tracking = enabled;
        self
    }

    /// 建構器模式：設置預設方向
    pub fn with_default_direction(mut self, direction: Direction) -> Self {
        self.default_direction = direction;
        self
    }

    /// 建構器模式：設置百分比顯示位數
    pub fn with_percent_digits(mut self, digits: u32) -> Self {
        self.percent_digits = Some(digits);
        self
    }
}
