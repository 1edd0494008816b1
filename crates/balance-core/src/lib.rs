//! # Mass Balance Core
//!
//! 物料平衡報表的核心資料模型與類型定義

pub mod bom;
pub mod config;
pub mod direction;
pub mod movement;
pub mod product;
pub mod production;
pub mod request;
pub mod uom;

// Re-export 主要類型
pub use bom::{Bom, BomLine};
pub use config::MassBalanceConfig;
pub use direction::{Direction, MoveSide};
pub use movement::{Move, MoveState};
pub use product::{Lot, Product};
pub use production::Production;
pub use request::{ActiveRecord, MassBalanceRequest};
pub use uom::Uom;

use chrono::NaiveDate;

/// 物料平衡錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum BalanceError {
    #[error("無效的日期區間: 起始日 {from} 晚於結束日 {to}")]
    InvalidDateRange { from: NaiveDate, to: NaiveDate },

    #[error("起始日與結束日必須同時指定")]
    IncompleteDateRange,

    #[error("未啟用批號追蹤，不能指定批號: {0}")]
    LotTrackingDisabled(String),

    #[error("批號 {lot} 不屬於產品 {product}")]
    LotProductMismatch { lot: String, product: String },

    #[error("單位不相容: {from} → {to}")]
    IncompatibleUom { from: String, to: String },

    #[error("單位換算係數無效: {0}")]
    InvalidUomFactor(String),

    #[error("數量超出可表示範圍（單位 {0}）")]
    QuantityOverflow(String),

    #[error("工單查詢失敗: {0}")]
    SourceError(String),

    #[error("JSON 處理失敗: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BalanceError>;
