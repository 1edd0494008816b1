//! 報表請求的建構與驗證

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{BalanceError, Direction, Lot, MassBalanceConfig, Product, Result};

/// 啟動報表時所在的紀錄，用於帶出預設值
#[derive(Debug, Clone)]
pub enum ActiveRecord {
    /// 產品範本（取第一個變體）
    Template { products: Vec<Product> },
    /// 產品
    Product(Product),
    /// 批號（同時帶出所屬產品）
    Lot(Lot),
}

/// 物料平衡報表請求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MassBalanceRequest {
    /// 追溯的產品
    pub product: Product,

    /// 起始日（與結束日同時指定）
    pub from_date: Option<NaiveDate>,

    /// 結束日（與起始日同時指定）
    pub to_date: Option<NaiveDate>,

    /// 追溯方向
    pub direction: Direction,

    /// 批號篩選（僅在啟用批號追蹤時）
    pub lot: Option<Lot>,
}

impl MassBalanceRequest {
    /// 創建新的請求
    pub fn new(product: Product, direction: Direction) -> Self {
        Self {
            product,
            from_date: None,
            to_date: None,
            direction,
            lot: None,
        }
    }

    /// 依啟動紀錄帶出預設值
    ///
    /// 範本沒有任何變體時回傳 `None`；未啟用批號追蹤時只帶出批號的產品。
    pub fn from_active_record(record: ActiveRecord, config: &MassBalanceConfig) -> Option<Self> {
        let direction = config.default_direction;
        match record {
            ActiveRecord::Template { products } => products
                .into_iter()
                .next()
                .map(|product| Self::new(product, direction)),
            ActiveRecord::Product(product) => Some(Self::new(product, direction)),
            ActiveRecord::Lot(lot) => {
                let request = Self::new(lot.product.clone(), direction);
                if config.lot_tracking {
                    Some(request.with_lot(lot))
                } else {
                    Some(request)
                }
            }
        }
    }

    /// 建構器模式：設置日期區間
    pub fn with_date_range(mut self, from_date: NaiveDate, to_date: NaiveDate) -> Self {
        self.from_date = Some(from_date);
        self.to_date = Some(to_date);
        self
    }

    /// 建構器模式：設置起始日
    pub fn with_from_date(mut self, from_date: NaiveDate) -> Self {
        self.from_date = Some(from_date);
        self
    }

    /// 建構器模式：設置結束日
    pub fn with_to_date(mut self, to_date: NaiveDate) -> Self {
        self.to_date = Some(to_date);
        self
    }

    /// 建構器模式：設置批號
    pub fn with_lot(mut self, lot: Lot) -> Self {
        self.lot = Some(lot);
        self
    }

    /// 驗證請求
    pub fn validate(&self, config: &MassBalanceConfig) -> Result<()> {
        match (self.from_date, self.to_date) {
            (Some(from), Some(to)) if from > to => {
                return Err(BalanceError::InvalidDateRange { from, to });
            }
            (Some(_), None) | (None, Some(_)) => return Err(BalanceError::IncompleteDateRange),
            _ => {}
        }

        if let Some(lot) = &self.lot {
            if !config.lot_tracking {
                return Err(BalanceError::LotTrackingDisabled(lot.number.clone()));
            }
            if !lot.belongs_to(&self.product) {
                return Err(BalanceError::LotProductMismatch {
                    lot: lot.number.clone(),
                    product: self.product.id.clone(),
                });
            }
        }

        Ok(())
    }

    /// 查詢用起始日（未指定時為最小日期）
    pub fn effective_from_date(&self) -> NaiveDate {
        self.from_date.unwrap_or(NaiveDate::MIN)
    }

    /// 查詢用結束日（未指定時為最大日期）
    pub fn effective_to_date(&self) -> NaiveDate {
        self.to_date.unwrap_or(NaiveDate::MAX)
    }

    /// 報表是否顯示日期區間
    pub fn show_date(&self) -> bool {
        self.from_date.is_some()
    }

    pub fn lot_id(&self) -> Option<&str> {
        self.lot.as_ref().map(|lot| lot.id.as_str())
    }
}
