//! 工單查詢介面

use balance_core::{
    Direction, MassBalanceConfig, MassBalanceRequest, MoveState, Production, Result,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 工單查詢條件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionQuery {
    /// 追溯側的產品
    pub product_id: String,

    /// 追溯方向（決定比對投入或產出）
    pub direction: Direction,

    /// 生效日區間（含頭尾）
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,

    /// 批號
    pub lot_id: Option<String>,

    /// 公司
    pub company_id: String,

    /// 移動狀態
    pub state: MoveState,
}

impl ProductionQuery {
    /// 由請求與配置建立查詢（僅查已完成的移動）
    pub fn from_request(request: &MassBalanceRequest, config: &MassBalanceConfig) -> Self {
        Self {
            product_id: request.product.id.clone(),
            direction: request.direction,
            from_date: request.effective_from_date(),
            to_date: request.effective_to_date(),
            lot_id: request.lot_id().map(str::to_string),
            company_id: config.company_id.clone(),
            state: MoveState::Done,
        }
    }

    /// 工單是否符合條件
    ///
    /// 追溯側須有一筆移動同時符合產品、狀態、日期區間與批號。
    ///
    /// 注意：這比 ERP 原本的搜尋嚴格。原本每個移動條件各自成為獨立的子查詢，
    /// 只要不同移動分別滿足各條件，工單就會被選中。實作資料庫後端時若要相容，
    /// 需改為逐條件比對。
    pub fn matches(&self, production: &Production) -> bool {
        if production.company_id != self.company_id {
            return false;
        }

        production
            .moves(self.direction.traced_side())
            .iter()
            .any(|mv| {
                mv.product.id == self.product_id
                    && mv.state == self.state
                    && mv
                        .effective_date
                        .is_some_and(|date| self.from_date <= date && date <= self.to_date)
                    && mv.matches_lot(self.lot_id.as_deref())
            })
    }
}

/// 工單來源（由 ERP 的資料層實作）
pub trait ProductionSource {
    /// 查詢符合條件的工單
    fn search(&self, query: &ProductionQuery) -> Result<Vec<Production>>;
}

/// 記憶體內的工單來源
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductions {
    productions: Vec<Production>,
}

impl InMemoryProductions {
    pub fn new(productions: Vec<Production>) -> Self {
        Self { productions }
    }

    /// 添加工單
    pub fn add(&mut self, production: Production) {
        self.productions.push(production);
    }

    pub fn len(&self) -> usize {
        self.productions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.productions.is_empty()
    }
}

impl ProductionSource for InMemoryProductions {
    fn search(&self, query: &ProductionQuery) -> Result<Vec<Production>> {
        Ok(self
            .productions
            .iter()
            .filter(|production| query.matches(production))
            .cloned()
            .collect())
    }
}
