//! 報表資料準備

use balance_core::{Direction, Lot, MassBalanceConfig, MassBalanceRequest, Product, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::aggregate_across_orders;
use crate::query::{ProductionQuery, ProductionSource};
use crate::record::BalanceRecord;

/// 報表顯示參數
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportParameters {
    pub direction: Direction,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,

    /// 是否顯示日期區間（僅在指定起始日時）
    pub show_date: bool,

    pub requested_product: Product,
    pub lot: Option<Lot>,
    pub company_id: String,

    /// 產生時間
    pub generated_at: DateTime<Utc>,
}

/// 物料平衡報表（交給渲染層的資料）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MassBalanceReport {
    pub parameters: ReportParameters,

    /// 依對手方產品ID排序的記錄
    pub records: Vec<BalanceRecord>,
}

impl MassBalanceReport {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 取得指定對手方產品的記錄
    pub fn record(&self, product_id: &str) -> Option<&BalanceRecord> {
        self.records.iter().find(|record| record.product.id == product_id)
    }

    /// 序列化為 JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// 準備物料平衡報表
///
/// 驗證請求、查詢工單並累計；查無工單時回傳空報表。
pub fn prepare_report<S>(
    request: &MassBalanceRequest,
    source: &S,
    config: &MassBalanceConfig,
) -> Result<MassBalanceReport>
where
    S: ProductionSource + ?Sized,
{
    request.validate(config)?;

    tracing::info!(
        "開始物料平衡報表：產品 {}，方向 {}，批號 {:?}",
        request.product.id,
        request.direction,
        request.lot_id()
    );

    let start_time = std::time::Instant::now();

    let query = ProductionQuery::from_request(request, config);
    let productions = source.search(&query).map_err(|err| {
        tracing::warn!("工單查詢失敗: {}", err);
        err
    })?;
    tracing::debug!("符合條件的工單: {} 張", productions.len());

    let records = aggregate_across_orders(
        &productions,
        &request.product,
        request.direction,
        request.lot_id(),
    );

    let mut records: Vec<BalanceRecord> = records.into_values().collect();
    if let Some(digits) = config.percent_digits {
        for record in &mut records {
            record.round_percent(digits);
        }
    }

    let parameters = ReportParameters {
        direction: request.direction,
        from_date: query.from_date,
        to_date: query.to_date,
        show_date: request.show_date(),
        requested_product: request.product.clone(),
        lot: request.lot.clone(),
        company_id: config.company_id.clone(),
        generated_at: Utc::now(),
    };

    tracing::info!(
        "物料平衡報表完成，工單 {} 張，記錄 {} 筆，耗時 {:?}",
        productions.len(),
        records.len(),
        start_time.elapsed()
    );

    Ok(MassBalanceReport {
        parameters,
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use balance_core::{BalanceError, Bom, BomLine, Move, Production, Uom};
    use rust_decimal::Decimal;

    use crate::query::InMemoryProductions;

    fn unit() -> Uom {
        Uom::new("u".to_string(), "Unit".to_string(), "units".to_string(), Decimal::ONE)
            .with_rounding(Decimal::ONE)
    }

    fn product(id: &str) -> Product {
        Product::new(id.to_string(), id.to_string(), unit())
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, day).unwrap()
    }

    fn source() -> InMemoryProductions {
        let bom = Bom::new("BOM-1".to_string(), "Chair".to_string())
            .with_input(BomLine::new(product("LEG"), Decimal::from(4), unit()))
            .with_output(BomLine::new(product("CHAIR"), Decimal::ONE, unit()));

        let chair_order = |number: &str, chairs: i64, legs: i64, day: u32| {
            Production::new(
                number.to_string(),
                "COMPANY-1".to_string(),
                product("CHAIR"),
                unit(),
                Decimal::from(chairs),
            )
            .with_bom(bom.clone())
            .with_input(Move::new(product("LEG"), Decimal::from(legs), unit()).done_on(date(day)))
            .with_output(
                Move::new(product("CHAIR"), Decimal::from(chairs), unit()).done_on(date(day)),
            )
        };

        InMemoryProductions::new(vec![
            chair_order("MO-1", 3, 12, 3),
            chair_order("MO-2", 3, 13, 10),
        ])
    }

    fn config() -> MassBalanceConfig {
        MassBalanceConfig::new("COMPANY-1".to_string())
    }

    #[test]
    fn test_prepare_report() {
        let request = MassBalanceRequest::new(product("CHAIR"), Direction::Backward);
        let report = prepare_report(&request, &source(), &config()).unwrap();

        assert!(!report.parameters.show_date);
        assert_eq!(report.parameters.from_date, NaiveDate::MIN);
        assert_eq!(report.parameters.company_id, "COMPANY-1");

        let legs = report.record("LEG").unwrap();
        assert_eq!(legs.balance_quantity, Decimal::from(6));
        assert_eq!(legs.balance_consumption, Decimal::from(25));
        assert_eq!(legs.balance_plan_consumption, Decimal::from(24));
        assert_eq!(legs.balance_difference, Decimal::ONE);
        assert_eq!(legs.lines.len(), 2);
    }

    #[test]
    fn test_prepare_report_with_dates() {
        let request = MassBalanceRequest::new(product("CHAIR"), Direction::Backward)
            .with_date_range(date(1), date(5));
        let report = prepare_report(&request, &source(), &config()).unwrap();

        assert!(report.parameters.show_date);
        let legs = report.record("LEG").unwrap();
        assert_eq!(legs.lines.len(), 1);
        assert_eq!(legs.balance_consumption, Decimal::from(12));
    }

    #[test]
    fn test_no_matching_orders() {
        let request = MassBalanceRequest::new(product("TABLE"), Direction::Backward);
        let report = prepare_report(&request, &source(), &config()).unwrap();
        assert!(report.is_empty());
    }

    /// 無法連線的工單來源
    struct UnavailableSource;

    impl ProductionSource for UnavailableSource {
        fn search(&self, _query: &ProductionQuery) -> Result<Vec<Production>> {
            Err(BalanceError::SourceError("資料庫連線逾時".to_string()))
        }
    }

    #[test]
    fn test_source_error_propagated() {
        let request = MassBalanceRequest::new(product("CHAIR"), Direction::Backward);
        let result = prepare_report(&request, &UnavailableSource, &config());
        assert!(matches!(result, Err(BalanceError::SourceError(_))));
    }

    #[test]
    fn test_invalid_request_rejected() {
        let request = MassBalanceRequest::new(product("CHAIR"), Direction::Backward)
            .with_date_range(date(9), date(1));
        let result = prepare_report(&request, &source(), &config());
        assert!(matches!(result, Err(BalanceError::InvalidDateRange { .. })));
    }

    #[test]
    fn test_percent_digits() {
        let request = MassBalanceRequest::new(product("CHAIR"), Direction::Backward)
            .with_date_range(date(10), date(10));
        let config = config().with_percent_digits(1);
        let report = prepare_report(&request, &source(), &config).unwrap();

        // (13 - 12) / 12 × 100 = 8.333...
        let legs = report.record("LEG").unwrap();
        assert_eq!(legs.balance_difference_percent, Decimal::new(83, 1));
        assert_eq!(legs.lines[0].balance_difference_percent, Decimal::new(83, 1));
    }

    #[test]
    fn test_to_json() {
        let request = MassBalanceRequest::new(product("CHAIR"), Direction::Backward);
        let report = prepare_report(&request, &source(), &config()).unwrap();
        let json = report.to_json().unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["parameters"]["direction"], "backward");
        assert_eq!(value["records"][0]["product"]["id"], "LEG");
        assert_eq!(value["records"][0]["lines"].as_array().unwrap().len(), 2);
    }
}
