//! 跨工單累計

use balance_core::{Direction, Product, Production};
use std::collections::btree_map::Entry;

use crate::balance::compute_order_balance;
use crate::record::BalanceMap;

/// 依序累計多張工單的物料平衡
///
/// 同一對手方產品的數值欄位相加，單位標籤取最後一張工單的值，
/// 各工單的貢獻保留在記錄的明細行中。
pub fn aggregate_across_orders<'a, I>(
    productions: I,
    requested_product: &Product,
    direction: Direction,
    lot_id: Option<&str>,
) -> BalanceMap
where
    I: IntoIterator<Item = &'a Production>,
{
    let mut records = BalanceMap::new();
    let mut order_count = 0usize;

    for production in productions {
        order_count += 1;
        let result = compute_order_balance(production, requested_product, direction, lot_id);

        for (product_id, record) in result {
            match records.entry(product_id) {
                Entry::Vacant(entry) => {
                    entry.insert(record);
                }
                Entry::Occupied(mut entry) => entry.get_mut().merge(record),
            }
        }
    }

    tracing::debug!(
        "累計 {} 張工單，對手方產品 {} 個",
        order_count,
        records.len()
    );

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use balance_core::{Bom, BomLine, Move, Uom};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn unit() -> Uom {
        Uom::new("u".to_string(), "Unit".to_string(), "units".to_string(), Decimal::ONE)
            .with_rounding(Decimal::ONE)
    }

    fn product(id: &str) -> Product {
        Product::new(id.to_string(), id.to_string(), unit())
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 3).unwrap()
    }

    /// 麵包：每條 2 份麵粉、1 份酵母
    fn bread_order(number: &str, loaves: i64, flour: i64) -> Production {
        let bom = Bom::new("BOM-BREAD".to_string(), "Bread".to_string())
            .with_input(BomLine::new(product("FLOUR"), Decimal::from(2), unit()))
            .with_input(BomLine::new(product("YEAST"), Decimal::ONE, unit()))
            .with_output(BomLine::new(product("BREAD"), Decimal::ONE, unit()));

        Production::new(
            number.to_string(),
            "COMPANY-1".to_string(),
            product("BREAD"),
            unit(),
            Decimal::from(loaves),
        )
        .with_bom(bom)
        .with_input(Move::new(product("FLOUR"), Decimal::from(flour), unit()).done_on(today()))
        .with_output(Move::new(product("BREAD"), Decimal::from(loaves), unit()).done_on(today()))
    }

    #[test]
    fn test_empty_input() {
        let orders: Vec<Production> = Vec::new();
        let records =
            aggregate_across_orders(&orders, &product("BREAD"), Direction::Backward, None);
        assert!(records.is_empty());
    }

    #[test]
    fn test_sums_shared_keys() {
        let orders = vec![bread_order("MO-1", 10, 21), bread_order("MO-2", 5, 10)];
        let records =
            aggregate_across_orders(&orders, &product("BREAD"), Direction::Backward, None);

        let flour = &records["FLOUR"];
        assert_eq!(flour.balance_quantity, Decimal::from(15));
        assert_eq!(flour.balance_consumption, Decimal::from(31));
        assert_eq!(flour.balance_plan_consumption, Decimal::from(30));
        assert_eq!(flour.balance_difference, Decimal::ONE);
        assert_eq!(flour.lines.len(), 2);
        assert_eq!(flour.lines[0].name, "MO-1");
        assert_eq!(flour.lines[1].name, "MO-2");
    }

    #[test]
    fn test_union_of_keys() {
        let with_yeast = bread_order("MO-3", 4, 8)
            .with_input(Move::new(product("YEAST"), Decimal::from(4), unit()).done_on(today()));
        let orders = vec![bread_order("MO-1", 10, 20), with_yeast];

        let records =
            aggregate_across_orders(&orders, &product("BREAD"), Direction::Backward, None);

        assert_eq!(records.len(), 2);
        assert_eq!(records["YEAST"].lines.len(), 1);
        assert_eq!(records["YEAST"].balance_quantity, Decimal::from(4));
        assert_eq!(records["FLOUR"].lines.len(), 2);
    }
}
