//! 單一工單的物料平衡計算

use balance_core::{BalanceError, Direction, Move, Product, Production};
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeMap;

use crate::record::{difference_percent, BalanceMap, BalanceRecord, ProductionBalanceLine};

/// 計算單一工單的物料平衡
///
/// 追溯側（反向為產出、正向為投入）累計請求產品的數量，對手側依產品累計，
/// 每個對手方產品產生一筆記錄。已取消的移動一律不計；`lot_id` 只篩選追溯側。
pub fn compute_order_balance(
    production: &Production,
    requested_product: &Product,
    direction: Direction,
    lot_id: Option<&str>,
) -> BalanceMap {
    let digits = production.unit_digits();

    let traced_qty: Decimal = production
        .moves(direction.traced_side())
        .iter()
        .filter(|mv| !mv.is_cancelled())
        .filter(|mv| mv.product.same_as(requested_product))
        .filter(|mv| mv.matches_lot(lot_id))
        .map(|mv| default_quantity(production, mv))
        .fold(Decimal::ZERO, Decimal::saturating_add);

    // 對手方產品 → (產品, 累計數量)
    let mut counterparty: BTreeMap<String, (Product, Decimal)> = BTreeMap::new();
    for mv in production.moves(direction.counterparty_side()) {
        if mv.is_cancelled() {
            continue;
        }
        let qty = default_quantity(production, mv);
        let total = &mut counterparty
            .entry(mv.product.id.clone())
            .or_insert_with(|| (mv.product.clone(), Decimal::ZERO))
            .1;
        *total = total.saturating_add(qty);
    }

    tracing::debug!(
        "工單 {} ({}): 追溯數量 {}，對手方產品 {} 個",
        production.rec_name(),
        direction,
        traced_qty,
        counterparty.len()
    );

    let mut result = BalanceMap::new();
    for (product_id, (product, qty)) in counterparty {
        let line = match direction {
            Direction::Backward => {
                let plan = planned_consumption(production, &product);
                let consumption = qty;
                ProductionBalanceLine {
                    production_id: production.id,
                    name: production.rec_name().to_string(),
                    product: production.product.clone(),
                    uom: production.uom.clone(),
                    default_uom: product.default_uom.clone(),
                    balance_quantity: traced_qty,
                    balance_consumption: consumption,
                    balance_plan_consumption: plan,
                    balance_difference: round_to_digits(qty.saturating_sub(plan), digits),
                    balance_difference_percent: difference_percent(consumption, plan),
                    balance_quantity_uom: requested_product.default_uom.clone(),
                    balance_consumption_uom: product.default_uom.clone(),
                    balance_plan_consumption_uom: product.default_uom.clone(),
                    balance_difference_uom: product.default_uom.clone(),
                }
            }
            Direction::Forward => {
                // 正向：全部以被追溯物料的角度表示
                let plan = planned_consumption(production, requested_product);
                let consumption = traced_qty;
                ProductionBalanceLine {
                    production_id: production.id,
                    name: production.rec_name().to_string(),
                    product: production.product.clone(),
                    uom: production.uom.clone(),
                    default_uom: product.default_uom.clone(),
                    balance_quantity: traced_qty,
                    balance_consumption: consumption,
                    balance_plan_consumption: plan,
                    balance_difference: round_to_digits(traced_qty.saturating_sub(plan), digits),
                    balance_difference_percent: difference_percent(consumption, plan),
                    balance_quantity_uom: requested_product.default_uom.clone(),
                    balance_consumption_uom: requested_product.default_uom.clone(),
                    balance_plan_consumption_uom: requested_product.default_uom.clone(),
                    balance_difference_uom: requested_product.default_uom.clone(),
                }
            }
        };

        tracing::debug!(
            "工單 {} 對手方 {}: 消耗 {}，計劃 {}，差異 {}",
            production.rec_name(),
            product_id,
            line.balance_consumption,
            line.balance_plan_consumption,
            line.balance_difference
        );

        result.insert(product_id, BalanceRecord::from_line(product, line));
    }

    result
}

/// 依 BOM 計算計劃消耗
///
/// 取 `component` 的 BOM 投入行，換算成相對於工單產品的係數後乘以工單數量，
/// 並向上取整到工單產品的預設單位。沒有 BOM、沒有對應投入行、無法換算或超出數值範圍時為零。
pub fn planned_consumption(production: &Production, component: &Product) -> Decimal {
    let Some(bom) = &production.bom else {
        return Decimal::ZERO;
    };

    let Some(line) = bom.find_input(component) else {
        tracing::debug!(
            "工單 {} 的 BOM {} 沒有 {} 的投入行",
            production.rec_name(),
            bom.id,
            component.id
        );
        return Decimal::ZERO;
    };

    let default_uom = &production.product.default_uom;
    let bom_qty = match line.uom.compute_qty(line.quantity, &line.product.default_uom) {
        Ok(qty) => qty,
        Err(err) => {
            tracing::warn!("BOM {} 投入行 {} 無法換算: {}", bom.id, component.id, err);
            return Decimal::ZERO;
        }
    };

    let Some(factor) = bom.compute_factor(&production.product, bom_qty, default_uom) else {
        tracing::warn!(
            "BOM {} 無法計算產品 {} 的係數",
            bom.id,
            production.product.id
        );
        return Decimal::ZERO;
    };

    let plan = production
        .quantity
        .checked_mul(factor)
        .ok_or_else(|| BalanceError::QuantityOverflow(default_uom.id.clone()))
        .and_then(|qty| default_uom.ceil(qty));

    plan.unwrap_or_else(|err| {
        tracing::warn!(
            "工單 {} 對 {} 的計劃消耗無法計算: {}",
            production.rec_name(),
            component.id,
            err
        );
        Decimal::ZERO
    })
}

/// 移動數量換算到產品預設單位，無法換算時記為零
fn default_quantity(production: &Production, mv: &Move) -> Decimal {
    mv.default_quantity().unwrap_or_else(|err| {
        tracing::warn!(
            "工單 {} 的移動 {} 無法換算到預設單位: {}",
            production.rec_name(),
            mv.id,
            err
        );
        Decimal::ZERO
    })
}

fn round_to_digits(value: Decimal, digits: u32) -> Decimal {
    value.round_dp_with_strategy(digits, RoundingStrategy::MidpointNearestEven)
}
