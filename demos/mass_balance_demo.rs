//! 物料平衡報表示例

use chrono::NaiveDate;
use mass_balance::*;
use rust_decimal::Decimal;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== 物料平衡報表示例 ===\n");

    let unit = Uom::new("u".to_string(), "Unit".to_string(), "units".to_string(), Decimal::ONE)
        .with_rounding(Decimal::ONE);
    let meter = Uom::new("m".to_string(), "Meter".to_string(), "length".to_string(), Decimal::ONE);
    let centimeter = Uom::new(
        "cm".to_string(),
        "Centimeter".to_string(),
        "length".to_string(),
        Decimal::new(1, 2),
    );

    let lamp = Product::new("LAMP".to_string(), "Desk Lamp".to_string(), unit.clone());
    let bulb = Product::new("BULB".to_string(), "Bulb".to_string(), unit.clone());
    let cable = Product::new("CABLE".to_string(), "Cable".to_string(), meter.clone());

    // 每盞燈：1 顆燈泡、150 公分電線
    let bom = Bom::new("BOM-LAMP".to_string(), "Desk Lamp".to_string())
        .with_input(BomLine::new(bulb.clone(), Decimal::ONE, unit.clone()))
        .with_input(BomLine::new(cable.clone(), Decimal::from(150), centimeter.clone()))
        .with_output(BomLine::new(lamp.clone(), Decimal::ONE, unit.clone()));

    let day = NaiveDate::from_ymd_opt(2025, 11, 3).ok_or_else(|| anyhow::anyhow!("無效日期"))?;

    let production = |number: &str, lamps: i64, bulbs: i64, cable_cm: i64| {
        Production::new(
            number.to_string(),
            "COMPANY-1".to_string(),
            lamp.clone(),
            unit.clone(),
            Decimal::from(lamps),
        )
        .with_bom(bom.clone())
        .with_input(Move::new(bulb.clone(), Decimal::from(bulbs), unit.clone()).done_on(day))
        .with_input(
            Move::new(cable.clone(), Decimal::from(cable_cm), centimeter.clone()).done_on(day),
        )
        .with_output(Move::new(lamp.clone(), Decimal::from(lamps), unit.clone()).done_on(day))
    };

    let source = InMemoryProductions::new(vec![
        production("MO-0001", 10, 10, 1500),
        production("MO-0002", 4, 5, 640),
    ]);

    let config = MassBalanceConfig::new("COMPANY-1".to_string()).with_percent_digits(2);
    let request = MassBalanceRequest::new(lamp.clone(), Direction::Backward)
        .with_date_range(day, day);

    let report = prepare_report(&request, &source, &config)?;

    println!("產品: {}，方向: {}", lamp.name, report.parameters.direction);
    for record in &report.records {
        println!(
            "  - {}: 實際 {} {}，計劃 {} {}，差異 {} ({}%)",
            record.product.name,
            record.balance_consumption,
            record.balance_consumption_uom.symbol,
            record.balance_plan_consumption,
            record.balance_plan_consumption_uom.symbol,
            record.balance_difference,
            record.balance_difference_percent,
        );
        for line in &record.lines {
            println!(
                "      {}: 實際 {}，計劃 {}",
                line.name, line.balance_consumption, line.balance_plan_consumption
            );
        }
    }

    println!("\n{}", report.to_json()?);

    Ok(())
}
