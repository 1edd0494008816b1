//! 物料清單（BOM）模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Product, Uom};

/// BOM 明細行
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BomLine {
    /// 產品
    pub product: Product,

    /// 數量（以 `uom` 計）
    pub quantity: Decimal,

    /// 單位
    pub uom: Uom,
}

impl BomLine {
    pub fn new(product: Product, quantity: Decimal, uom: Uom) -> Self {
        Self {
            product,
            quantity,
            uom,
        }
    }
}

/// 物料清單：每批產出所需的投入
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bom {
    /// BOM ID
    pub id: String,

    /// 名稱
    pub name: String,

    /// 投入行
    pub inputs: Vec<BomLine>,

    /// 產出行
    pub outputs: Vec<BomLine>,
}

impl Bom {
    /// 創建空的 BOM
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// 建構器模式：添加投入行
    pub fn with_input(mut self, line: BomLine) -> Self {
        self.inputs.push(line);
        self
    }

    /// 建構器模式：添加產出行
    pub fn with_output(mut self, line: BomLine) -> Self {
        self.outputs.push(line);
        self
    }

    /// 查找指定產品的第一筆投入行
    pub fn find_input(&self, product: &Product) -> Option<&BomLine> {
        self.inputs.iter().find(|line| line.product.same_as(product))
    }

    /// 計算相對於 BOM 產出的比例係數
    ///
    /// 找到 `product` 的產出行後，將 `quantity`（以 `uom` 計）換算到產出行單位，
    /// 再除以產出行數量。沒有對應產出行、產出數量為零、單位不相容或超出範圍時回傳 `None`。
    pub fn compute_factor(
        &self,
        product: &Product,
        quantity: Decimal,
        uom: &Uom,
    ) -> Option<Decimal> {
        let output = self
            .outputs
            .iter()
            .find(|line| line.product.same_as(product))?;

        if output.quantity.is_zero() {
            return None;
        }

        let quantity = uom.compute_qty(quantity, &output.uom).ok()?;
        quantity.checked_div(output.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> Uom {
        Uom::new("u".to_string(), "Unit".to_string(), "units".to_string(), Decimal::ONE)
            .with_rounding(Decimal::ONE)
    }

    fn dozen() -> Uom {
        Uom::new("dz".to_string(), "Dozen".to_string(), "units".to_string(), Decimal::from(12))
    }

    fn product(id: &str) -> Product {
        Product::new(id.to_string(), id.to_string(), unit())
    }

    fn bom() -> Bom {
        Bom::new("BOM-1".to_string(), "Table".to_string())
            .with_input(BomLine::new(product("LEG"), Decimal::from(4), unit()))
            .with_input(BomLine::new(product("TOP"), Decimal::ONE, unit()))
            .with_output(BomLine::new(product("TABLE"), Decimal::from(2), unit()))
    }

    #[test]
    fn test_find_input() {
        let bom = bom();
        assert_eq!(bom.find_input(&product("LEG")).unwrap().quantity, Decimal::from(4));
        assert!(bom.find_input(&product("SCREW")).is_none());
    }

    #[test]
    fn test_compute_factor() {
        // 每 2 張桌子需要 4 支桌腳 → 係數 2
        let factor = bom()
            .compute_factor(&product("TABLE"), Decimal::from(4), &unit())
            .unwrap();
        assert_eq!(factor, Decimal::from(2));
    }

    #[test]
    fn test_compute_factor_converts_unit() {
        // 1 打 = 12 個，相對於 2 張桌子的產出 → 係數 6
        let factor = bom()
            .compute_factor(&product("TABLE"), Decimal::ONE, &dozen())
            .unwrap();
        assert_eq!(factor, Decimal::from(6));
    }

    #[test]
    fn test_compute_factor_missing_output() {
        assert!(bom()
            .compute_factor(&product("CHAIR"), Decimal::ONE, &unit())
            .is_none());
    }

    #[test]
    fn test_compute_factor_zero_output() {
        let bom = Bom::new("BOM-0".to_string(), "Broken".to_string())
            .with_output(BomLine::new(product("TABLE"), Decimal::ZERO, unit()));
        assert!(bom
            .compute_factor(&product("TABLE"), Decimal::ONE, &unit())
            .is_none());
    }
}
