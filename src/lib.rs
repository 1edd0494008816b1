//! # Mass Balance
//!
//! 生產物料平衡報表：比對工單的實際消耗與 BOM 計劃消耗

pub use balance_calc as calc;
pub use balance_core as model;

pub use balance_calc::{
    aggregate_across_orders, compute_order_balance, prepare_report, BalanceMap, BalanceRecord,
    InMemoryProductions, MassBalanceReport, ProductionBalanceLine, ProductionQuery,
    ProductionSource, ReportParameters,
};
pub use balance_core::{
    ActiveRecord, BalanceError, Bom, BomLine, Direction, Lot, MassBalanceConfig,
    MassBalanceRequest, Move, MoveSide, MoveState, Product, Production, Result, Uom,
};
