//! # Mass Balance Calculation Engine
//!
//! 物料平衡計算：單一工單的平衡、跨工單累計與報表資料準備

pub mod aggregate;
pub mod balance;
pub mod query;
pub mod record;
pub mod report;

// Re-export 主要類型
pub use aggregate::aggregate_across_orders;
pub use balance::{compute_order_balance, planned_consumption};
pub use query::{InMemoryProductions, ProductionQuery, ProductionSource};
pub use record::{difference_percent, BalanceMap, BalanceRecord, ProductionBalanceLine};
pub use report::{prepare_report, MassBalanceReport, ReportParameters};
