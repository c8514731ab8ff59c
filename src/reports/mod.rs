//! Reports module for the cash-flow CLI
//!
//! Provides the monthly cash-flow report built on the aggregation service.

pub mod cash_flow;

pub use cash_flow::{CashFlowReport, CashFlowTotals, ReportStyle};
