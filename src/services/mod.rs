//! Service layer for the cash-flow CLI
//!
//! Business logic on top of the models and storage: monthly aggregation and
//! CSV import.

pub mod aggregation;
pub mod import;

pub use aggregation::{aggregate, generate_monthly_chart_data, AggregationStats, MonthlyAggregation};
pub use import::{ColumnMapping, CsvFormat, ImportResult, ImportService, RowError};
