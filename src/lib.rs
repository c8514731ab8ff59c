//! Cash-Flow CLI - monthly cash-flow summaries for rental properties
//!
//! This library turns dated income/expense/maintenance records into
//! fixed-length, newest-first monthly summaries suitable for charting, and
//! wraps them with a record store, CSV import, reports and exports.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `logging`: `tracing` subscriber setup for the binary
//! - `models`: Money, months, period selectors, records and monthly buckets
//! - `storage`: JSON file storage layer
//! - `services`: Monthly aggregation and CSV import
//! - `reports`: The cash-flow report
//! - `export`: JSON/YAML chart data and CSV record export
//! - `display`: Terminal formatting helpers
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use cashflow_cli::models::PeriodSelector;
//! use cashflow_cli::services::generate_monthly_chart_data;
//!
//! let reference = chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
//! let months = generate_monthly_chart_data(&records, &PeriodSelector::YearToDate, reference);
//! assert_eq!(months.len(), 3);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{CashflowError, CashflowResult};
