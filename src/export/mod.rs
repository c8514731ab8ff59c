//! Export module for the cash-flow CLI
//!
//! Provides data export in multiple formats:
//! - CSV: stored records (spreadsheet-compatible)
//! - JSON: monthly chart data for charting front ends
//! - YAML: the same chart data, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::export_records_csv;
pub use json::{export_chart_json, ChartExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_chart_yaml;
