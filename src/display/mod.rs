//! Display formatting for terminal output
//!
//! Provides utilities for formatting report data for terminal display.

pub mod report;

pub use report::{double_separator, format_bar, format_money_colored, format_signed_bar, separator};
