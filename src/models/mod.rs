//! Core data models for the cash-flow CLI
//!
//! This module contains the data structures of the cash-flow domain: money
//! amounts, calendar months, period selectors, raw records, and the monthly
//! buckets produced by aggregation.

pub mod bucket;
pub mod money;
pub mod month;
pub mod period;
pub mod record;

pub use bucket::MonthlyBucket;
pub use money::Money;
pub use month::MonthKey;
pub use period::{DateRange, PeriodSelector};
pub use record::{CashFlowRecord, RawAmount, RecordAmounts, TimestampIssue};
