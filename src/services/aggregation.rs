//! Monthly cash-flow aggregation
//!
//! Folds a sequence of cash-flow records into one bucket per month of a
//! trailing window. The window is seeded up front, so every month appears in
//! the output even when no record falls in it, and records outside the window
//! are dropped rather than widening it.
//!
//! Aggregation never fails: bad amounts count as zero and records without a
//! usable timestamp are skipped with a warning.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{debug, trace, warn};

use crate::models::{CashFlowRecord, MonthKey, MonthlyBucket, PeriodSelector, TimestampIssue};

/// Counts of how each input record was handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregationStats {
    /// Records folded into a bucket
    pub accepted: usize,
    /// Records without a timestamp
    pub missing_timestamp: usize,
    /// Records whose timestamp does not start with `YYYY-MM`
    pub malformed_timestamp: usize,
    /// Records dated outside the window
    pub out_of_window: usize,
}

impl AggregationStats {
    /// Records that were not aggregated for any reason
    pub fn skipped(&self) -> usize {
        self.missing_timestamp + self.malformed_timestamp + self.out_of_window
    }

    pub fn total(&self) -> usize {
        self.accepted + self.skipped()
    }
}

/// Result of one aggregation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyAggregation {
    /// One bucket per window month, newest first
    pub buckets: Vec<MonthlyBucket>,
    pub stats: AggregationStats,
}

/// Seed zero-filled buckets for the window ending at `reference`, oldest first
fn seed_window(selector: &PeriodSelector, reference: NaiveDate) -> BTreeMap<MonthKey, MonthlyBucket> {
    let months = selector.window_months(reference);
    let current = MonthKey::from_date(reference);

    debug!(
        period = %selector,
        months,
        reference = %reference,
        "Resolved aggregation window"
    );

    // Months before chrono's earliest date have no first day to chart
    (0..months)
        .rev()
        .map(|offset| current.back(offset))
        .filter(|month| month.checked_start_date().is_some())
        .map(|month| (month, MonthlyBucket::empty(month)))
        .collect()
}

/// Aggregate records into monthly buckets and report how each was handled
pub fn aggregate<'a, I>(
    records: I,
    selector: &PeriodSelector,
    reference: NaiveDate,
) -> MonthlyAggregation
where
    I: IntoIterator<Item = &'a CashFlowRecord>,
{
    let mut buckets = seed_window(selector, reference);
    let mut stats = AggregationStats::default();

    for record in records {
        let month = match record.month_key() {
            Ok(month) => month,
            Err(TimestampIssue::Missing) => {
                warn!("Skipping cash-flow record without timestamp");
                stats.missing_timestamp += 1;
                continue;
            }
            Err(TimestampIssue::Malformed(e)) => {
                warn!(
                    timestamp = record.timestamp.as_deref().unwrap_or_default(),
                    "Skipping cash-flow record: {}", e
                );
                stats.malformed_timestamp += 1;
                continue;
            }
        };

        match buckets.get_mut(&month) {
            Some(bucket) => {
                bucket.accumulate(record.amounts());
                stats.accepted += 1;
            }
            None => {
                trace!(month = %month, "Dropping cash-flow record outside window");
                stats.out_of_window += 1;
            }
        }
    }

    MonthlyAggregation {
        buckets: buckets.into_values().rev().collect(),
        stats,
    }
}

/// Build chart data: one bucket per window month, newest first
///
/// `reference` anchors the window; pass a fixed date for reproducible output.
pub fn generate_monthly_chart_data<'a, I>(
    records: I,
    selector: &PeriodSelector,
    reference: NaiveDate,
) -> Vec<MonthlyBucket>
where
    I: IntoIterator<Item = &'a CashFlowRecord>,
{
    aggregate(records, selector, reference).buckets
}
