//! Monthly cash-flow buckets
//!
//! A bucket accumulates one calendar month's totals. Its serialized form is
//! the chart-data shape: `date`, `monthLabel`, `income`, `expenses`,
//! `maintenance`, `netIncome`, with amounts as decimal numbers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::money::{self, Money};
use super::month::MonthKey;
use super::record::RecordAmounts;

/// Totals for one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBucket {
    /// First day of the month
    pub date: NaiveDate,
    /// "Mon YYYY"
    pub month_label: String,
    #[serde(with = "money::as_decimal")]
    pub income: Money,
    #[serde(with = "money::as_decimal")]
    pub expenses: Money,
    #[serde(with = "money::as_decimal")]
    pub maintenance: Money,
    /// `income - (expenses + maintenance)`
    #[serde(with = "money::as_decimal")]
    pub net_income: Money,
}

impl MonthlyBucket {
    /// A zero-filled bucket for `month`
    pub fn empty(month: MonthKey) -> Self {
        Self {
            date: month.start_date(),
            month_label: month.label(),
            income: Money::zero(),
            expenses: Money::zero(),
            maintenance: Money::zero(),
            net_income: Money::zero(),
        }
    }

    pub fn month(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }

    /// Fold one record's amounts in and refresh the net income
    pub fn accumulate(&mut self, amounts: RecordAmounts) {
        self.income += amounts.income;
        self.expenses += amounts.expenses;
        self.maintenance += amounts.maintenance;
        self.net_income = self.income - (self.expenses + self.maintenance);
    }

    /// Check if no amounts have been accumulated
    pub fn is_empty(&self) -> bool {
        self.income.is_zero() && self.expenses.is_zero() && self.maintenance.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn march() -> MonthKey {
        MonthKey::new(2024, 3).unwrap()
    }

    #[test]
    fn test_empty_bucket() {
        let bucket = MonthlyBucket::empty(march());
        assert_eq!(bucket.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(bucket.month_label, "Mar 2024");
        assert!(bucket.is_empty());
        assert_eq!(bucket.month(), march());
    }

    #[test]
    fn test_accumulate_recomputes_net_income() {
        let mut bucket = MonthlyBucket::empty(march());
        bucket.accumulate(RecordAmounts {
            income: Money::from_cents(100000),
            expenses: Money::from_cents(50000),
            maintenance: Money::from_cents(10000),
        });
        assert_eq!(bucket.net_income.cents(), 40000);

        bucket.accumulate(RecordAmounts {
            income: Money::from_cents(20000),
            ..Default::default()
        });
        assert_eq!(bucket.income.cents(), 120000);
        assert_eq!(bucket.net_income.cents(), 60000);
    }

    #[test]
    fn test_chart_shape() {
        let mut bucket = MonthlyBucket::empty(march());
        bucket.accumulate(RecordAmounts {
            income: Money::from_cents(120050),
            expenses: Money::from_cents(50000),
            maintenance: Money::zero(),
        });

        let value = serde_json::to_value(&bucket).unwrap();
        assert_eq!(value["date"], "2024-03-01");
        assert_eq!(value["monthLabel"], "Mar 2024");
        assert_eq!(value["income"], 1200.5);
        assert_eq!(value["netIncome"], 700.5);

        let back: MonthlyBucket = serde_json::from_value(value).unwrap();
        assert_eq!(back, bucket);
    }
}
