//! Monthly Cash-Flow Report
//!
//! Wraps the monthly aggregation with window totals, a terminal table with a
//! net-income chart, and CSV export.

use std::io::Write;

use chrono::NaiveDate;

use crate::display::{double_separator, format_money_colored, format_signed_bar, separator};
use crate::error::{CashflowError, CashflowResult};
use crate::models::{CashFlowRecord, Money, MonthlyBucket, PeriodSelector};
use crate::services::aggregation::{aggregate, AggregationStats};

/// Sums over every month of the window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CashFlowTotals {
    pub income: Money,
    pub expenses: Money,
    pub maintenance: Money,
    pub net_income: Money,
}

impl CashFlowTotals {
    fn from_buckets(buckets: &[MonthlyBucket]) -> Self {
        buckets.iter().fold(Self::default(), |mut acc, b| {
            acc.income += b.income;
            acc.expenses += b.expenses;
            acc.maintenance += b.maintenance;
            acc.net_income += b.net_income;
            acc
        })
    }
}

/// Presentation options for terminal output
#[derive(Debug, Clone)]
pub struct ReportStyle {
    pub currency_symbol: String,
    /// Total width of the net-income chart column
    pub chart_width: usize,
    /// Emit ANSI colors for the net-income column
    pub color: bool,
}

impl Default for ReportStyle {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            chart_width: 40,
            color: false,
        }
    }
}

/// Monthly Cash-Flow Report
#[derive(Debug, Clone)]
pub struct CashFlowReport {
    pub period: PeriodSelector,
    pub reference_date: NaiveDate,
    /// Property filter applied before aggregation, if any
    pub property: Option<String>,
    /// One bucket per window month, newest first
    pub months: Vec<MonthlyBucket>,
    pub totals: CashFlowTotals,
    pub stats: AggregationStats,
}

impl CashFlowReport {
    /// Generate a report for `records`
    ///
    /// When `property` is set, only records tagged with it are aggregated.
    pub fn generate(
        records: &[CashFlowRecord],
        period: PeriodSelector,
        reference_date: NaiveDate,
        property: Option<&str>,
    ) -> Self {
        let aggregation = match property {
            Some(p) => aggregate(
                records.iter().filter(|r| r.belongs_to(p)),
                &period,
                reference_date,
            ),
            None => aggregate(records, &period, reference_date),
        };

        Self {
            period,
            reference_date,
            property: property.map(str::to_string),
            totals: CashFlowTotals::from_buckets(&aggregation.buckets),
            months: aggregation.buckets,
            stats: aggregation.stats,
        }
    }

    /// Average net income per month of the window
    pub fn average_net_income(&self) -> Money {
        if self.months.is_empty() {
            return Money::zero();
        }
        Money::from_cents(self.totals.net_income.cents() / self.months.len() as i64)
    }

    /// The month with the highest net income (latest month wins ties)
    pub fn best_month(&self) -> Option<&MonthlyBucket> {
        self.months
            .iter()
            .rev()
            .max_by_key(|b| b.net_income)
            .filter(|b| !b.is_empty())
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, style: &ReportStyle) -> String {
        let symbol = style.currency_symbol.as_str();
        let money = |m: Money| m.format_with_symbol(symbol);
        let mut output = String::new();

        output.push_str(&format!(
            "Cash Flow Report: {} (as of {})\n",
            self.period, self.reference_date
        ));
        if let Some(property) = &self.property {
            output.push_str(&format!("Property: {}\n", property));
        }
        output.push_str(&double_separator(78));
        output.push('\n');

        if self.months.is_empty() {
            output.push_str("The selected period covers no months.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<10} {:>14} {:>14} {:>14} {:>14}\n",
            "Month", "Income", "Expenses", "Maintenance", "Net Income"
        ));
        output.push_str(&separator(78));
        output.push('\n');

        for bucket in &self.months {
            let net = format!("{:>14}", money(bucket.net_income));
            let net = if style.color {
                // Pad before coloring so escape codes don't skew alignment
                net.replace(
                    &money(bucket.net_income),
                    &format_money_colored(bucket.net_income, symbol),
                )
            } else {
                net
            };
            output.push_str(&format!(
                "{:<10} {:>14} {:>14} {:>14} {}\n",
                bucket.month_label,
                money(bucket.income),
                money(bucket.expenses),
                money(bucket.maintenance),
                net
            ));
        }

        output.push_str(&separator(78));
        output.push('\n');
        output.push_str(&format!(
            "{:<10} {:>14} {:>14} {:>14} {:>14}\n",
            "TOTAL",
            money(self.totals.income),
            money(self.totals.expenses),
            money(self.totals.maintenance),
            money(self.totals.net_income)
        ));
        output.push_str(&format!(
            "Average net income per month: {}\n",
            money(self.average_net_income())
        ));
        if let Some(best) = self.best_month() {
            output.push_str(&format!(
                "Best month: {} ({})\n",
                best.month_label,
                money(best.net_income)
            ));
        }

        if style.chart_width >= 2 {
            output.push_str(&self.format_chart(style));
        }

        if self.stats.skipped() > 0 {
            output.push_str(&format!(
                "\n{} record(s) not included: {} without date, {} with invalid date, {} outside the period\n",
                self.stats.skipped(),
                self.stats.missing_timestamp,
                self.stats.malformed_timestamp,
                self.stats.out_of_window
            ));
        }

        output
    }

    /// Net income per month as a signed bar chart, oldest month first
    fn format_chart(&self, style: &ReportStyle) -> String {
        let half_width = style.chart_width / 2;
        let max_abs = self
            .months
            .iter()
            .map(|b| b.net_income.abs().as_f64())
            .fold(0.0_f64, f64::max);

        let mut output = String::from("\nNet Income\n");
        for bucket in self.months.iter().rev() {
            output.push_str(&format!(
                "{:<10} {} {}\n",
                bucket.month_label,
                format_signed_bar(bucket.net_income.as_f64(), max_abs, half_width),
                bucket.net_income.format_with_symbol(&style.currency_symbol)
            ));
        }
        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> CashflowResult<()> {
        let export_err = |e: csv::Error| CashflowError::Export(e.to_string());
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "Month",
            "Month Start",
            "Income",
            "Expenses",
            "Maintenance",
            "Net Income",
        ])
        .map_err(export_err)?;

        for bucket in &self.months {
            csv_writer.write_record([
                bucket.month_label.clone(),
                bucket.date.to_string(),
                format!("{:.2}", bucket.income.as_f64()),
                format!("{:.2}", bucket.expenses.as_f64()),
                format!("{:.2}", bucket.maintenance.as_f64()),
                format!("{:.2}", bucket.net_income.as_f64()),
            ])
            .map_err(export_err)?;
        }

        csv_writer.write_record([
            "TOTAL".to_string(),
            String::new(),
            format!("{:.2}", self.totals.income.as_f64()),
            format!("{:.2}", self.totals.expenses.as_f64()),
            format!("{:.2}", self.totals.maintenance.as_f64()),
            format!("{:.2}", self.totals.net_income.as_f64()),
        ])
        .map_err(export_err)?;

        csv_writer
            .flush()
            .map_err(|e| CashflowError::Export(e.to_string()))?;
        Ok(())
    }
}
