//! Reporting period selectors
//!
//! A `PeriodSelector` decides how many trailing months a cash-flow summary
//! covers. The window always ends at the month of the reference date.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Months covered by the `all` selector
pub const DEFAULT_HISTORY_MONTHS: u32 = 24;

/// Months covered by `custom` when either bound is missing
pub const CUSTOM_FALLBACK_MONTHS: u32 = 6;

/// Longest window a `custom` range can produce (100 years)
pub const MAX_CUSTOM_MONTHS: u32 = 1200;

/// Days per month used to size a custom range
const DAYS_PER_MONTH: i64 = 30;

/// Optional bounds of a custom period
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    pub from: Option<NaiveDate>,
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// Both bounds, if present
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.from?, self.to?))
    }
}

/// Window-sizing policy for monthly summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "range", rename_all = "lowercase")]
pub enum PeriodSelector {
    /// "12m": the trailing twelve months
    #[serde(rename = "12m")]
    TrailingYear,
    /// "ytd": January of the reference year through the reference month
    #[serde(rename = "ytd")]
    YearToDate,
    /// "all": the default historical window
    All,
    /// "custom": sized from a caller-supplied date range
    Custom(DateRange),
}

impl Default for PeriodSelector {
    fn default() -> Self {
        Self::All
    }
}

impl PeriodSelector {
    /// Resolve a selector label
    ///
    /// Matching is case-insensitive. Unrecognized labels fall back to `all`;
    /// `custom` starts without bounds (see [`PeriodSelector::with_range`]).
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "12m" => Self::TrailingYear,
            "ytd" => Self::YearToDate,
            "all" => Self::All,
            "custom" => Self::Custom(DateRange::default()),
            other => {
                tracing::debug!(selector = other, "Unrecognized period selector, using 'all'");
                Self::All
            }
        }
    }

    /// Attach a date range; only meaningful for `custom`
    pub fn with_range(self, range: DateRange) -> Self {
        match self {
            Self::Custom(_) => Self::Custom(range),
            other => other,
        }
    }

    /// Canonical label of this selector
    pub fn label(&self) -> &'static str {
        match self {
            Self::TrailingYear => "12m",
            Self::YearToDate => "ytd",
            Self::All => "all",
            Self::Custom(_) => "custom",
        }
    }

    /// Number of months in the window ending at `reference`'s month
    pub fn window_months(&self, reference: NaiveDate) -> u32 {
        match self {
            Self::TrailingYear => 12,
            Self::YearToDate => reference.month(),
            Self::All => DEFAULT_HISTORY_MONTHS,
            Self::Custom(range) => match range.bounds() {
                Some((from, to)) => custom_window_months(from, to),
                None => CUSTOM_FALLBACK_MONTHS,
            },
        }
    }
}

/// `ceil(days / 30)` capped at [`MAX_CUSTOM_MONTHS`], zero for empty or
/// reversed ranges
fn custom_window_months(from: NaiveDate, to: NaiveDate) -> u32 {
    let days = (to - from).num_days();
    if days <= 0 {
        return 0;
    }
    let months = (days + DAYS_PER_MONTH - 1) / DAYS_PER_MONTH;
    u32::try_from(months)
        .unwrap_or(MAX_CUSTOM_MONTHS)
        .min(MAX_CUSTOM_MONTHS)
}

impl fmt::Display for PeriodSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(range) => match range.bounds() {
                Some((from, to)) => write!(
                    f,
                    "custom {}..{}",
                    from.format("%Y-%m-%d"),
                    to.format("%Y-%m-%d")
                ),
                None => write!(f, "custom"),
            },
            other => write!(f, "{}", other.label()),
        }
    }
}
