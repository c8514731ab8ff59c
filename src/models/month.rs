//! Calendar month keys
//!
//! A `MonthKey` identifies one calendar month. It is the key of the bucket map
//! used during aggregation, so its ordering is chronological and its display
//! form is the canonical `YYYY-MM`.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar month (e.g. "2025-01")
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    // Field order matters: derived Ord compares year first, then month.
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Create a month key, returning `None` when `month` is outside 1-12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// The month containing `date`
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month, if chrono can represent it
    pub fn checked_start_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// First day of the month
    pub fn start_date(&self) -> NaiveDate {
        // Construction guarantees a valid month; the fallback only guards
        // years outside chrono's supported range.
        self.checked_start_date().unwrap_or(NaiveDate::MIN)
    }

    /// Step back `count` months
    pub fn back(&self, count: u32) -> Self {
        let index = self.year as i64 * 12 + (self.month as i64 - 1) - count as i64;
        Self {
            year: index.div_euclid(12) as i32,
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    /// Human-readable label, e.g. "Mar 2024"
    pub fn label(&self) -> String {
        self.start_date().format("%b %Y").to_string()
    }

    /// Parse a canonical `YYYY-MM` string
    ///
    /// The year must be exactly four digits and the month exactly two.
    pub fn parse(s: &str) -> Result<Self, MonthParseError> {
        let (year_str, month_str) = s
            .split_once('-')
            .ok_or_else(|| MonthParseError::InvalidFormat(s.to_string()))?;

        if year_str.len() != 4
            || month_str.len() != 2
            || !year_str.chars().all(|c| c.is_ascii_digit())
            || !month_str.chars().all(|c| c.is_ascii_digit())
        {
            return Err(MonthParseError::InvalidFormat(s.to_string()));
        }

        let year: i32 = year_str
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month_str
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;

        Self::new(year, month).ok_or(MonthParseError::InvalidMonth(month))
    }

    /// Derive the month of an ISO-like timestamp from its first seven characters
    ///
    /// `"2024-03-05T10:00:00Z"` and `"2024-03"` both yield March 2024.
    pub fn from_timestamp(timestamp: &str) -> Result<Self, MonthParseError> {
        let prefix = timestamp
            .get(..7)
            .ok_or_else(|| MonthParseError::InvalidFormat(timestamp.to_string()))?;
        Self::parse(prefix)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Error type for month parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for MonthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthParseError::InvalidFormat(s) => write!(f, "Invalid month format: {}", s),
            MonthParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for MonthParseError {}
