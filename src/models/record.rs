//! Cash-flow records
//!
//! Records arrive loosely typed: amounts may be JSON numbers or numeric
//! strings, and any field may be missing. Deserialization never rejects a
//! record because of a bad field value; coercion happens at aggregation time.

use serde::{Deserialize, Deserializer, Serialize};

use super::money::Money;
use super::month::{MonthKey, MonthParseError};

/// An amount as supplied by the data source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
    /// Any other JSON shape (booleans, arrays, objects)
    Other(serde_json::Value),
}

impl RawAmount {
    /// Coerce to money; anything unparsable is zero
    pub fn to_money(&self) -> Money {
        match self {
            RawAmount::Number(n) => Money::from_f64(*n).unwrap_or_default(),
            RawAmount::Text(s) => parse_text_amount(s),
            RawAmount::Other(_) => Money::zero(),
        }
    }
}

impl From<Money> for RawAmount {
    fn from(amount: Money) -> Self {
        RawAmount::Number(amount.as_f64())
    }
}

/// Parse an optional amount, defaulting to zero
pub fn parse_amount(raw: Option<&RawAmount>) -> Money {
    raw.map(RawAmount::to_money).unwrap_or_default()
}

fn parse_text_amount(s: &str) -> Money {
    Money::parse(s)
        .ok()
        .or_else(|| s.trim().parse::<f64>().ok().and_then(Money::from_f64))
        .unwrap_or_default()
}

/// One dated cash-flow entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CashFlowRecord {
    /// ISO-like date; only the leading `YYYY-MM` is significant
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income: Option<RawAmount>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expenses: Option<RawAmount>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance: Option<RawAmount>,

    /// Property the entry belongs to, used for filtering only
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
}

/// Why a record cannot be placed in a month
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimestampIssue {
    Missing,
    Malformed(MonthParseError),
}

/// Coerced amounts of a single record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordAmounts {
    pub income: Money,
    pub expenses: Money,
    pub maintenance: Money,
}

impl CashFlowRecord {
    /// Create a record with numeric amounts
    pub fn new(
        timestamp: impl Into<String>,
        income: Money,
        expenses: Money,
        maintenance: Money,
    ) -> Self {
        Self {
            timestamp: Some(timestamp.into()),
            income: Some(income.into()),
            expenses: Some(expenses.into()),
            maintenance: Some(maintenance.into()),
            property: None,
        }
    }

    /// Set the property tag
    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }

    /// The month this record belongs to
    ///
    /// Empty timestamps count as missing.
    pub fn month_key(&self) -> Result<MonthKey, TimestampIssue> {
        match self.timestamp.as_deref().map(str::trim) {
            None | Some("") => Err(TimestampIssue::Missing),
            Some(ts) => MonthKey::from_timestamp(ts).map_err(TimestampIssue::Malformed),
        }
    }

    pub fn amounts(&self) -> RecordAmounts {
        RecordAmounts {
            income: parse_amount(self.income.as_ref()),
            expenses: parse_amount(self.expenses.as_ref()),
            maintenance: parse_amount(self.maintenance.as_ref()),
        }
    }

    /// Case-insensitive property match
    pub fn belongs_to(&self, property: &str) -> bool {
        self.property
            .as_deref()
            .map(|p| p.eq_ignore_ascii_case(property.trim()))
            .unwrap_or(false)
    }
}

/// Accept a string, treating any other JSON value as absent
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_from(json: &str) -> CashFlowRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_numeric_and_string_amounts() {
        let record = record_from(
            r#"{"timestamp":"2024-03-05","income":"1000","expenses":500,"maintenance":"100.25"}"#,
        );
        let amounts = record.amounts();
        assert_eq!(amounts.income.cents(), 100000);
        assert_eq!(amounts.expenses.cents(), 50000);
        assert_eq!(amounts.maintenance.cents(), 10025);
    }

    #[test]
    fn test_missing_and_invalid_amounts_are_zero() {
        let record = record_from(
            r#"{"timestamp":"2024-03-05","income":"n/a","expenses":null,"maintenance":true}"#,
        );
        assert_eq!(record.amounts(), RecordAmounts::default());
    }

    #[test]
    fn test_string_amount_forms() {
        let text = |s: &str| RawAmount::Text(s.to_string()).to_money().cents();
        assert_eq!(text(" 42 "), 4200);
        assert_eq!(text("$1,200.50"), 120050);
        assert_eq!(text("-15.5"), -1550);
        assert_eq!(text("1e3"), 100000);
        assert_eq!(text("NaN"), 0);
        assert_eq!(text(""), 0);
    }

    #[test]
    fn test_float_amount_rounds() {
        assert_eq!(RawAmount::Number(19.999).to_money().cents(), 2000);
    }

    #[test]
    fn test_month_key() {
        let record = CashFlowRecord::new("2024-03-05", Money::zero(), Money::zero(), Money::zero());
        assert_eq!(record.month_key().unwrap(), MonthKey::new(2024, 3).unwrap());
    }

    #[test]
    fn test_missing_timestamp() {
        assert_eq!(record_from("{}").month_key(), Err(TimestampIssue::Missing));
        assert_eq!(
            record_from(r#"{"timestamp":""}"#).month_key(),
            Err(TimestampIssue::Missing)
        );
        assert_eq!(
            record_from(r#"{"timestamp":20240305}"#).month_key(),
            Err(TimestampIssue::Missing)
        );
    }

    #[test]
    fn test_malformed_timestamp() {
        let record = record_from(r#"{"timestamp":"not-a-date","income":10}"#);
        assert!(matches!(record.month_key(), Err(TimestampIssue::Malformed(_))));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let record = record_from(r#"{"id":7,"timestamp":"2024-01-01","property":"Elm St","notes":"x"}"#);
        assert!(record.belongs_to("elm st"));
        assert!(!record.belongs_to("Oak Ave"));
    }

    #[test]
    fn test_serialization_skips_missing_fields() {
        let record = CashFlowRecord {
            timestamp: Some("2024-01-01".into()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"timestamp":"2024-01-01"}"#
        );
    }
}
