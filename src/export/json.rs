//! JSON Export functionality
//!
//! Exports monthly chart data in the shape consumed by charting front ends,
//! wrapped with a schema version and window metadata.

use crate::error::{CashflowError, CashflowResult};
use crate::models::{CashFlowRecord, MonthlyBucket, PeriodSelector};
use crate::services::aggregation::generate_monthly_chart_data;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Chart data export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub generated_at: DateTime<Utc>,

    /// Date the window is anchored to
    pub reference_date: NaiveDate,

    pub period: PeriodSelector,

    /// Optional property filter that was applied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,

    /// Newest month first
    pub months: Vec<MonthlyBucket>,
}

impl ChartExport {
    /// Build an export by aggregating `records`
    pub fn from_records(
        records: &[CashFlowRecord],
        period: PeriodSelector,
        reference_date: NaiveDate,
        property: Option<&str>,
    ) -> Self {
        let months = match property {
            Some(p) => generate_monthly_chart_data(
                records.iter().filter(|r| r.belongs_to(p)),
                &period,
                reference_date,
            ),
            None => generate_monthly_chart_data(records, &period, reference_date),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            reference_date,
            period,
            property: property.map(str::to_string),
            months,
        }
    }

    /// Validate the export structure
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        // Months must be strictly descending
        for pair in self.months.windows(2) {
            if pair[0].date <= pair[1].date {
                return Err(format!(
                    "Months out of order: {} listed before {}",
                    pair[0].date, pair[1].date
                ));
            }
        }

        Ok(())
    }
}

/// Write chart data as JSON
pub fn export_chart_json<W: Write>(
    export: &ChartExport,
    writer: &mut W,
    pretty: bool,
) -> CashflowResult<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, export)
    } else {
        serde_json::to_writer(writer, export)
    }
    .map_err(|e| CashflowError::Export(e.to_string()))?;

    Ok(())
}

/// Read a JSON chart export back (for verification)
pub fn import_from_json(json_str: &str) -> CashflowResult<ChartExport> {
    let export: ChartExport =
        serde_json::from_str(json_str).map_err(|e| CashflowError::Import(e.to_string()))?;

    export.validate().map_err(CashflowError::Import)?;

    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn records() -> Vec<CashFlowRecord> {
        vec![
            CashFlowRecord::new(
                "2024-03-05",
                Money::from_cents(120000),
                Money::from_cents(50000),
                Money::from_cents(10000),
            ),
            CashFlowRecord::new(
                "2024-02-10",
                Money::from_cents(5000),
                Money::zero(),
                Money::zero(),
            )
            .with_property("Oak Ave"),
        ]
    }

    #[test]
    fn test_json_shape() {
        let export = ChartExport::from_records(&records(), PeriodSelector::YearToDate, reference(), None);

        let mut output = Vec::new();
        export_chart_json(&export, &mut output, false).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();

        assert_eq!(value["schemaVersion"], "1.0.0");
        assert_eq!(value["referenceDate"], "2024-03-15");
        assert!(value.get("property").is_none());

        let months = value["months"].as_array().unwrap();
        assert_eq!(months.len(), 3);
        assert_eq!(months[0]["date"], "2024-03-01");
        assert_eq!(months[0]["monthLabel"], "Mar 2024");
        assert_eq!(months[0]["income"], 1200.0);
        assert_eq!(months[0]["netIncome"], 600.0);
        assert_eq!(months[2]["date"], "2024-01-01");
    }

    #[test]
    fn test_property_filter_applied() {
        let export = ChartExport::from_records(
            &records(),
            PeriodSelector::YearToDate,
            reference(),
            Some("Oak Ave"),
        );

        assert_eq!(export.property.as_deref(), Some("Oak Ave"));
        assert!(export.months[0].income.is_zero());
        assert_eq!(export.months[1].income.cents(), 5000);
    }

    #[test]
    fn test_import_round_trip_validates() {
        let export = ChartExport::from_records(&records(), PeriodSelector::TrailingYear, reference(), None);
        let mut output = Vec::new();
        export_chart_json(&export, &mut output, true).unwrap();

        let imported = import_from_json(std::str::from_utf8(&output).unwrap()).unwrap();
        assert_eq!(imported.months, export.months);
        assert_eq!(imported.period, PeriodSelector::TrailingYear);
    }

    #[test]
    fn test_validate_rejects_wrong_version() {
        let mut export =
            ChartExport::from_records(&[], PeriodSelector::YearToDate, reference(), None);
        export.schema_version = "0.1.0".to_string();
        assert!(export.validate().unwrap_err().contains("Schema version mismatch"));
    }

    #[test]
    fn test_validate_rejects_unordered_months() {
        let mut export =
            ChartExport::from_records(&[], PeriodSelector::YearToDate, reference(), None);
        export.months.reverse();
        assert!(export.validate().unwrap_err().contains("out of order"));
    }
}
