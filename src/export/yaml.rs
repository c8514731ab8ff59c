//! YAML Export functionality
//!
//! Same chart data as the JSON export, for human reading.

use crate::error::{CashflowError, CashflowResult};
use crate::export::json::ChartExport;
use std::io::Write;

/// Write chart data as YAML with a comment header
pub fn export_chart_yaml<W: Write>(export: &ChartExport, writer: &mut W) -> CashflowResult<()> {
    write_header(export, writer).map_err(|e| CashflowError::Export(e.to_string()))?;
    serde_yaml::to_writer(writer, export)?;
    Ok(())
}

fn write_header<W: Write>(export: &ChartExport, writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "# Cash-flow chart data")?;
    writeln!(writer, "# Generated: {}", export.generated_at)?;
    writeln!(
        writer,
        "# Period: {} as of {}",
        export.period, export.reference_date
    )?;
    if let Some(property) = &export.property {
        writeln!(writer, "# Property: {}", property)?;
    }
    writeln!(writer)
}

/// Read a YAML chart export back
pub fn import_from_yaml(yaml_str: &str) -> CashflowResult<ChartExport> {
    let export: ChartExport =
        serde_yaml::from_str(yaml_str).map_err(|e| CashflowError::Import(e.to_string()))?;

    export.validate().map_err(CashflowError::Import)?;

    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CashFlowRecord, DateRange, Money, PeriodSelector};
    use chrono::NaiveDate;

    #[test]
    fn test_yaml_export() {
        let records = vec![CashFlowRecord::new(
            "2024-03-05",
            Money::from_cents(120000),
            Money::from_cents(50000),
            Money::from_cents(10000),
        )];
        let reference = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let export = ChartExport::from_records(&records, PeriodSelector::YearToDate, reference, None);

        let mut output = Vec::new();
        export_chart_yaml(&export, &mut output).unwrap();
        let yaml = String::from_utf8(output).unwrap();

        assert!(yaml.starts_with("# Cash-flow chart data"));
        assert!(yaml.contains("# Period: ytd as of 2024-03-15"));
        assert!(yaml.contains("monthLabel: Mar 2024"));
        assert!(yaml.contains("netIncome: 600.0"));

        let imported = import_from_yaml(&yaml).unwrap();
        assert_eq!(imported.months.len(), 3);
        assert_eq!(imported.months[0].net_income.cents(), 60000);
    }

    #[test]
    fn test_yaml_custom_period() {
        let from = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let reference = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let period = PeriodSelector::Custom(DateRange::new(Some(from), Some(to)));
        let export = ChartExport::from_records(&[], period, reference, Some("Elm St"));

        let mut output = Vec::new();
        export_chart_yaml(&export, &mut output).unwrap();
        let yaml = String::from_utf8(output).unwrap();

        assert!(yaml.contains("# Property: Elm St"));
        let imported = import_from_yaml(&yaml).unwrap();
        assert_eq!(imported.period, period);
        assert_eq!(imported.months.len(), 2);
    }
}
