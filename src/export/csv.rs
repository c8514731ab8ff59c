//! CSV Export functionality
//!
//! Exports stored cash-flow records to CSV.

use crate::error::{CashflowError, CashflowResult};
use crate::models::CashFlowRecord;
use std::io::Write;

/// Export records to CSV, one row per record, amounts coerced to decimals
pub fn export_records_csv<W: Write>(
    records: &[CashFlowRecord],
    writer: &mut W,
) -> CashflowResult<()> {
    let export_err = |e: csv::Error| CashflowError::Export(e.to_string());
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["Timestamp", "Property", "Income", "Expenses", "Maintenance"])
        .map_err(export_err)?;

    for record in records {
        let amounts = record.amounts();
        csv_writer
            .write_record([
                record.timestamp.clone().unwrap_or_default(),
                record.property.clone().unwrap_or_default(),
                format!("{:.2}", amounts.income.as_f64()),
                format!("{:.2}", amounts.expenses.as_f64()),
                format!("{:.2}", amounts.maintenance.as_f64()),
            ])
            .map_err(export_err)?;
    }

    csv_writer
        .flush()
        .map_err(|e| CashflowError::Export(e.to_string()))?;
    Ok(())
}
