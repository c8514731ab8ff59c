//! CSV Import service
//!
//! Converts CSV exports (bank statements, property-manager ledgers) into
//! cash-flow records. Columns are mapped explicitly or detected from the
//! header row; dates are normalized to `YYYY-MM-DD`.

use std::io::Read;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use crate::error::CashflowResult;
use crate::models::{CashFlowRecord, Money, RawAmount};
use crate::storage::Storage;

/// Date formats tried after the mapping's own format
const FALLBACK_DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y", "%d/%m/%Y", "%Y/%m/%d", "%m-%d-%Y", "%d-%m-%Y",
];

/// Layout of the CSV file itself
#[derive(Debug, Clone)]
pub struct CsvFormat {
    pub delimiter: u8,
    pub has_header: bool,
    /// Preferred date format; overrides the column mapping's format
    pub date_format: Option<String>,
}

impl Default for CsvFormat {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_header: true,
            date_format: None,
        }
    }
}

impl CsvFormat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    pub fn with_date_format(mut self, format: &str) -> Self {
        self.date_format = Some(format.to_string());
        self
    }
}

/// Which column holds which field
#[derive(Debug, Clone)]
pub struct ColumnMapping {
    pub date_column: usize,
    pub income_column: Option<usize>,
    pub expenses_column: Option<usize>,
    pub maintenance_column: Option<usize>,
    pub property_column: Option<usize>,
    /// Preferred date format (e.g., "%Y-%m-%d", "%m/%d/%Y")
    pub date_format: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            date_column: 0,
            income_column: Some(1),
            expenses_column: Some(2),
            maintenance_column: Some(3),
            property_column: None,
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date_format(mut self, format: &str) -> Self {
        self.date_format = format.to_string();
        self
    }

    /// Detect columns from a header row
    ///
    /// Falls back to the default positional mapping for columns whose header
    /// is not recognized.
    pub fn detect_from_headers(headers: &StringRecord) -> Self {
        let mut mapping = Self::default();
        let mut income = None;
        let mut expenses = None;
        let mut maintenance = None;

        for (idx, header) in headers.iter().enumerate() {
            let h = header.trim().to_lowercase();

            if h.contains("date") || h.contains("timestamp") || h == "month" {
                mapping.date_column = idx;
            } else if h.contains("maint") || h.contains("repair") {
                maintenance = Some(idx);
            } else if h.contains("expense") || h.contains("cost") || h.contains("outflow") {
                expenses = Some(idx);
            } else if h.contains("income") || h.contains("rent") || h.contains("inflow") {
                income = Some(idx);
            } else if h.contains("property") || h.contains("unit") || h.contains("building") {
                mapping.property_column = Some(idx);
            }
        }

        if income.is_some() || expenses.is_some() || maintenance.is_some() {
            mapping.income_column = income;
            mapping.expenses_column = expenses;
            mapping.maintenance_column = maintenance;
        }

        debug!(?mapping, "Detected CSV column mapping");
        mapping
    }
}

/// A row that could not be converted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// 1-based data row number (header excluded)
    pub row: usize,
    pub message: String,
}

/// Outcome of parsing a CSV
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    pub records: Vec<CashFlowRecord>,
    pub errors: Vec<RowError>,
}

impl ImportResult {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parse CSV data into cash-flow records
///
/// With `mapping` set to `None`, columns are detected from the header row,
/// or taken positionally when `format` says there is none. The format's
/// date format, if set, replaces the mapping's.
pub fn parse_csv<R: Read>(
    input: R,
    format: &CsvFormat,
    mapping: Option<&ColumnMapping>,
) -> CashflowResult<ImportResult> {
    let mut reader = ReaderBuilder::new()
        .has_headers(format.has_header)
        .delimiter(format.delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let mut mapping = match mapping {
        Some(m) => m.clone(),
        None if format.has_header => ColumnMapping::detect_from_headers(reader.headers()?),
        None => ColumnMapping::default(),
    };
    if let Some(date_format) = &format.date_format {
        mapping.date_format = date_format.clone();
    }

    let mut result = ImportResult::default();

    for (idx, row) in reader.records().enumerate() {
        let row_number = idx + 1;
        let parsed = row
            .map_err(|e| format!("Error reading CSV record: {}", e))
            .and_then(|row| parse_row(&row, &mapping));

        match parsed {
            Ok(record) => result.records.push(record),
            Err(message) => result.errors.push(RowError {
                row: row_number,
                message,
            }),
        }
    }

    Ok(result)
}

fn parse_row(row: &StringRecord, mapping: &ColumnMapping) -> Result<CashFlowRecord, String> {
    let date_str = row
        .get(mapping.date_column)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| "Missing date".to_string())?;
    let date = parse_date(date_str, &mapping.date_format)?;

    let property = mapping
        .property_column
        .and_then(|col| row.get(col))
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Ok(CashFlowRecord {
        timestamp: Some(date.format("%Y-%m-%d").to_string()),
        income: parse_amount_cell(row, mapping.income_column)?,
        expenses: parse_amount_cell(row, mapping.expenses_column)?,
        maintenance: parse_amount_cell(row, mapping.maintenance_column)?,
        property,
    })
}

fn parse_date(s: &str, primary_format: &str) -> Result<NaiveDate, String> {
    std::iter::once(primary_format)
        .chain(FALLBACK_DATE_FORMATS)
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
        .ok_or_else(|| format!("Could not parse date: '{}'", s))
}

/// Blank cells are absent; accounting-style "(12.50)" is negative
fn parse_amount_cell(row: &StringRecord, column: Option<usize>) -> Result<Option<RawAmount>, String> {
    let Some(cell) = column.and_then(|col| row.get(col)).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    let (negative, value) = match cell.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        Some(inner) => (true, inner),
        None => (false, cell),
    };

    let amount = Money::parse(value)
        .map_err(|e| format!("Could not parse amount '{}': {}", cell, e))?;
    Ok(Some(RawAmount::from(if negative { -amount } else { amount })))
}

/// Service for importing CSV files into the record store
pub struct ImportService<'a> {
    storage: &'a Storage,
}

impl<'a> ImportService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Parse `input` and append every valid row to the record store
    ///
    /// Rows with errors are reported in the result and not stored. Nothing is
    /// written to disk when `dry_run` is set.
    pub fn import<R: Read>(
        &self,
        input: R,
        format: &CsvFormat,
        mapping: Option<&ColumnMapping>,
        dry_run: bool,
    ) -> CashflowResult<ImportResult> {
        let result = parse_csv(input, format, mapping)?;

        if !dry_run && !result.records.is_empty() {
            let added = self.storage.records.extend(result.records.iter().cloned())?;
            self.storage.records.save()?;
            info!(added, errors = result.errors.len(), "Imported cash-flow records");
        }

        Ok(result)
    }
}
