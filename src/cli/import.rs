//! CLI command handler for CSV import
//!
//! Imports cash-flow records from CSV files. Columns are detected from the
//! header row; without one they are taken as date, income, expenses, maintenance.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use clap::Args;

use crate::error::{CashflowError, CashflowResult};
use crate::services::{CsvFormat, ImportService};
use crate::storage::Storage;

/// Arguments for `import`
#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    /// Path to the CSV file
    pub file: PathBuf,

    /// Preferred date format, e.g. "%m/%d/%Y"
    #[arg(long)]
    pub date_format: Option<String>,

    /// Field delimiter
    #[arg(long)]
    pub delimiter: Option<char>,

    /// The file has no header row (columns: date, income, expenses, maintenance)
    #[arg(long)]
    pub no_header: bool,

    /// Parse and report without saving
    #[arg(long)]
    pub dry_run: bool,
}

impl ImportArgs {
    /// File layout from the options; columns are still detected from the header
    fn format(&self) -> CashflowResult<CsvFormat> {
        let mut format = CsvFormat::new().with_header(!self.no_header);
        if let Some(date_format) = &self.date_format {
            format = format.with_date_format(date_format);
        }
        if let Some(delimiter) = self.delimiter {
            let byte = u8::try_from(delimiter)
                .ok()
                .filter(u8::is_ascii)
                .ok_or_else(|| {
                    CashflowError::Validation(format!(
                        "Delimiter must be a single ASCII character, got '{}'",
                        delimiter
                    ))
                })?;
            format = format.with_delimiter(byte);
        }
        Ok(format)
    }
}

/// Handle the import command
pub fn handle_import_command(storage: &Storage, args: ImportArgs) -> CashflowResult<()> {
    let format = args.format()?;

    if !args.file.exists() {
        return Err(CashflowError::Import(format!(
            "File not found: {}",
            args.file.display()
        )));
    }
    let file = File::open(&args.file)
        .map_err(|e| CashflowError::Import(format!("Failed to read file: {}", e)))?;

    let import_service = ImportService::new(storage);
    let result = import_service.import(BufReader::new(file), &format, None, args.dry_run)?;

    println!("Import of '{}'", args.file.display());
    println!("{}", "=".repeat(40));
    println!("  Records parsed:  {}", result.records.len());
    println!("  Rows with errors: {}", result.errors.len());

    for error in result.errors.iter().take(10) {
        println!("    row {}: {}", error.row, error.message);
    }
    if result.errors.len() > 10 {
        println!("    ... and {} more", result.errors.len() - 10);
    }

    println!();
    if args.dry_run {
        println!("Dry run: nothing was saved.");
    } else if result.records.is_empty() {
        println!("No records to import.");
    } else {
        println!(
            "Imported {} record(s) into {}",
            result.records.len(),
            storage.records.path().display()
        );
    }

    Ok(())
}
