//! CLI commands for the record store

use clap::Subcommand;

use super::report::parse_date;
use crate::error::{CashflowError, CashflowResult};
use crate::models::{CashFlowRecord, Money};
use crate::storage::Storage;

/// Record subcommands
#[derive(Subcommand, Debug)]
pub enum RecordCommands {
    /// Add a cash-flow record
    Add {
        /// Record date (YYYY-MM-DD)
        date: String,
        /// Income amount (e.g., "1200" or "1,200.50")
        #[arg(long, default_value = "0")]
        income: String,
        /// Expenses amount
        #[arg(long, default_value = "0")]
        expenses: String,
        /// Maintenance amount
        #[arg(long, default_value = "0")]
        maintenance: String,
        /// Property the record belongs to
        #[arg(short, long)]
        property: Option<String>,
    },
    /// List stored records
    List {
        /// Only show records for this property
        #[arg(short, long)]
        property: Option<String>,
        /// Number of records to show (most recent first)
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

/// Handle record commands
pub fn handle_record_command(
    storage: &Storage,
    currency_symbol: &str,
    cmd: RecordCommands,
) -> CashflowResult<()> {
    match cmd {
        RecordCommands::Add {
            date,
            income,
            expenses,
            maintenance,
            property,
        } => {
            let date = parse_date("record", &date)?;
            let mut record = CashFlowRecord::new(
                date.format("%Y-%m-%d").to_string(),
                parse_money("income", &income)?,
                parse_money("expenses", &expenses)?,
                parse_money("maintenance", &maintenance)?,
            );
            if let Some(p) = property.filter(|p| !p.trim().is_empty()) {
                record = record.with_property(p.trim());
            }

            storage.records.insert(record)?;
            storage.records.save()?;
            println!("Added record for {}", date);
        }
        RecordCommands::List { property, limit } => {
            let mut records = match &property {
                Some(p) => storage.records.get_by_property(p)?,
                None => storage.records.get_all()?,
            };
            // Newest first; undated records last
            records.sort_by(|a, b| match (&a.timestamp, &b.timestamp) {
                (Some(x), Some(y)) => y.cmp(x),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            });

            if records.is_empty() {
                println!("No records found.");
                return Ok(());
            }

            println!(
                "{:<12} {:<16} {:>12} {:>12} {:>12}",
                "Date", "Property", "Income", "Expenses", "Maintenance"
            );
            println!("{}", "-".repeat(68));
            for record in records.iter().take(limit) {
                let amounts = record.amounts();
                println!(
                    "{:<12} {:<16} {:>12} {:>12} {:>12}",
                    record.timestamp.as_deref().unwrap_or("-"),
                    record.property.as_deref().unwrap_or(""),
                    amounts.income.format_with_symbol(currency_symbol),
                    amounts.expenses.format_with_symbol(currency_symbol),
                    amounts.maintenance.format_with_symbol(currency_symbol)
                );
            }
            if records.len() > limit {
                println!("... {} more", records.len() - limit);
            }
        }
    }

    Ok(())
}

fn parse_money(field: &str, value: &str) -> CashflowResult<Money> {
    Money::parse(value)
        .map_err(|e| CashflowError::Validation(format!("Invalid {} amount: {}", field, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::CashflowPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = CashflowPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn add(date: &str, income: &str) -> RecordCommands {
        RecordCommands::Add {
            date: date.to_string(),
            income: income.to_string(),
            expenses: "0".to_string(),
            maintenance: "0".to_string(),
            property: Some(" Elm St ".to_string()),
        }
    }

    #[test]
    fn test_add_record() {
        let (_temp_dir, storage) = create_test_storage();
        handle_record_command(&storage, "$", add("2024-03-05", "1,200.50")).unwrap();

        let records = storage.records.get_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].timestamp.as_deref(), Some("2024-03-05"));
        assert_eq!(records[0].amounts().income.cents(), 120050);
        assert_eq!(records[0].property.as_deref(), Some("Elm St"));
        assert!(storage.records.path().exists());
    }

    #[test]
    fn test_add_rejects_bad_input() {
        let (_temp_dir, storage) = create_test_storage();
        let err = handle_record_command(&storage, "$", add("March 5", "1")).unwrap_err();
        assert!(err.is_validation());

        let err = handle_record_command(&storage, "$", add("2024-03-05", "lots")).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(storage.records.count().unwrap(), 0);
    }

    #[test]
    fn test_list_records() {
        let (_temp_dir, storage) = create_test_storage();
        handle_record_command(&storage, "$", add("2024-03-05", "1")).unwrap();
        handle_record_command(
            &storage,
            "$",
            RecordCommands::List {
                property: Some("elm st".to_string()),
                limit: 5,
            },
        )
        .unwrap();
    }
}
