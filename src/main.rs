use anyhow::Result;
use clap::{Parser, Subcommand};

use cashflow_cli::cli::{
    handle_export_command, handle_import_command, handle_record_command, handle_report_command,
    ExportArgs, ImportArgs, RecordCommands, ReportArgs,
};
use cashflow_cli::config::{paths::CashflowPaths, settings::Settings};
use cashflow_cli::logging;
use cashflow_cli::storage::Storage;

#[derive(Parser)]
#[command(
    name = "cashflow",
    version,
    about = "Monthly cash-flow summaries for rental properties",
    long_about = "Aggregates dated income, expense and maintenance records into \
                  newest-first monthly summaries, prints them as a report with a \
                  net-income chart, and exports them as chart data."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and default settings
    Init,

    /// Show current configuration and paths
    Config,

    /// Record store commands
    #[command(subcommand)]
    Record(RecordCommands),

    /// Import records from a CSV file
    Import(ImportArgs),

    /// Print the monthly cash-flow report
    Report(ReportArgs),

    /// Export chart data or records
    Export(ExportArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = CashflowPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    logging::init(&settings);

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing cash-flow data at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            storage.save_all()?;
            println!("Initialization complete!");
            println!();
            println!("Add records with 'cashflow record add' or 'cashflow import <file.csv>'.");
        }
        Some(Commands::Config) => {
            println!("Cash-Flow CLI Configuration");
            println!("===========================");
            println!("Base directory:    {}", paths.base_dir().display());
            println!("Settings file:     {}", paths.settings_file().display());
            println!("Records file:      {}", paths.records_file().display());
            println!("Exports directory: {}", paths.exports_dir().display());
            println!("Initialized:       {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  Default period:  {}", settings.default_selector());
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Log filter:      {}", settings.log_filter);
            println!("  Chart width:     {}", settings.chart_width);
            println!("  Stored records:  {}", storage.records.count()?);
        }
        Some(Commands::Record(cmd)) => {
            handle_record_command(&storage, &settings.currency_symbol, cmd)?;
        }
        Some(Commands::Import(args)) => {
            handle_import_command(&storage, args)?;
        }
        Some(Commands::Report(args)) => {
            handle_report_command(&storage, &settings, args)?;
        }
        Some(Commands::Export(args)) => {
            handle_export_command(&storage, &settings, args)?;
        }
        None => {
            println!("Cash-Flow CLI - monthly cash-flow summaries");
            println!();
            println!("Run 'cashflow --help' for usage information.");
            println!("Run 'cashflow report' to see the last twelve months.");
        }
    }

    Ok(())
}
