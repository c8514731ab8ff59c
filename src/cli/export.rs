//! CLI command for data export
//!
//! Writes chart data (JSON/YAML) or the stored records (CSV) to a file or
//! stdout.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use tracing::info;

use super::report::PeriodArgs;
use crate::config::settings::Settings;
use crate::error::{CashflowError, CashflowResult};
use crate::export::{export_chart_json, export_chart_yaml, export_records_csv, ChartExport};
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Monthly chart data as JSON
    #[default]
    Json,
    /// Monthly chart data as YAML
    Yaml,
    /// Records as CSV (period options are ignored)
    Csv,
}

/// Arguments for `export`
#[derive(Args, Debug, Clone, Default)]
pub struct ExportArgs {
    /// Export format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ExportFormat,

    /// Output file path (default stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    #[command(flatten)]
    pub period: PeriodArgs,
}

/// Handle the export command
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    args: ExportArgs,
) -> CashflowResult<()> {
    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                CashflowError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            write_export(storage, settings, &args, &mut writer)?;
            writer
                .flush()
                .map_err(|e| CashflowError::Export(e.to_string()))?;
            info!(path = %path.display(), format = ?args.format, "Export written");
            eprintln!("Exported to: {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            write_export(storage, settings, &args, &mut writer)?;
            if args.format == ExportFormat::Json {
                writeln!(writer).map_err(|e| CashflowError::Export(e.to_string()))?;
            }
        }
    }

    Ok(())
}

fn write_export<W: Write>(
    storage: &Storage,
    settings: &Settings,
    args: &ExportArgs,
    writer: &mut W,
) -> CashflowResult<()> {
    let records = args.period.load_records(storage)?;
    let property = args.period.property.as_deref();

    if args.format == ExportFormat::Csv {
        let records: Vec<_> = match property {
            Some(p) => records.into_iter().filter(|r| r.belongs_to(p)).collect(),
            None => records,
        };
        return export_records_csv(&records, writer);
    }

    let export = ChartExport::from_records(
        &records,
        args.period.selector(settings)?,
        args.period.reference_date()?,
        property,
    );

    match args.format {
        ExportFormat::Yaml => export_chart_yaml(&export, writer),
        _ => export_chart_json(&export, writer, args.pretty),
    }
}
