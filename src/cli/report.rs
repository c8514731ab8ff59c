//! CLI command for the monthly cash-flow report
//!
//! Also hosts the period/record-source arguments shared with `export`.

use std::fs::File;
use std::io::{BufWriter, IsTerminal};
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use tracing::debug;

use crate::config::settings::Settings;
use crate::error::{CashflowError, CashflowResult};
use crate::models::{CashFlowRecord, DateRange, PeriodSelector};
use crate::reports::{CashFlowReport, ReportStyle};
use crate::storage::{read_records_file, Storage};

/// Window and record-source selection
#[derive(Args, Debug, Clone, Default)]
pub struct PeriodArgs {
    /// Period selector: 12m, ytd, all or custom (default from settings)
    #[arg(short, long)]
    pub period: Option<String>,

    /// Start of a custom range (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// End of a custom range (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// Reference date the window ends at (YYYY-MM-DD, default today)
    #[arg(long = "as-of", env = "CASHFLOW_AS_OF")]
    pub as_of: Option<String>,

    /// Read records from this JSON file instead of the record store
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Only include records for this property
    #[arg(long)]
    pub property: Option<String>,
}

impl PeriodArgs {
    /// Resolve the period selector
    ///
    /// `--from`/`--to` are only accepted together with `--period custom`.
    pub fn selector(&self, settings: &Settings) -> CashflowResult<PeriodSelector> {
        let selector = match &self.period {
            Some(label) => PeriodSelector::from_label(label),
            None => settings.default_selector(),
        };

        if self.from.is_none() && self.to.is_none() {
            return Ok(selector);
        }

        if !matches!(selector, PeriodSelector::Custom(_)) {
            return Err(CashflowError::Validation(format!(
                "--from/--to require --period custom (got '{}')",
                selector.label()
            )));
        }

        let range = DateRange::new(
            self.from.as_deref().map(|s| parse_date("--from", s)).transpose()?,
            self.to.as_deref().map(|s| parse_date("--to", s)).transpose()?,
        );
        Ok(selector.with_range(range))
    }

    /// The reference date: `--as-of` or the local date
    pub fn reference_date(&self) -> CashflowResult<NaiveDate> {
        match &self.as_of {
            Some(s) => parse_date("--as-of", s),
            None => Ok(chrono::Local::now().date_naive()),
        }
    }

    /// Records from `--input` if given, else the record store
    pub fn load_records(&self, storage: &Storage) -> CashflowResult<Vec<CashFlowRecord>> {
        match &self.input {
            Some(path) => read_records_file(path),
            None => storage.records.get_all(),
        }
    }
}

/// Parse a `YYYY-MM-DD` date argument with a four-digit year
pub(crate) fn parse_date(name: &str, value: &str) -> CashflowResult<NaiveDate> {
    let invalid = || {
        CashflowError::Validation(format!(
            "Invalid {} date: {}. Use YYYY-MM-DD",
            name, value
        ))
    };
    let value = value.trim();
    if value.len() != 10 {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| invalid())
}

/// Arguments for `report`
#[derive(Args, Debug, Clone, Default)]
pub struct ReportArgs {
    #[command(flatten)]
    pub period: PeriodArgs,

    /// Export the report to a CSV file instead of printing it
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Omit the net-income chart
    #[arg(long)]
    pub no_chart: bool,
}

/// Handle the report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    args: ReportArgs,
) -> CashflowResult<()> {
    let selector = args.period.selector(settings)?;
    let reference = args.period.reference_date()?;
    let records = args.period.load_records(storage)?;
    debug!(%selector, %reference, records = records.len(), "Generating cash-flow report");

    let report = CashFlowReport::generate(
        &records,
        selector,
        reference,
        args.period.property.as_deref(),
    );

    if let Some(path) = args.output {
        let file = File::create(&path).map_err(|e| {
            CashflowError::Export(format!("Failed to create file {}: {}", path.display(), e))
        })?;
        let mut writer = BufWriter::new(file);
        report.export_csv(&mut writer)?;
        println!("Cash-flow report exported to: {}", path.display());
    } else {
        let style = ReportStyle {
            currency_symbol: settings.currency_symbol.clone(),
            chart_width: if args.no_chart { 0 } else { settings.chart_width },
            color: std::io::stdout().is_terminal(),
        };
        print!("{}", report.format_terminal(&style));
    }

    Ok(())
}
