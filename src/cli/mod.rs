//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod export;
pub mod import;
pub mod record;
pub mod report;

pub use export::{handle_export_command, ExportArgs, ExportFormat};
pub use import::{handle_import_command, ImportArgs};
pub use record::{handle_record_command, RecordCommands};
pub use report::{handle_report_command, PeriodArgs, ReportArgs};
