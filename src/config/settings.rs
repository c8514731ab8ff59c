//! User settings for the cash-flow CLI
//!
//! Manages user preferences: the default reporting period, currency symbol,
//! log filter and chart width.

use serde::{Deserialize, Serialize};

use super::paths::CashflowPaths;
use crate::error::CashflowError;
use crate::models::PeriodSelector;

/// User settings, persisted as `config.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Period selector used when `report` is run without `--period`
    #[serde(default = "default_period")]
    pub default_period: String,

    /// Currency symbol used in terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// `tracing` filter directive used when `CASHFLOW_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Width of the net-income bar chart, in characters
    #[serde(default = "default_chart_width")]
    pub chart_width: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_period() -> String {
    "12m".to_string()
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_log_filter() -> String {
    "warn".to_string()
}

fn default_chart_width() -> usize {
    40
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_period: default_period(),
            currency_symbol: default_currency(),
            log_filter: default_log_filter(),
            chart_width: default_chart_width(),
        }
    }
}

impl Settings {
    /// The configured default period, resolved to a selector
    pub fn default_selector(&self) -> PeriodSelector {
        PeriodSelector::from_label(&self.default_period)
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &CashflowPaths) -> Result<Self, CashflowError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                CashflowError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                CashflowError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &CashflowPaths) -> Result<(), CashflowError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            CashflowError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            CashflowError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.default_period, "12m");
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.log_filter, "warn");
        assert_eq!(settings.default_selector(), PeriodSelector::TrailingYear);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CashflowPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.default_period = "ytd".to_string();
        settings.currency_symbol = "€".to_string();
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.default_selector(), PeriodSelector::YearToDate);
        assert_eq!(loaded.currency_symbol, "€");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"currency_symbol":"£"}"#).unwrap();
        assert_eq!(settings.currency_symbol, "£");
        assert_eq!(settings.default_period, "12m");
        assert_eq!(settings.chart_width, 40);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CashflowPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, CashflowError::Config(_)));
    }
}
