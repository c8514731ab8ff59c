//! Diagnostic logging setup
//!
//! Log output goes to stderr so report and export output on stdout stays
//! machine-readable.

use tracing_subscriber::EnvFilter;

use crate::config::settings::Settings;

/// Environment variable holding a `tracing` filter directive
pub const LOG_ENV: &str = "CASHFLOW_LOG";

const FALLBACK_FILTER: &str = "warn";

/// Resolve the filter: `CASHFLOW_LOG` first, then the configured directive
pub fn build_filter(settings: &Settings) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .unwrap_or_else(|_| EnvFilter::new(FALLBACK_FILTER))
}

/// Install the global subscriber
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(settings: &Settings) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(settings))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
