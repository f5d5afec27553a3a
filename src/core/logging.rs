//! Structured logging setup
//!
//! Filter precedence: `SPC_LOG` (EnvFilter syntax) > `-v` count > the
//! configured `log_level`. Logs go to stderr so stdout stays parseable.

use tracing_subscriber::EnvFilter;

/// Environment variable holding an explicit filter
pub const LOG_ENV: &str = "SPC_LOG";

/// Filter directive for a `-v` count, or the configured level when zero
pub fn directive_for(verbose: u8, configured: &str) -> String {
    match verbose {
        0 => configured.to_string(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

fn build_filter(verbose: u8, configured: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return filter;
    }
    EnvFilter::try_new(directive_for(verbose, configured)).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber; later calls are no-ops
pub fn init(verbose: u8, configured: &str, color: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbose, configured))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(color)
        .try_init();
}
