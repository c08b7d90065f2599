//! Logging infrastructure for the BMI simulator.
//!
//! Log lines go to stderr so that stdout carries only the result panel,
//! tables and CSV output.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default filter for interactive use; clamping notices still show up
pub const DEFAULT_LEVEL: &str = "warn";

/// Initialize logging with the default level
///
/// Can be overridden with the RUST_LOG environment variable.
pub fn init() {
    init_with_level(DEFAULT_LEVEL)
}

/// Initialize logging with a specific default level
///
/// # Arguments
/// * `default_level` - Default log level (trace, debug, info, warn, error)
///
/// RUST_LOG still takes precedence. Calling this twice is harmless; the
/// second call leaves the first subscriber in place.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_target(false).with_writer(std::io::stderr))
        .try_init();
}

/// Initialize logging for testing (captures logs for test output)
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
