//! Logging setup for the command-line front end
//!
//! `LOG_LEVEL` holds an `EnvFilter` directive such as `debug` or
//! `warn,convo_utils=trace`; the default only shows warnings. Logs go to
//! stderr so command output stays clean.

use tracing_subscriber::EnvFilter;

/// Default filter when `LOG_LEVEL` is unset or invalid
pub const DEFAULT_FILTER: &str = "warn";

pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
