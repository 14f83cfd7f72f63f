use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set
#[must_use]
pub const fn default_filter(trace_events: bool) -> &'static str {
    if trace_events {
        "warn,tiberius=trace,tdscheck=debug"
    } else {
        "warn"
    }
}

/// Send driver and internal tracing events to stderr
///
/// Stdout stays reserved for the check report so the log file mirrors it
/// exactly.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(trace_events: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(trace_events)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize tracing: {e}"))
}
