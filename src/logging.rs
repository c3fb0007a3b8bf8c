//! Logging setup
//!
//! Logs go to stderr so they never interleave with the interactive prompts on
//! stdout.

use tracing_subscriber::EnvFilter;

/// Filter used when neither `--log-level` nor `RUST_LOG` is set
pub const DEFAULT_FILTER: &str = "warn";

/// Build the log filter
///
/// An explicit directive wins, then `RUST_LOG`, then [`DEFAULT_FILTER`]. An
/// unparseable explicit directive falls back to the default.
pub fn filter(directive: Option<&str>) -> EnvFilter {
    match directive {
        Some(directive) => {
            EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
        }
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    }
}

/// Install the global subscriber
///
/// Calling this twice is harmless; the second call is ignored.
pub fn init(directive: Option<&str>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(directive))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
