//! Tracing subscriber bootstrap for hosts and tests.

use crate::config::EditorConfig;
use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber filtered by `RUST_LOG`, falling back to `default_filter`.
///
/// Safe to call more than once; later calls are ignored. Returns `true` when
/// this call installed the subscriber.
pub fn init(default_filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

/// [`init`] with the config's `log_filter` as the fallback filter.
pub fn init_from(config: &EditorConfig) -> bool {
    init(&config.log_filter)
}
