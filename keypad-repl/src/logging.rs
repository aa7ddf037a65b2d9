//! Logging through `tracing`, written to stderr so it never mixes with the calculator display.

use std::io;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// The level used when neither `RUST_LOG` nor `--log` is given.
pub const DEFAULT_LEVEL: &str = "warn";

/// Builds the filter: `RUST_LOG` when set, otherwise the given level for every crate.
fn build_env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Installs the global subscriber.
pub fn init_logging(level: &str) {
    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .without_time();

    tracing_subscriber::registry()
        .with(build_env_filter(level))
        .with(layer)
        .init();
}
