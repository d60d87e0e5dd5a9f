//! Logging setup.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber. `RUST_LOG` wins over `level`; `format` is
/// `pretty`, `compact` or `json`.
pub fn setup_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        "json" => registry.with(fmt::layer().json().with_writer(std::io::stderr)).init(),
        "compact" => registry.with(fmt::layer().compact().with_writer(std::io::stderr)).init(),
        _ => registry.with(fmt::layer().pretty().with_writer(std::io::stderr)).init(),
    }
}
