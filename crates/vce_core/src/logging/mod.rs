//! Logging infrastructure.
//!
//! Thin setup around the `tracing` ecosystem: modules log through the
//! `tracing` macros, and the host calls [`init_tracing`] once at startup.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// Respects the `RUST_LOG` environment variable and falls back to the
/// provided default filter (typically the configured `logging.level`).
/// Outputs to stderr with timestamps. Should be called once at startup.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();
}
