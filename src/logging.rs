//! # Logging
//!
//! Diagnostics go to stderr through `tracing`; the benchmark's own status
//! lines go to stdout through the console sink and are not tracing events.

use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Environment variable holding the filter directives, checked before `RUST_LOG`.
pub const LOG_ENV: &str = "DMXP_LOG";

const DEFAULT_FILTER: &str = "info";

/// Initialize diagnostics logging. Safe to call more than once.
pub fn init_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let directives = filter_directives();
        let filter = EnvFilter::try_new(&directives)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_names(true)
                .with_level(true)
                .with_filter(filter),
        );

        // Use try_init to avoid panic if global subscriber already set
        if subscriber.try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized - continuing with existing subscriber");
        }

        tracing::debug!(filter = %directives, "logging initialized");
    });
}

fn filter_directives() -> String {
    std::env::var(LOG_ENV)
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| DEFAULT_FILTER.to_string())
}
