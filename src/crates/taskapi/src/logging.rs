//! Tracing subscriber setup
//!
//! `RUST_LOG` wins over the configured level when set.

use tracing::Subscriber;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;

/// Filter directive for a configured level, with chatty dependencies held at warn
pub fn filter_directive(level: &str) -> String {
    format!("{},sqlx=warn,tower_http=warn,hyper=warn", level.trim().to_ascii_lowercase())
}

/// Build the subscriber for a logging config without installing it
pub fn subscriber(config: &LoggingConfig) -> Box<dyn Subscriber + Send + Sync> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(&config.level)));

    let registry = tracing_subscriber::registry().with(filter);
    let writer = std::io::stderr;

    match config.format.as_str() {
        "json" => Box::new(registry.with(fmt::layer().json().with_target(true).with_writer(writer))),
        "pretty" => Box::new(registry.with(fmt::layer().pretty().with_target(true).with_writer(writer))),
        _ => Box::new(registry.with(fmt::layer().compact().with_target(true).with_writer(writer))),
    }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init(config: &LoggingConfig) {
    // Already installed on repeated init
    let _ = subscriber(config).try_init();
}
