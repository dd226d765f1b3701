//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the global `tracing` subscriber once at startup
//! - Honour `RUST_LOG`, falling back to a sensible default filter
//! - Pick JSON or pretty output from configuration

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogFormat;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "confluence_proxy=info,tower_http=info";

/// Install the global subscriber.
///
/// Returns `false` when a subscriber was already installed (e.g., by a test
/// harness); the existing one is kept.
pub fn init(format: LogFormat) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    let result = match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .try_init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).try_init(),
    };

    result.is_ok()
}
