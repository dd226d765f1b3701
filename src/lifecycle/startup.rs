//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Initialize logging and (optionally) metrics
//! - Build the server, then bind the listener and serve
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Nothing binds until configuration is known to be valid

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{self, ConfigError, ObservabilityConfig};
use crate::confluence::ConfluenceError;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::{logging, metrics};

/// Inputs gathered from the command line.
#[derive(Debug, Clone, Default)]
pub struct StartupOptions {
    /// Optional TOML configuration file.
    pub config_path: Option<PathBuf>,
    /// Port overriding both file and environment.
    pub port: Option<u16>,
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("upstream client error: {0}")]
    Client(#[from] ConfluenceError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Run the proxy until a termination signal arrives.
pub async fn run(options: StartupOptions) -> Result<(), StartupError> {
    let loaded = config::load_from_process_env(options.config_path.as_deref());

    // Logging comes up even when the config is broken so the failure is reported.
    let observability = loaded
        .as_ref()
        .map(|c| c.observability.clone())
        .unwrap_or_else(|_| ObservabilityConfig::default());
    logging::init(observability.log_format);

    let mut config = loaded?;
    if let Some(port) = options.port {
        config.listener.port = port;
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address(),
        base_url = %config.confluence.base_url,
        space_key = %config.confluence.space_key,
        "Configuration loaded"
    );

    let server = HttpServer::new(config.clone())?;

    if observability.metrics_enabled {
        match observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let address = config.listener.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address: address.clone(), source })?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let signals = signals::spawn_signal_forwarder(shutdown.clone());

    server.run(listener, shutdown.subscribe()).await?;
    signals.abort();

    tracing::info!("Shutdown complete");
    Ok(())
}
