//! Confluence Proxy
//!
//! Relays a handful of Confluence Cloud REST endpoints to browser code that
//! cannot call the API itself (credentials, CORS), and serves the static
//! front-end next to them.
//!
//! # Architecture Overview
//!
//! ```text
//!                          ┌───────────────────────────────────────────────┐
//!                          │               CONFLUENCE PROXY                │
//!     Browser request      │  ┌─────────┐    ┌──────────┐    ┌──────────┐  │
//!     ─────────────────────┼─▶│  cors   │───▶│ request  │───▶│ handlers │  │
//!                          │  │         │    │ id/trace │    │          │  │
//!                          │  └─────────┘    └──────────┘    └────┬─────┘  │
//!                          │                                      │        │
//!                          │           ┌──────────────┐           ▼        │
//!                          │           │  ServeDir    │    ┌────────────┐  │
//!                          │           │ (fallback)   │    │ confluence │──┼──▶ Confluence
//!                          │           └──────────────┘    │   client   │◀─┼─── Cloud
//!     Response             │  ┌──────────────────────┐     └─────┬──────┘  │
//!     ◀────────────────────┼──│ response translation │◀──────────┘         │
//!                          │  └──────────────────────┘                     │
//!                          │  config · lifecycle · observability           │
//!                          └───────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use confluence_proxy::lifecycle::startup::{self, StartupOptions};

#[derive(Parser)]
#[command(name = "confluence-proxy")]
#[command(about = "Credential-injecting proxy for the Confluence Cloud REST API", long_about = None)]
struct Cli {
    /// Optional TOML configuration file; environment variables override it
    #[arg(short, long, env = "CONFLUENCE_PROXY_CONFIG")]
    config: Option<PathBuf>,

    /// Listening port, overriding PORT and the config file
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let options = StartupOptions {
        config_path: cli.config,
        port: cli.port,
    };

    match startup::run(options).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Proxy failed to start");
            ExitCode::FAILURE
        }
    }
}
