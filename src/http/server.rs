//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (CORS, tracing, request ID)
//! - Fall back to static files for unmatched paths, never serving hidden
//!   entries or the config file
//! - Bind server to listener and stop on the shutdown signal

use std::sync::Arc;
use std::time::Instant;

use axum::{body::Body, http::Request, middleware, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::ProxyConfig;
use crate::confluence::{ConfluenceClient, ConfluenceError};
use crate::http::handlers;
use crate::http::middleware::{cors_middleware, static_guard_middleware, StaticGuard};
use crate::http::request::{make_request_span, UuidRequestId};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub confluence: ConfluenceClient,
    pub entry_page: Arc<str>,
    pub started: Instant,
}

/// HTTP server for the Confluence proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails only when the upstream client cannot be built from `config`.
    pub fn new(config: ProxyConfig) -> Result<Self, ConfluenceError> {
        let confluence = ConfluenceClient::new(&config.confluence, &config.credentials)?;

        let state = AppState {
            confluence,
            entry_page: Arc::from(config.static_files.entry_page.as_str()),
            started: Instant::now(),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        let root = &config.static_files.root;
        let guard = StaticGuard::new(root, config.source.clone());
        let static_files = ServiceBuilder::new()
            .layer(middleware::from_fn_with_state(guard, static_guard_middleware))
            .service(ServeDir::new(root));

        Router::new()
            .route("/", get(handlers::root))
            .route("/pages", get(handlers::list_pages))
            .route("/page/{id}", get(handlers::get_page))
            .route("/confluence-styles.css", get(handlers::stylesheet))
            .route("/health", get(handlers::health))
            .fallback_service(static_files)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(
                        TraceLayer::new_for_http()
                            .make_span_with(|request: &Request<Body>| make_request_span(request)),
                    ),
            )
            .layer(middleware::from_fn(cors_middleware))
    }

    /// Clone of the fully layered router, for driving without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            space_key = %self.config.confluence.space_key,
            static_root = %self.config.static_files.root.display(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
