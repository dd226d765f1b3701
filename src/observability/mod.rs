//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! handlers + upstream client produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every span (see `http::request`)
//! - Metrics are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
