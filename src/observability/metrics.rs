//! Metrics collection and exposition.
//!
//! # Metrics
//! - `confluence_proxy_upstream_requests_total` (counter): upstream calls by route, outcome
//! - `confluence_proxy_upstream_duration_seconds` (histogram): upstream latency by route
//!
//! Outcomes: `success`, `rejected`, `transport_error`, `decode_error`, `invalid_shape`.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

pub const UPSTREAM_REQUESTS_TOTAL: &str = "confluence_proxy_upstream_requests_total";
pub const UPSTREAM_DURATION_SECONDS: &str = "confluence_proxy_upstream_duration_seconds";

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a completed upstream call.
pub fn record_upstream(route: &'static str, outcome: &'static str, start: Instant) {
    record_outcome(route, outcome);
    ::metrics::histogram!(UPSTREAM_DURATION_SECONDS, "route" => route)
        .record(start.elapsed().as_secs_f64());
}

/// Count an outcome decided after the call itself was already recorded.
pub fn record_outcome(route: &'static str, outcome: &'static str) {
    ::metrics::counter!(UPSTREAM_REQUESTS_TOTAL, "route" => route, "outcome" => outcome).increment(1);
}
