//! Liveness reporting for `/health`.
//!
//! The report never touches Confluence; it only proves the process is
//! serving requests.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Body of a `/health` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    /// Seconds since the server started.
    pub uptime: f64,
    /// Wall-clock time in milliseconds since the Unix epoch.
    pub timestamp: u64,
}

impl HealthReport {
    pub fn now(started: Instant) -> Self {
        Self {
            status: "ok".to_string(),
            uptime: started.elapsed().as_secs_f64(),
            timestamp: epoch_millis(),
        }
    }
}

fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
