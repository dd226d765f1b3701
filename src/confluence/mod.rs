//! Upstream Confluence Cloud integration.
//!
//! # Data Flow
//! ```text
//! route handler
//!     → client.rs (URL + Authorization header)
//!     → Confluence REST API
//!     → Fetched::Success | Fetched::Rejected | ConfluenceError
//!     → translated into an HTTP response by http::response
//! ```

pub mod auth;
pub mod client;
pub mod types;

pub use client::ConfluenceClient;
pub use types::{ConfluenceError, ConfluenceResult, Fetched};
