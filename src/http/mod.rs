//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → middleware/cors.rs (permissive CORS on every response)
//!     → request.rs (request ID + tracing span)
//!     → handlers.rs (route → upstream call)
//!     → response.rs (translate rejections and failures)
//!     → Send to client
//! ```

pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use response::{CssError, ErrorBody, ProxyError};
pub use server::{AppState, HttpServer};
