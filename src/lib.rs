//! Confluence Cloud proxy library.

pub mod config;
pub mod confluence;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::ProxyConfig;
pub use confluence::ConfluenceClient;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
