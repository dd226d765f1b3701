//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → environment overlay (PORT, CONFLUENCE_*)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → passed explicitly to the HTTP server
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields except credentials have defaults
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_from_process_env, ConfigError};
pub use schema::{
    ConfluenceConfig, Credentials, ListenerConfig, LogFormat, ObservabilityConfig, ProxyConfig,
    StaticFilesConfig,
};
pub use validation::ValidationError;
