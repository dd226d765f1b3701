//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Stylesheet of the Confluence default theme, served at `/confluence-styles.css`.
pub const DEFAULT_STYLESHEET_URL: &str = "https://commhaven.atlassian.net/wiki/s/d41d8cd98f00b204e9800998ecf8427e-CDN/en_GB/7901/5df78f394d050d6d162f939902a242799d42e5a9/_/download/resources/com.atlassian.confluence.themes.default:styles/site.css";

/// Root configuration for the Confluence proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind host and port).
    pub listener: ListenerConfig,

    /// Upstream Confluence tenant settings.
    pub confluence: ConfluenceConfig,

    /// Credentials injected into every authenticated upstream request.
    pub credentials: Credentials,

    /// Static asset hosting.
    pub static_files: StaticFilesConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// File this configuration was read from, if any. Never served statically.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// TCP port to bind.
    pub port: u16,
}

impl ListenerConfig {
    /// `host:port` pair suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
        }
    }
}

/// Upstream Confluence Cloud settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConfluenceConfig {
    /// Scheme and host of the tenant (e.g., "https://example.atlassian.net").
    pub base_url: String,

    /// Space whose pages are listed by `/pages`.
    pub space_key: String,

    /// Page size requested from the space content listing.
    pub page_limit: u32,

    /// Fully qualified URL of the theme stylesheet.
    pub stylesheet_url: String,
}

impl Default for ConfluenceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://commhaven.atlassian.net".to_string(),
            space_key: "proxytest".to_string(),
            page_limit: 50,
            stylesheet_url: DEFAULT_STYLESHEET_URL.to_string(),
        }
    }
}

/// Confluence account credentials (email + API token).
#[derive(Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Credentials {
    pub email: String,
    pub api_token: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            api_token: api_token.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("api_token", &"<redacted>")
            .finish()
    }
}

/// Static asset hosting configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Directory served for paths no route matches.
    pub root: PathBuf,

    /// Target of the `/` redirect.
    pub entry_page: String,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            entry_page: "/start.html".to_string(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log formatter (pretty for development, json for aggregation).
    pub log_format: LogFormat,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
