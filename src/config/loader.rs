//! Configuration loading from disk, a `.env` file and the process environment.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

pub const ENV_PORT: &str = "PORT";
pub const ENV_EMAIL: &str = "CONFLUENCE_EMAIL";
pub const ENV_API_TOKEN: &str = "CONFLUENCE_API_TOKEN";
pub const ENV_SPACE_KEY: &str = "CONFLUENCE_SPACE_KEY";
pub const ENV_BASE_URL: &str = "CONFLUENCE_BASE_URL";
pub const ENV_STATIC_DIR: &str = "STATIC_DIR";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

/// Dotenv file read from the working directory.
pub const DOTENV_FILE: &str = ".env";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to read {path}: {source}")]
    DotEnv {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    #[error("Invalid value for {name}: '{value}'")]
    InvalidEnv { name: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration.
///
/// Starts from the TOML file at `path` (or defaults when `None`) and overlays
/// environment variables resolved through `env`. Empty variables are treated
/// as unset.
pub fn load_config<F>(path: Option<&Path>, env: F) -> Result<ProxyConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => read_file(path)?,
        None => ProxyConfig::default(),
    };

    apply_env(&mut config, env)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load configuration from the real process environment, falling back to
/// `.env` in the working directory for variables the environment lacks.
pub fn load_from_process_env(path: Option<&Path>) -> Result<ProxyConfig, ConfigError> {
    let dotenv = read_dotenv(Path::new(DOTENV_FILE))?;
    load_config(path, layered(|name| std::env::var(name).ok(), dotenv))
}

/// Read `KEY=VALUE` pairs from a dotenv file. A missing file yields no pairs.
///
/// The process environment is left untouched.
pub fn read_dotenv(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    let to_error = |source: dotenvy::Error| ConfigError::DotEnv {
        path: path.to_path_buf(),
        source,
    };

    match dotenvy::from_path_iter(path) {
        Ok(iter) => iter.collect::<Result<_, _>>().map_err(to_error),
        Err(e) if e.not_found() => Ok(HashMap::new()),
        Err(e) => Err(to_error(e)),
    }
}

/// Lookup that prefers `primary` and consults `fallback` for variables that
/// are unset or empty there.
pub fn layered<F>(primary: F, fallback: HashMap<String, String>) -> impl Fn(&str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    move |name| {
        primary(name)
            .filter(|v| !v.trim().is_empty())
            .or_else(|| fallback.get(name).cloned())
    }
}

fn read_file(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config: ProxyConfig = toml::from_str(&content)?;
    config.source = Some(path.to_path_buf());
    Ok(config)
}

fn apply_env<F>(config: &mut ProxyConfig, env: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |name: &str| env(name).filter(|v| !v.trim().is_empty());

    if let Some(port) = lookup(ENV_PORT) {
        config.listener.port = port.trim().parse().map_err(|_| ConfigError::InvalidEnv {
            name: ENV_PORT,
            value: port,
        })?;
    }
    if let Some(email) = lookup(ENV_EMAIL) {
        config.credentials.email = email;
    }
    if let Some(token) = lookup(ENV_API_TOKEN) {
        config.credentials.api_token = token;
    }
    if let Some(space_key) = lookup(ENV_SPACE_KEY) {
        config.confluence.space_key = space_key;
    }
    if let Some(base_url) = lookup(ENV_BASE_URL) {
        config.confluence.base_url = base_url;
    }
    if let Some(dir) = lookup(ENV_STATIC_DIR) {
        config.static_files.root = PathBuf::from(dir);
    }
    if let Some(format) = lookup(ENV_LOG_FORMAT) {
        config.observability.log_format =
            format.parse().map_err(|_| ConfigError::InvalidEnv {
                name: ENV_LOG_FORMAT,
                value: format,
            })?;
    }

    Ok(())
}
