//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Credentials must be present before the listener binds
//! - Upstream URLs must be absolute http(s) URLs
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;
use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic problem with a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("CONFLUENCE_EMAIL is missing or empty")]
    MissingEmail,

    #[error("CONFLUENCE_API_TOKEN is missing or empty")]
    MissingApiToken,

    #[error("Confluence space key is empty")]
    EmptySpaceKey,

    #[error("Confluence page limit must be greater than zero")]
    ZeroPageLimit,

    #[error("{field} '{value}' is not a valid http(s) URL")]
    InvalidUrl { field: &'static str, value: String },

    #[error("entry page '{0}' must start with '/'")]
    InvalidEntryPage(String),
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.credentials.email.trim().is_empty() {
        errors.push(ValidationError::MissingEmail);
    }
    if config.credentials.api_token.trim().is_empty() {
        errors.push(ValidationError::MissingApiToken);
    }
    if config.confluence.space_key.trim().is_empty() {
        errors.push(ValidationError::EmptySpaceKey);
    }
    if config.confluence.page_limit == 0 {
        errors.push(ValidationError::ZeroPageLimit);
    }

    for (field, value) in [
        ("base_url", &config.confluence.base_url),
        ("stylesheet_url", &config.confluence.stylesheet_url),
    ] {
        if !is_http_url(value) {
            errors.push(ValidationError::InvalidUrl {
                field,
                value: value.clone(),
            });
        }
    }

    if !config.static_files.entry_page.starts_with('/') {
        errors.push(ValidationError::InvalidEntryPage(
            config.static_files.entry_page.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_http_url(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.has_host(),
        Err(_) => false,
    }
}
