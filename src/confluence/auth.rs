//! Basic-Auth header construction for Confluence Cloud.

use axum::http::HeaderValue;
use base64::{engine::general_purpose, Engine as _};

use crate::config::Credentials;
use crate::confluence::types::ConfluenceError;

/// `Basic base64(email:token)`.
pub fn basic_auth_value(credentials: &Credentials) -> String {
    let raw = format!("{}:{}", credentials.email, credentials.api_token);
    format!("Basic {}", general_purpose::STANDARD.encode(raw))
}

/// Header value for the `Authorization` header, flagged sensitive so it is
/// never printed by tracing layers.
pub fn authorization_header(credentials: &Credentials) -> Result<HeaderValue, ConfluenceError> {
    let mut value = HeaderValue::from_str(&basic_auth_value(credentials))
        .map_err(|e| ConfluenceError::Setup(format!("authorization header: {}", e)))?;
    value.set_sensitive(true);
    Ok(value)
}
