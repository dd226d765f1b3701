//! Response translation.
//!
//! # Responsibilities
//! - Map upstream rejections and failures to client-facing responses
//! - JSON `{error, details}` bodies for API routes
//! - CSS comment bodies for the stylesheet route
//!
//! # Design Decisions
//! - Upstream status codes are forwarded unchanged
//! - Transport, decode and shape failures all answer 500
//! - Messages are stable strings clients can match on

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::confluence::ConfluenceError;

pub const MSG_UPSTREAM_REJECTED: &str = "Błąd pobierania danych z Confluence";
pub const MSG_CONNECTION_FAILED: &str = "Błąd połączenia z Confluence";
pub const MSG_INVALID_STRUCTURE: &str = "Nieprawidłowa struktura danych z Confluence";
pub const DETAILS_MISSING_BODY: &str = "Brak body.view.value w odpowiedzi";

pub const CSS_UPSTREAM_REJECTED: &str = "/* Error fetching Confluence CSS */";
pub const CSS_FAILED: &str = "/* Error */";

/// Error body returned by the JSON routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub details: String,
}

/// Failure of a JSON proxy route.
#[derive(Debug)]
pub enum ProxyError {
    /// Confluence answered with a non-success status.
    Upstream { status: StatusCode, body: String },
    /// Confluence could not be reached or its answer could not be read.
    Connection(String),
    /// Confluence answered successfully with an unusable document.
    InvalidStructure,
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::Upstream { status, .. } => *status,
            ProxyError::Connection(_) | ProxyError::InvalidStructure => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn body(&self) -> ErrorBody {
        let (error, details) = match self {
            ProxyError::Upstream { body, .. } => (MSG_UPSTREAM_REJECTED, body.clone()),
            ProxyError::Connection(message) => (MSG_CONNECTION_FAILED, message.clone()),
            ProxyError::InvalidStructure => (MSG_INVALID_STRUCTURE, DETAILS_MISSING_BODY.to_string()),
        };
        ErrorBody {
            error: error.to_string(),
            details,
        }
    }
}

impl From<ConfluenceError> for ProxyError {
    fn from(err: ConfluenceError) -> Self {
        match err {
            ConfluenceError::InvalidShape(_) => ProxyError::InvalidStructure,
            other => ProxyError::Connection(other.to_string()),
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

/// Failure of the stylesheet route, answered as a CSS comment.
#[derive(Debug)]
pub enum CssError {
    Upstream(StatusCode),
    Failed,
}

impl IntoResponse for CssError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            CssError::Upstream(status) => (status, CSS_UPSTREAM_REJECTED),
            CssError::Failed => (StatusCode::INTERNAL_SERVER_ERROR, CSS_FAILED),
        };
        (status, [(header::CONTENT_TYPE, "text/css")], body).into_response()
    }
}

impl From<ConfluenceError> for CssError {
    fn from(_: ConfluenceError) -> Self {
        CssError::Failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_rejection_keeps_status_and_body() {
        let err = ProxyError::Upstream {
            status: StatusCode::NOT_FOUND,
            body: "{\"message\":\"No content found\"}".into(),
        };
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            err.body(),
            ErrorBody {
                error: MSG_UPSTREAM_REJECTED.into(),
                details: "{\"message\":\"No content found\"}".into(),
            }
        );
    }

    #[test]
    fn shape_error_is_distinct_from_connection_error() {
        let shape = ProxyError::from(ConfluenceError::InvalidShape("body.view.value"));
        assert_eq!(shape.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(shape.body().error, MSG_INVALID_STRUCTURE);
        assert_eq!(shape.body().details, DETAILS_MISSING_BODY);

        let decode = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let expected = decode.to_string();
        let conn = ProxyError::from(ConfluenceError::Decode(decode));
        assert_eq!(conn.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(conn.body().error, MSG_CONNECTION_FAILED);
        assert_eq!(conn.body().details, expected);
    }

    #[test]
    fn css_errors_are_stylesheets() {
        let response = CssError::Upstream(StatusCode::FORBIDDEN).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/css");

        let response = CssError::Failed.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
