//! Upstream result types and error definitions.

use axum::http::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Outcome of an upstream call that reached Confluence.
///
/// A non-success status is an expected answer, not a failure of the proxy,
/// so it travels here instead of through [`ConfluenceError`].
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    /// 2xx response with a decoded body.
    Success(T),
    /// Non-2xx response, body kept as raw text.
    Rejected { status: StatusCode, body: String },
}

impl<T> Fetched<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Fetched::Success(_))
    }
}

/// Errors that can occur while talking to Confluence.
#[derive(Debug, Error)]
pub enum ConfluenceError {
    /// Connection, DNS, TLS or body-read failure.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Success status but the body is not valid JSON.
    #[error("{0}")]
    Decode(#[from] serde_json::Error),

    /// Valid JSON lacking a field callers rely on.
    #[error("missing {0} in response")]
    InvalidShape(&'static str),

    /// Client could not be constructed.
    #[error("invalid client configuration: {0}")]
    Setup(String),
}

/// Result type for upstream operations.
pub type ConfluenceResult<T> = Result<Fetched<T>, ConfluenceError>;

/// True when `page` carries a truthy `body.view.value`.
///
/// Truthiness follows JavaScript: `null`, `false`, `0`, `""` and a missing
/// field are absent; any other value (including objects and arrays) counts.
pub fn has_rendered_body(page: &Value) -> bool {
    match page.pointer("/body/view/value") {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Some(Value::String(html)) => !html.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rendered_body_detection() {
        assert!(has_rendered_body(&json!({"body": {"view": {"value": "<p>hi</p>"}}})));
        assert!(!has_rendered_body(&json!({"body": {"view": {"value": ""}}})));
        assert!(!has_rendered_body(&json!({"body": {"view": {}}})));
        assert!(!has_rendered_body(&json!({"body": {"storage": {"value": "x"}}})));
        assert!(!has_rendered_body(&json!({"id": "123"})));
    }

    #[test]
    fn rendered_body_uses_javascript_truthiness() {
        let with = |value: serde_json::Value| json!({"body": {"view": {"value": value}}});
        assert!(has_rendered_body(&with(json!(42))));
        assert!(has_rendered_body(&with(json!(-0.5))));
        assert!(has_rendered_body(&with(json!(true))));
        assert!(has_rendered_body(&with(json!({}))));
        assert!(has_rendered_body(&with(json!([]))));
        assert!(!has_rendered_body(&with(json!(0))));
        assert!(!has_rendered_body(&with(json!(0.0))));
        assert!(!has_rendered_body(&with(json!(false))));
        assert!(!has_rendered_body(&with(json!(null))));
    }
}
