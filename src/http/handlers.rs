//! Route handlers.
//!
//! Each handler is a stateless request → response mapping over the shared
//! [`AppState`]; nothing is remembered between requests.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::Value;

use crate::confluence::Fetched;
use crate::health::HealthReport;
use crate::http::response::{CssError, ProxyError};
use crate::http::server::AppState;

/// `GET /`: redirect to the static entry page.
pub async fn root(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::FOUND,
        [(header::LOCATION, state.entry_page.to_string())],
    )
}

/// `GET /pages`: list the pages of the configured space.
pub async fn list_pages(State(state): State<AppState>) -> Result<Json<Value>, ProxyError> {
    relay_json(state.confluence.list_pages().await?)
}

/// `GET /page/{id}`: fetch one page with its rendered body.
pub async fn get_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ProxyError> {
    relay_json(state.confluence.get_page(&id).await?)
}

/// `GET /confluence-styles.css`: relay the theme stylesheet.
pub async fn stylesheet(State(state): State<AppState>) -> Result<impl IntoResponse, CssError> {
    match state.confluence.stylesheet().await? {
        Fetched::Success(css) => Ok(([(header::CONTENT_TYPE, "text/css")], css)),
        Fetched::Rejected { status, .. } => Err(CssError::Upstream(status)),
    }
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    Json(HealthReport::now(state.started))
}

fn relay_json(fetched: Fetched<Value>) -> Result<Json<Value>, ProxyError> {
    match fetched {
        Fetched::Success(value) => Ok(Json(value)),
        Fetched::Rejected { status, body } => Err(ProxyError::Upstream { status, body }),
    }
}
