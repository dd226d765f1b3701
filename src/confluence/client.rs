//! Confluence Cloud REST client.
//!
//! # Responsibilities
//! - Build upstream URLs from configuration and route parameters
//! - Inject the Basic-Auth header into authenticated requests
//! - Separate HTTP rejections (returned as data) from transport failures
//! - Log every failure with URL, status and body before it is translated
//!
//! No timeout and no retries are applied: a hung upstream keeps the
//! corresponding inbound request waiting.

use std::time::Instant;

use axum::http::{header, HeaderValue};
use serde_json::Value;
use url::Url;

use crate::config::{ConfluenceConfig, Credentials};
use crate::confluence::auth::authorization_header;
use crate::confluence::types::{has_rendered_body, ConfluenceError, ConfluenceResult, Fetched};
use crate::observability::metrics;

pub const ROUTE_PAGES: &str = "pages";
pub const ROUTE_PAGE: &str = "page";
pub const ROUTE_STYLESHEET: &str = "stylesheet";

/// Handle to the upstream tenant. Cloning shares the connection pool.
#[derive(Clone)]
pub struct ConfluenceClient {
    http: reqwest::Client,
    base_url: Url,
    stylesheet_url: Url,
    space_key: String,
    page_limit: u32,
    authorization: HeaderValue,
}

impl ConfluenceClient {
    /// Create a client for the tenant described by `config`.
    pub fn new(config: &ConfluenceConfig, credentials: &Credentials) -> Result<Self, ConfluenceError> {
        let base_url = parse_url("base_url", &config.base_url)?;
        let stylesheet_url = parse_url("stylesheet_url", &config.stylesheet_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ConfluenceError::Setup(format!(
                "base_url '{}' cannot carry a path",
                config.base_url
            )));
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("confluence-proxy/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ConfluenceError::Setup(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            stylesheet_url,
            space_key: config.space_key.clone(),
            page_limit: config.page_limit,
            authorization: authorization_header(credentials)?,
        })
    }

    /// `<base>/wiki/rest/api/space/<key>/content/page?limit=<n>`
    pub fn pages_url(&self) -> Url {
        let mut url = self.endpoint(&[
            "wiki",
            "rest",
            "api",
            "space",
            self.space_key.as_str(),
            "content",
            "page",
        ]);
        url.query_pairs_mut()
            .append_pair("limit", &self.page_limit.to_string());
        url
    }

    /// `<base>/wiki/rest/api/content/<id>?expand=body.view`
    pub fn page_url(&self, id: &str) -> Url {
        let mut url = self.endpoint(&["wiki", "rest", "api", "content", id]);
        url.query_pairs_mut().append_pair("expand", "body.view");
        url
    }

    /// List the pages of the configured space.
    pub async fn list_pages(&self) -> ConfluenceResult<Value> {
        self.get_json(ROUTE_PAGES, self.pages_url()).await
    }

    /// Fetch a single page with its rendered body.
    ///
    /// A successful answer whose `body.view.value` is missing or falsy
    /// (see [`has_rendered_body`]) is turned into [`ConfluenceError::InvalidShape`].
    pub async fn get_page(&self, id: &str) -> ConfluenceResult<Value> {
        let url = self.page_url(id);
        tracing::info!(page_id = %id, url = %url, "Fetching page");

        match self.get_json(ROUTE_PAGE, url.clone()).await? {
            Fetched::Success(page) if !has_rendered_body(&page) => {
                tracing::error!(
                    url = %url,
                    body = %page,
                    "Unexpected page structure from Confluence"
                );
                metrics::record_outcome(ROUTE_PAGE, "invalid_shape");
                Err(ConfluenceError::InvalidShape("body.view.value"))
            }
            fetched => {
                if fetched.is_success() {
                    tracing::info!(page_id = %id, "Page fetched");
                }
                Ok(fetched)
            }
        }
    }

    /// Fetch the theme stylesheet as raw text. Sent without credentials.
    pub async fn stylesheet(&self) -> ConfluenceResult<String> {
        let url = self.stylesheet_url.clone();
        let start = Instant::now();

        let response = self.http.get(url.clone()).send().await.map_err(|e| {
            tracing::error!(url = %url, error = %e, "Failed to fetch Confluence CSS");
            metrics::record_upstream(ROUTE_STYLESHEET, "transport_error", start);
            e
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            tracing::error!(url = %url, error = %e, "Failed to read Confluence CSS");
            metrics::record_upstream(ROUTE_STYLESHEET, "transport_error", start);
            e
        })?;

        if !status.is_success() {
            tracing::warn!(url = %url, status = %status, "Confluence CSS request rejected");
            metrics::record_upstream(ROUTE_STYLESHEET, "rejected", start);
            return Ok(Fetched::Rejected { status, body: text });
        }

        metrics::record_upstream(ROUTE_STYLESHEET, "success", start);
        Ok(Fetched::Success(text))
    }

    async fn get_json(&self, route: &'static str, url: Url) -> ConfluenceResult<Value> {
        let start = Instant::now();

        let response = self
            .http
            .get(url.clone())
            .header(header::AUTHORIZATION, self.authorization.clone())
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!(url = %url, error = %e, "Connection to Confluence failed");
                metrics::record_upstream(route, "transport_error", start);
                e
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            tracing::error!(url = %url, status = %status, error = %e, "Failed to read Confluence response");
            metrics::record_upstream(route, "transport_error", start);
            e
        })?;

        if !status.is_success() {
            tracing::error!(
                url = %url,
                status = %status,
                body = %text,
                "Confluence returned an error response"
            );
            metrics::record_upstream(route, "rejected", start);
            return Ok(Fetched::Rejected { status, body: text });
        }

        let value: Value = serde_json::from_str(&text).map_err(|e| {
            tracing::error!(url = %url, error = %e, "Confluence returned invalid JSON");
            metrics::record_upstream(route, "decode_error", start);
            e
        })?;

        tracing::debug!(url = %url, status = %status, "Confluence request succeeded");
        metrics::record_upstream(route, "success", start);
        Ok(Fetched::Success(value))
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base URLs are rejected in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

fn parse_url(field: &str, value: &str) -> Result<Url, ConfluenceError> {
    Url::parse(value).map_err(|e| ConfluenceError::Setup(format!("{} '{}': {}", field, value, e)))
}
