//! Guard in front of the static file fallback.
//!
//! Hidden entries (any path segment starting with `.`, such as `.env` or
//! `.git/config`) and the proxy's own configuration file are answered with
//! 404 before `ServeDir` sees the request.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use percent_encoding::percent_decode_str;

/// Paths under the static root that must never be served.
#[derive(Debug, Clone)]
pub struct StaticGuard {
    root: PathBuf,
    protected: Arc<Vec<PathBuf>>,
}

impl StaticGuard {
    /// `protected` files that do not exist are ignored.
    pub fn new(root: &Path, protected: impl IntoIterator<Item = PathBuf>) -> Self {
        let protected = protected
            .into_iter()
            .filter_map(|path| std::fs::canonicalize(path).ok())
            .collect();
        Self {
            root: root.to_path_buf(),
            protected: Arc::new(protected),
        }
    }

    /// Whether `uri_path` may be handed to the static file service.
    pub async fn allows(&self, uri_path: &str) -> bool {
        let decoded = percent_decode_str(uri_path).decode_utf8_lossy();
        if is_hidden(&decoded) {
            return false;
        }
        if self.protected.is_empty() {
            return true;
        }

        let candidate = self.root.join(decoded.trim_start_matches('/'));
        match tokio::fs::canonicalize(&candidate).await {
            Ok(resolved) => !self.protected.contains(&resolved),
            // Nothing there; ServeDir answers 404 itself.
            Err(_) => true,
        }
    }
}

fn is_hidden(path: &str) -> bool {
    path.split(['/', '\\']).any(|segment| segment.starts_with('.'))
}

pub async fn static_guard_middleware(
    State(guard): State<StaticGuard>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if guard.allows(request.uri().path()).await {
        return next.run(request).await;
    }

    tracing::warn!(path = %request.uri().path(), "Refused to serve protected static path");
    StatusCode::NOT_FOUND.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_hidden_segments() {
        assert!(is_hidden("/.env"));
        assert!(is_hidden("/assets/.git/config"));
        assert!(is_hidden("/../secret"));
        assert!(!is_hidden("/start.html"));
        assert!(!is_hidden("/css/site.min.css"));
        assert!(!is_hidden("/"));
    }

    #[tokio::test]
    async fn encoded_dots_are_still_hidden() {
        let dir = tempfile::tempdir().unwrap();
        let guard = StaticGuard::new(dir.path(), Vec::<PathBuf>::new());
        assert!(!guard.allows("/%2Eenv").await);
        assert!(!guard.allows("/%2eenv").await);
        assert!(guard.allows("/start.html").await);
    }

    #[tokio::test]
    async fn protected_file_is_refused_by_any_spelling() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("proxy.toml");
        std::fs::write(&config, "[credentials]").unwrap();
        std::fs::create_dir(dir.path().join("assets")).unwrap();

        let guard = StaticGuard::new(dir.path(), [config]);
        assert!(!guard.allows("/proxy.toml").await);
        assert!(!guard.allows("/%70roxy.toml").await);
        assert!(!guard.allows("/assets/../proxy.toml").await);
        assert!(guard.allows("/other.toml").await);
    }
}
