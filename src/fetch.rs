//! Fetch boundary for site resources (taxonomy, placeholders).
//!
//! Decorators never talk to the network directly: they go through the
//! `ResourceFetcher` seam so tests can substitute a mock and count
//! calls. The real implementation is a thin reqwest client rooted at
//! the site origin.

use async_trait::async_trait;
use serde_json::Value;

/// Errors from fetching a site resource.
///
/// Callers in this crate absorb these and degrade to empty output;
/// the variants exist so the absorbing layer can log what actually
/// went wrong.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP status {status} for {path}")]
    Http { status: u16, path: String },
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Malformed JSON: {0}")]
    MalformedJson(String),
}

/// Fetches a JSON resource by site-relative path.
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    async fn fetch_json(&self, path: &str) -> Result<Value, FetchError>;
}

/// HTTP fetcher rooted at a site origin.
pub struct HttpFetcher {
    base_url: String,
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher for the given site origin
    /// (e.g. `https://example.com`).
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Join a site-relative path onto an origin, tolerating a leading
/// slash on the path.
fn join_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url, path.trim_start_matches('/'))
}

#[async_trait]
impl ResourceFetcher for HttpFetcher {
    async fn fetch_json(&self, path: &str) -> Result<Value, FetchError> {
        let url = join_url(&self.base_url, path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| FetchError::MalformedJson(e.to_string()))
    }
}
