//! Keyword checks against fetched pages

use std::future::Future;

/// Decides whether a page currently contains a keyword
pub trait KeywordMatcher {
    fn matches(
        &self,
        url: &str,
        keyword: &str,
    ) -> impl Future<Output = Result<bool, FetchError>> + Send;
}

/// Fetches pages over HTTP and scans the raw body text.
///
/// The response status is ignored unless `require_success` is set, so an
/// error page that happens to contain the keyword counts as a match.
#[derive(Debug, Clone)]
pub struct HttpKeywordMatcher {
    client: reqwest::Client,
    require_success: bool,
}

impl HttpKeywordMatcher {
    /// Create a matcher with its own HTTP client
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    /// Create a matcher sharing an existing HTTP client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            require_success: false,
        }
    }

    /// Only scan pages served with a 2xx status
    pub fn with_require_success(mut self, require_success: bool) -> Self {
        self.require_success = require_success;
        self
    }
}

impl Default for HttpKeywordMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordMatcher for HttpKeywordMatcher {
    async fn matches(&self, url: &str, keyword: &str) -> Result<bool, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let status = response.status();
        if self.require_success && !status.is_success() {
            tracing::debug!(url = %url, status = %status, "Skipping non-success page");
            return Ok(false);
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))?;

        Ok(contains_keyword(&String::from_utf8_lossy(&body), keyword))
    }
}

/// Case-insensitive substring test
pub fn contains_keyword(text: &str, keyword: &str) -> bool {
    text.to_lowercase().contains(&keyword.to_lowercase())
}

/// Page fetch errors
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Failed to read response body: {0}")]
    Body(String),
}
