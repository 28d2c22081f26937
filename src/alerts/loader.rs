//! Alert rule loading
//!
//! Rules are read from a `file://` path or fetched over HTTP(S), then parsed
//! as a JSON array:
//!
//! ```json
//! [
//!     {"Email": "ops@example.com", "Keyword": "sold out", "URL": "https://shop.example.com/item/42"},
//!     {"Email": "me@example.com", "Keyword": "sale", "URL": "https://example.com/deals"}
//! ]
//! ```
//!
//! A document that is not an array of objects with string fields fails the
//! whole load; no entries are skipped.

use reqwest::Url;

use super::config::AlertRule;

/// Loads the alert rule list from a local or remote source
#[derive(Debug, Clone)]
pub struct RuleLoader {
    client: reqwest::Client,
}

impl RuleLoader {
    /// Create a loader with its own HTTP client
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    /// Create a loader sharing an existing HTTP client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Resolve `location` and parse it into rules, preserving document order
    pub async fn load(&self, location: &str) -> Result<Vec<AlertRule>, ConfigError> {
        let url = Url::parse(location).map_err(|e| ConfigError::InvalidSource {
            location: location.to_string(),
            reason: e.to_string(),
        })?;

        let bytes = if url.scheme() == "file" {
            let path = location.replacen("file://", "", 1);
            tracing::debug!(path = %path, "Reading alert rules from file");
            tokio::fs::read(&path)
                .await
                .map_err(|error| ConfigError::Read { path, error })?
        } else {
            tracing::debug!(url = %url, "Fetching alert rules");
            self.fetch(url).await?
        };

        let rules = parse_rules(&bytes)?;
        tracing::info!(count = rules.len(), source = %location, "Loaded alert rules");
        Ok(rules)
    }

    async fn fetch(&self, url: Url) -> Result<Vec<u8>, ConfigError> {
        let location = url.to_string();
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ConfigError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConfigError::Status {
                location,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ConfigError::Fetch(e.to_string()))?;
        Ok(body.to_vec())
    }
}

impl Default for RuleLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a JSON rule document
pub fn parse_rules(bytes: &[u8]) -> Result<Vec<AlertRule>, ConfigError> {
    serde_json::from_slice(bytes).map_err(|e| ConfigError::Parse(e.to_string()))
}

/// Rule loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid config source {location}: {reason}")]
    InvalidSource { location: String, reason: String },

    #[error("Failed to read config file {path}: {error}")]
    Read {
        path: String,
        #[source]
        error: std::io::Error,
    },

    #[error("Failed to fetch config: {0}")]
    Fetch(String),

    #[error("Config source {location} returned status {status}")]
    Status { location: String, status: u16 },

    #[error("Malformed config document: {0}")]
    Parse(String),
}
