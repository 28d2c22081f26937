//! Alert rule types

use serde::{Deserialize, Serialize};

/// One watched page: notify `email` when `keyword` appears on `url`.
///
/// Serialized as `{"Email": .., "Keyword": .., "URL": ..}`. Lowercase keys are
/// accepted when parsing. Missing fields default to the empty string, which
/// makes the rule vacuous but not invalid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertRule {
    /// Destination address for the notification
    #[serde(rename = "Email", alias = "email")]
    pub email: String,
    /// Case-insensitive substring to search for
    #[serde(rename = "Keyword", alias = "keyword")]
    pub keyword: String,
    /// Page to fetch and scan
    #[serde(rename = "URL", alias = "url")]
    pub url: String,
}

impl AlertRule {
    /// Create a new rule
    pub fn new(
        email: impl Into<String>,
        keyword: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            keyword: keyword.into(),
            url: url.into(),
        }
    }

    /// Subject line sent when the keyword is found
    pub fn subject(&self) -> String {
        format!("Keyword {} found on {}.", self.keyword, self.url)
    }

    /// Plain-text body sent when the keyword is found
    pub fn body(&self, config_source: &str) -> String {
        format!(
            "On {} the keyword \"{}\" was found.\nConfig: {}.",
            self.url, self.keyword, config_source
        )
    }
}
