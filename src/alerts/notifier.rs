//! Email notifications for matched alerts

use std::future::Future;

/// Default Mailgun API endpoint
pub const MAILGUN_API_BASE: &str = "https://api.mailgun.net";

/// A plain-text email to a single recipient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub text: String,
}

impl EmailMessage {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            text: text.into(),
        }
    }
}

/// Delivers alert emails
pub trait Mailer {
    fn send(&self, message: &EmailMessage) -> impl Future<Output = Result<(), NotifyError>> + Send;
}

/// Sends mail through the Mailgun messages API
#[derive(Debug, Clone)]
pub struct MailgunNotifier {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    domain: String,
}

impl MailgunNotifier {
    /// Create a notifier for `domain` authenticated with `api_key`
    pub fn new(api_key: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: MAILGUN_API_BASE.to_string(),
            api_key: api_key.into(),
            domain: domain.into(),
        }
    }

    /// Share an existing HTTP client
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Override the API endpoint (EU region, local test server)
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Messages endpoint for the configured domain
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v3/{}/messages",
            self.api_base.trim_end_matches('/'),
            self.domain
        )
    }

    /// Sender address, always `no-reply@<domain>`
    pub fn sender(&self) -> String {
        format!("no-reply@{}", self.domain)
    }
}

impl Mailer for MailgunNotifier {
    async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError> {
        let from = self.sender();
        let form = [
            ("from", from.as_str()),
            ("to", message.to.as_str()),
            ("subject", message.subject.as_str()),
            ("text", message.text.as_str()),
        ];

        // form() sets Content-Type: application/x-www-form-urlencoded
        let response = self
            .client
            .post(self.endpoint())
            .basic_auth("api", Some(&self.api_key))
            .form(&form)
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                message: body,
            });
        }

        tracing::info!(to = %message.to, response = %body, "Mail sent");
        Ok(())
    }
}

/// Notifier errors
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Mail transport error: {0}")]
    Transport(String),

    #[error("Mail provider rejected message (status {status}): {message}")]
    Rejected { status: u16, message: String },
}
