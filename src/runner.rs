//! Single pass over the alert rules
//!
//! Rules are checked strictly one after another in document order. In
//! [`ErrorMode::Halt`] the first failing rule aborts the pass and later rules
//! are never attempted; in [`ErrorMode::Continue`] failures are recorded in
//! the report and the pass carries on.

use chrono::{DateTime, Utc};

use crate::alerts::{
    AlertRule, ConfigError, EmailMessage, FetchError, HttpKeywordMatcher, KeywordMatcher,
    MailgunNotifier, Mailer, NotifyError, RuleLoader,
};
use crate::settings::{ErrorMode, Settings};

/// Checks rules and sends notifications for matches
pub struct Runner<M, N> {
    matcher: M,
    mailer: N,
    config_source: String,
    error_mode: ErrorMode,
}

impl<M, N> Runner<M, N>
where
    M: KeywordMatcher,
    N: Mailer,
{
    /// `config_source` is quoted in every notification body
    pub fn new(matcher: M, mailer: N, config_source: impl Into<String>) -> Self {
        Self {
            matcher,
            mailer,
            config_source: config_source.into(),
            error_mode: ErrorMode::default(),
        }
    }

    pub fn with_error_mode(mut self, error_mode: ErrorMode) -> Self {
        self.error_mode = error_mode;
        self
    }

    /// Check every rule in order
    pub async fn process(&self, rules: &[AlertRule]) -> Result<RunReport, RunError> {
        let mut report = RunReport::default();

        for (index, rule) in rules.iter().enumerate() {
            let outcome = match self.check_rule(index, rule).await {
                Ok(outcome) => outcome,
                Err(e) if self.error_mode == ErrorMode::Continue => {
                    tracing::error!(rule = index, url = %rule.url, error = %e, "Alert rule failed");
                    RuleOutcome::Failed(e.to_string())
                }
                Err(e) => return Err(e),
            };
            report.push(index, rule, outcome);
        }

        Ok(report)
    }

    async fn check_rule(&self, index: usize, rule: &AlertRule) -> Result<RuleOutcome, RunError> {
        let found = self
            .matcher
            .matches(&rule.url, &rule.keyword)
            .await
            .map_err(|source| RunError::Fetch {
                url: rule.url.clone(),
                source,
            })?;

        if !found {
            tracing::debug!(rule = index, url = %rule.url, keyword = %rule.keyword, "Keyword not found");
            return Ok(RuleOutcome::NoMatch);
        }

        tracing::info!(
            rule = index,
            url = %rule.url,
            keyword = %rule.keyword,
            to = %rule.email,
            "Keyword found, sending notification"
        );

        let message = EmailMessage::new(
            rule.email.clone(),
            rule.subject(),
            rule.body(&self.config_source),
        );
        self.mailer
            .send(&message)
            .await
            .map_err(|source| RunError::Notify {
                to: rule.email.clone(),
                source,
            })?;

        Ok(RuleOutcome::Notified)
    }
}

/// Load the rule list named by `settings` and check it against live pages,
/// notifying through Mailgun.
pub async fn run(settings: &Settings) -> Result<RunReport, RunError> {
    let client = reqwest::Client::new();

    let rules = RuleLoader::with_client(client.clone())
        .load(&settings.config_url)
        .await?;

    let matcher = HttpKeywordMatcher::with_client(client.clone())
        .with_require_success(settings.require_success);
    let mailer = MailgunNotifier::new(&settings.mailgun_key, &settings.mailgun_domain)
        .with_client(client)
        .with_api_base(&settings.api_base);

    Runner::new(matcher, mailer, &settings.config_url)
        .with_error_mode(settings.error_mode)
        .process(&rules)
        .await
}

/// Result of checking one rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    NoMatch,
    Notified,
    /// Only recorded in continue mode
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct RuleReport {
    /// Position in the rule document
    pub index: usize,
    pub email: String,
    pub url: String,
    pub keyword: String,
    pub outcome: RuleOutcome,
    pub checked_at: DateTime<Utc>,
}

/// Per-rule outcomes of a pass, in rule order
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub rules: Vec<RuleReport>,
}

impl RunReport {
    fn push(&mut self, index: usize, rule: &AlertRule, outcome: RuleOutcome) {
        self.rules.push(RuleReport {
            index,
            email: rule.email.clone(),
            url: rule.url.clone(),
            keyword: rule.keyword.clone(),
            outcome,
            checked_at: Utc::now(),
        });
    }

    pub fn checked(&self) -> usize {
        self.rules.len()
    }

    pub fn notified(&self) -> usize {
        self.count(|o| *o == RuleOutcome::Notified)
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, RuleOutcome::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&RuleOutcome) -> bool) -> usize {
        self.rules.iter().filter(|r| pred(&r.outcome)).count()
    }

    /// 0 when every rule was checked cleanly, 1 when some failed in continue mode
    pub fn exit_code(&self) -> u8 {
        if self.failed() == 0 {
            0
        } else {
            1
        }
    }
}

/// Errors that abort a pass
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to check {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("Failed to notify {to}: {source}")]
    Notify {
        to: String,
        #[source]
        source: NotifyError,
    },
}

impl RunError {
    /// Process exit code for this failure class
    pub fn exit_code(&self) -> u8 {
        match self {
            RunError::Config(_) => 3,
            RunError::Fetch { .. } => 4,
            RunError::Notify { .. } => 5,
        }
    }
}
