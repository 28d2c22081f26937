//! Keyword alerts for watched web pages
//!
//! Loads the rule list, checks pages for keywords and emails matches through
//! Mailgun.

pub mod checker;
pub mod config;
pub mod loader;
pub mod notifier;

pub use checker::{contains_keyword, FetchError, HttpKeywordMatcher, KeywordMatcher};
pub use config::AlertRule;
pub use loader::{parse_rules, ConfigError, RuleLoader};
pub use notifier::{EmailMessage, MailgunNotifier, Mailer, NotifyError};
