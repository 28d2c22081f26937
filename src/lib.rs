//! Pagewatch: Keyword Alerts for Web Pages
//!
//! A single-pass batch job that loads a list of alert rules, fetches each
//! watched page once and emails the rule's address through Mailgun when the
//! page contains the rule's keyword.
//!
//! # Pipeline
//!
//! - **Rule loading**: JSON rule list from a `file://` path or an HTTP(S) URL
//! - **Keyword matching**: case-insensitive substring search over the raw page body
//! - **Notification**: form-encoded POST to the Mailgun messages API
//! - **Runner**: sequential pass, halting on the first failure by default
//!
//! # Example
//!
//! ```no_run
//! use pagewatch::runner::run;
//! use pagewatch::settings::Settings;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = Settings::from_env()?;
//! let report = run(&settings).await?;
//! println!("Notified {} of {} rules", report.notified(), report.checked());
//! # Ok(())
//! # }
//! ```

pub mod alerts;
pub mod runner;
pub mod settings;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use alerts::{AlertRule, ConfigError, FetchError, NotifyError};
pub use runner::{run, RunError, RunReport, Runner};
pub use settings::{ErrorMode, Settings, SettingsError};
