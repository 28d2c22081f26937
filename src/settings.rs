//! Process settings read once from the environment
//!
//! Required:
//! - `MAILGUN_KEY`: Mailgun API key
//! - `MAILGUN_DOMAIN`: Mailgun sending domain, also used for the `from` address
//! - `CONFIG_URL`: `file://` or `http(s)://` location of the alert rule list
//!
//! Optional:
//! - `MAILGUN_API_BASE`: API endpoint (default: https://api.mailgun.net)
//! - `PAGEWATCH_ERROR_MODE`: `halt` or `continue` (default: halt)
//! - `PAGEWATCH_REQUIRE_SUCCESS`: only scan pages served with 2xx (default: false)

use std::str::FromStr;

use crate::alerts::notifier::MAILGUN_API_BASE;

pub const MAILGUN_KEY: &str = "MAILGUN_KEY";
pub const MAILGUN_DOMAIN: &str = "MAILGUN_DOMAIN";
pub const CONFIG_URL: &str = "CONFIG_URL";
pub const MAILGUN_API_BASE_VAR: &str = "MAILGUN_API_BASE";
pub const ERROR_MODE: &str = "PAGEWATCH_ERROR_MODE";
pub const REQUIRE_SUCCESS: &str = "PAGEWATCH_REQUIRE_SUCCESS";

/// What the runner does when a rule fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorMode {
    /// Stop at the first failing rule
    #[default]
    Halt,
    /// Record the failure and move on to the next rule
    Continue,
}

impl FromStr for ErrorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "halt" => Ok(ErrorMode::Halt),
            "continue" => Ok(ErrorMode::Continue),
            other => Err(format!("expected 'halt' or 'continue', got '{}'", other)),
        }
    }
}

/// Settings for one run
#[derive(Debug, Clone)]
pub struct Settings {
    pub mailgun_key: String,
    pub mailgun_domain: String,
    pub config_url: String,
    pub api_base: String,
    pub error_mode: ErrorMode,
    pub require_success: bool,
}

impl Settings {
    /// Read settings from the process environment
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through `lookup`. Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let required = |name: &'static str| get(name).ok_or(SettingsError::Missing(name));

        let mailgun_key = required(MAILGUN_KEY)?;
        let mailgun_domain = required(MAILGUN_DOMAIN)?;
        let config_url = required(CONFIG_URL)?;

        let api_base = get(MAILGUN_API_BASE_VAR).unwrap_or_else(|| MAILGUN_API_BASE.to_string());

        let error_mode = match get(ERROR_MODE) {
            Some(value) => value.parse::<ErrorMode>().map_err(|reason| SettingsError::Invalid {
                name: ERROR_MODE,
                reason,
            })?,
            None => ErrorMode::default(),
        };

        let require_success = get(REQUIRE_SUCCESS)
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            mailgun_key,
            mailgun_domain,
            config_url,
            api_base,
            error_mode,
            require_success,
        })
    }
}

/// Settings errors
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Missing {0} environment variable.")]
    Missing(&'static str),

    #[error("Invalid {name} environment variable: {reason}")]
    Invalid { name: &'static str, reason: String },
}
