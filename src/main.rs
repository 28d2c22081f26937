//! Pagewatch
//!
//! Run with: cargo run
//!
//! Environment variables:
//! - MAILGUN_KEY: Mailgun API key (required)
//! - MAILGUN_DOMAIN: Mailgun sending domain (required)
//! - CONFIG_URL: file:// or http(s):// location of the alert rule list (required)
//! - MAILGUN_API_BASE: Mailgun endpoint (default: https://api.mailgun.net)
//! - PAGEWATCH_ERROR_MODE: halt or continue (default: halt)
//! - PAGEWATCH_REQUIRE_SUCCESS: only scan pages served with 2xx (default: false)
//! - RUST_LOG: Log level (default: info)
//!
//! Exit codes: 0 success, 1 rules failed in continue mode, 2 missing or invalid
//! setting, 3 config error, 4 page fetch error, 5 notification error.

use std::process::ExitCode;

use pagewatch::{run, Settings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pagewatch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::from(2);
        }
    };

    tracing::info!("Pagewatch configuration:");
    tracing::info!("  Config source: {}", settings.config_url);
    tracing::info!("  Mail domain: {}", settings.mailgun_domain);
    tracing::info!("  Mail API: {}", settings.api_base);
    tracing::info!("  Error mode: {:?}", settings.error_mode);
    tracing::info!("  Require 2xx pages: {}", settings.require_success);

    match run(&settings).await {
        Ok(report) => {
            tracing::info!(
                checked = report.checked(),
                notified = report.notified(),
                failed = report.failed(),
                "Pass complete"
            );
            ExitCode::from(report.exit_code())
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
