//! Agent configuration
//!
//! Settings are read once at startup from command-line flags, each of which
//! falls back to an environment variable (a `.env` file is loaded into the
//! environment before parsing). The resulting [`Config`] is immutable and is
//! passed by reference to whatever needs it.

use clap::Parser;
use std::fmt;
use std::time::Duration;

/// Review-status endpoint used when none is configured
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Bot API base URL used when none is configured
pub const DEFAULT_BOT_API_URL: &str = "https://api.telegram.org";

/// Environment variable names of the required secrets
pub const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

/// Command-line surface of the agent
#[derive(Debug, Parser)]
#[command(name = "statuswatch")]
#[command(about = "Polls the review service and forwards status changes to a chat", long_about = None)]
pub struct Cli {
    /// OAuth token for the review service
    #[arg(long, env = PRACTICUM_TOKEN, hide_env_values = true)]
    pub practicum_token: Option<String>,

    /// Bot API token used to deliver notifications
    #[arg(long, env = TELEGRAM_TOKEN, hide_env_values = true)]
    pub telegram_token: Option<String>,

    /// Chat or channel that receives notifications
    #[arg(long, env = TELEGRAM_CHAT_ID)]
    pub telegram_chat_id: Option<String>,

    /// Seconds between polls; also the retry delay after a failure
    #[arg(long, env = "POLL_INTERVAL_SECS", default_value_t = 600)]
    pub poll_interval_secs: u64,

    /// Review-status endpoint
    #[arg(long, env = "PRACTICUM_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Bot API base URL
    #[arg(long, env = "TELEGRAM_API_URL", default_value = DEFAULT_BOT_API_URL)]
    pub telegram_api_url: String,

    /// Per-request HTTP timeout in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Unix timestamp to start polling from instead of the current time
    #[arg(long, env = "START_CURSOR")]
    pub start_cursor: Option<i64>,

    /// Also send transient failures to the notification chat
    #[arg(long, env = "REPORT_FAILURES")]
    pub report_failures: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Run a single poll iteration and exit
    #[arg(long)]
    pub once: bool,
}

/// Agent configuration
///
/// Secrets that were not supplied are kept as empty strings here; the
/// bootstrap check refuses to start the loop until they are present.
#[derive(Clone)]
pub struct Config {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,

    /// Review-status endpoint URL
    pub endpoint: String,

    /// Bot API base URL
    pub telegram_api_url: String,

    /// Fixed delay between iterations
    pub poll_interval: Duration,

    /// Timeout applied to each HTTP request
    pub request_timeout: Duration,

    /// Initial cursor; `None` means "now"
    pub start_cursor: Option<i64>,

    /// Forward transient failures to the chat
    pub report_failures: bool,
}

impl Config {
    /// Builds the configuration from parsed command-line arguments
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            practicum_token: cli.practicum_token.clone().unwrap_or_default(),
            telegram_token: cli.telegram_token.clone().unwrap_or_default(),
            telegram_chat_id: cli.telegram_chat_id.clone().unwrap_or_default(),
            endpoint: cli.endpoint.clone(),
            telegram_api_url: cli.telegram_api_url.clone(),
            poll_interval: Duration::from_secs(cli.poll_interval_secs),
            request_timeout: Duration::from_secs(cli.request_timeout_secs),
            start_cursor: cli.start_cursor,
            report_failures: cli.report_failures,
        }
    }

    /// Names of the required secrets that are missing or blank
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        [
            (PRACTICUM_TOKEN, &self.practicum_token),
            (TELEGRAM_TOKEN, &self.telegram_token),
            (TELEGRAM_CHAT_ID, &self.telegram_chat_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Validates the tunable settings
    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, url) in [
            ("endpoint", &self.endpoint),
            ("telegram_api_url", &self.telegram_api_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("{} must start with http:// or https://", name);
            }
        }

        if self.poll_interval.as_secs() == 0 {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.request_timeout.as_secs() == 0 {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        if let Some(cursor) = self.start_cursor {
            if cursor < 0 {
                anyhow::bail!("start_cursor cannot be negative");
            }
        }

        Ok(())
    }
}

// Secrets stay out of Debug output, which ends up in logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("practicum_token", &redact(&self.practicum_token))
            .field("telegram_token", &redact(&self.telegram_token))
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("endpoint", &self.endpoint)
            .field("telegram_api_url", &self.telegram_api_url)
            .field("poll_interval", &self.poll_interval)
            .field("request_timeout", &self.request_timeout)
            .field("start_cursor", &self.start_cursor)
            .field("report_failures", &self.report_failures)
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() { "<unset>" } else { "<redacted>" }
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        practicum_token: "practicum".to_string(),
        telegram_token: "telegram".to_string(),
        telegram_chat_id: "42".to_string(),
        endpoint: DEFAULT_ENDPOINT.to_string(),
        telegram_api_url: DEFAULT_BOT_API_URL.to_string(),
        poll_interval: Duration::from_secs(600),
        request_timeout: Duration::from_secs(30),
        start_cursor: Some(0),
        report_failures: false,
    }
}
