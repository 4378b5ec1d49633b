use std::path::PathBuf;
use std::time::Duration;

use crate::error::RelayError;

/// Review API the relay polls unless `PRACTICUM_ENDPOINT` overrides it.
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Telegram Bot API base URL.
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Credentials the loop cannot start without, checked together.
pub const REQUIRED_VARS: [&str; 3] = ["PRACTICUM_TOKEN", "TELEGRAM_TOKEN", "TELEGRAM_CHAT_ID"];

/// Relay configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// OAuth token for the review API
    pub practicum_token: String,

    /// Telegram bot token
    pub telegram_token: String,

    /// Chat the notifications are delivered to
    pub telegram_chat_id: String,

    /// Review API endpoint
    pub endpoint: String,

    /// Telegram Bot API base URL (overridable for tests and proxies)
    pub telegram_api_url: String,

    /// Fixed sleep between poll cycles in seconds (default: 600)
    pub poll_interval_secs: u64,

    /// File receiving ERROR-level records
    pub error_log_path: PathBuf,

    /// Size at which the error log rolls over (default: 50 MB)
    pub error_log_max_bytes: u64,

    /// Number of rolled-over error logs kept (default: 5)
    pub error_log_backups: usize,
}

impl AppConfig {
    /// Load configuration from environment variables, reading `.env` first if present.
    pub fn from_env() -> Result<Self, RelayError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// Empty values count as missing. All required credentials are checked
    /// before anything else so the error names every absent variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RelayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let missing: Vec<String> = REQUIRED_VARS
            .iter()
            .filter(|key| get(**key).is_none())
            .map(|key| key.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(RelayError::CredentialsMissing(missing));
        }

        let poll_interval_secs = parse_or(&get, "POLL_INTERVAL_SECS", 600u64)?;
        if poll_interval_secs == 0 {
            return Err(RelayError::InvalidConfig {
                var: "POLL_INTERVAL_SECS",
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            practicum_token: get("PRACTICUM_TOKEN").unwrap_or_default(),
            telegram_token: get("TELEGRAM_TOKEN").unwrap_or_default(),
            telegram_chat_id: get("TELEGRAM_CHAT_ID").unwrap_or_default(),
            endpoint: get("PRACTICUM_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            telegram_api_url: get("TELEGRAM_API_URL")
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
            poll_interval_secs,
            error_log_path: get("ERROR_LOG_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(crate::logging::DEFAULT_ERROR_LOG)),
            error_log_max_bytes: parse_or(&get, "ERROR_LOG_MAX_BYTES", 50_000_000u64)?,
            error_log_backups: parse_or(&get, "ERROR_LOG_BACKUPS", 5usize)?,
        })
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

fn parse_or<G, T>(get: &G, var: &'static str, default: T) -> Result<T, RelayError>
where
    G: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match get(var) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| RelayError::InvalidConfig {
                var,
                reason: e.to_string(),
            }),
        None => Ok(default),
    }
}
