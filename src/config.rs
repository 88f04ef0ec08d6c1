use std::env;
use std::time::Duration;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub log_level: String,
    pub event_buffer_size: usize,
    pub store_timeout: Duration,
    pub notify_timeout: Duration,
    /// Bearer token granting the operator role. Unset disables the status override.
    pub operator_token: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            http_port: parse_or_default("HTTP_PORT", 3000)?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            event_buffer_size: parse_or_default("EVENT_BUFFER_SIZE", 1024)?,
            store_timeout: millis_or_default("STORE_TIMEOUT_MS", 2000)?,
            notify_timeout: millis_or_default("NOTIFY_TIMEOUT_MS", 1000)?,
            operator_token: env::var("OPERATOR_TOKEN")
                .ok()
                .map(|token| token.trim().to_string())
                .filter(|token| !token.is_empty()),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: 3000,
            log_level: "info".to_string(),
            event_buffer_size: 1024,
            store_timeout: Duration::from_millis(2000),
            notify_timeout: Duration::from_millis(1000),
            operator_token: None,
        }
    }
}

fn parse_or_default<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|err| AppError::Internal(format!("invalid {key}: {err}")))
}

fn millis_or_default(key: &str, default: u64) -> Result<Duration, AppError> {
    let millis: u64 = parse_or_default(key, default)?;
    positive_millis(key, millis)
}

fn positive_millis(key: &str, millis: u64) -> Result<Duration, AppError> {
    if millis == 0 {
        return Err(AppError::Internal(format!("{key} must be > 0")));
    }
    Ok(Duration::from_millis(millis))
}
