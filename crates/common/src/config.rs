use std::time::Duration;

use crate::error::AppError;

pub const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
const DEFAULT_RETRY_PERIOD_SECS: &str = "600";
const DEFAULT_REQUEST_TIMEOUT_SECS: &str = "10";

/// The three secrets the bot cannot run without.
///
/// Empty strings count as missing.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub practicum_token: Option<String>,
    pub telegram_token: Option<String>,
    pub telegram_chat_id: Option<String>,
}

impl Credentials {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            practicum_token: get(PRACTICUM_TOKEN),
            telegram_token: get(TELEGRAM_TOKEN),
            telegram_chat_id: get(TELEGRAM_CHAT_ID),
        }
    }

    /// Env keys whose values are absent, in declaration order.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (PRACTICUM_TOKEN, &self.practicum_token),
            (TELEGRAM_TOKEN, &self.telegram_token),
            (TELEGRAM_CHAT_ID, &self.telegram_chat_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(key, _)| key)
        .collect()
    }

    /// Check that every credential is present.
    ///
    /// All keys are inspected before returning, so each missing one gets its
    /// own log line.
    pub fn check_tokens(&self) -> bool {
        let missing = self.missing();
        for key in &missing {
            tracing::error!(key, "Required environment variable is missing");
        }
        if missing.is_empty() {
            tracing::info!("All required tokens found");
        }
        missing.is_empty()
    }
}

/// Immutable bot configuration, built once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// OAuth token for the homework API
    pub practicum_token: String,

    /// Telegram bot token
    pub telegram_token: String,

    /// Chat that receives notifications
    pub telegram_chat_id: String,

    /// Homework statuses endpoint
    pub endpoint: String,

    /// Base URL of the Telegram Bot API
    pub telegram_api_url: String,

    /// Pause between poll cycles (default: 600s)
    pub retry_period: Duration,

    /// Timeout applied to every outbound HTTP request (default: 10s)
    pub request_timeout: Duration,
}

impl AppConfig {
    /// Load configuration from environment variables (and `.env`, if present).
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let credentials = Credentials::from_lookup(&lookup);
        let missing = credentials.missing();
        let (true, Some(practicum_token), Some(telegram_token), Some(telegram_chat_id)) = (
            credentials.check_tokens(),
            credentials.practicum_token,
            credentials.telegram_token,
            credentials.telegram_chat_id,
        ) else {
            return Err(AppError::Config(format!(
                "missing required environment variables: {}",
                missing.join(", ")
            )));
        };

        Ok(Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
            endpoint: lookup("PRACTICUM_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            telegram_api_url: lookup("TELEGRAM_API_URL")
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
            retry_period: Duration::from_secs(parse_secs(
                &lookup,
                "RETRY_PERIOD_SECS",
                DEFAULT_RETRY_PERIOD_SECS,
            )?),
            request_timeout: Duration::from_secs(parse_secs(
                &lookup,
                "REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?),
        })
    }
}

fn parse_secs(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<u64, AppError> {
    lookup(key)
        .unwrap_or_else(|| default.to_string())
        .parse()
        .map_err(|_| AppError::Config(format!("{key} must be a valid u64")))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    const ALL: [(&str, &str); 3] = [
        (PRACTICUM_TOKEN, "practicum"),
        (TELEGRAM_TOKEN, "123:abc"),
        (TELEGRAM_CHAT_ID, "42"),
    ];

    #[test]
    fn test_all_tokens_present() {
        let creds = Credentials::from_lookup(lookup(&ALL));
        assert!(creds.check_tokens());
        assert!(creds.missing().is_empty());
    }

    #[test]
    fn test_every_missing_subset_fails() {
        for mask in 1u8..8 {
            let present: Vec<(&str, &str)> = ALL
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1u8 << *i) == 0)
                .map(|(_, pair)| *pair)
                .collect();
            let creds = Credentials::from_lookup(lookup(&present));
            assert!(!creds.check_tokens(), "mask {mask:03b} should fail");
            assert_eq!(creds.missing().len(), mask.count_ones() as usize);
            assert!(AppConfig::from_lookup(lookup(&present)).is_err());
        }
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let creds = Credentials::from_lookup(lookup(&[
            (PRACTICUM_TOKEN, ""),
            (TELEGRAM_TOKEN, "   "),
            (TELEGRAM_CHAT_ID, "42"),
        ]));
        assert_eq!(creds.missing(), vec![PRACTICUM_TOKEN, TELEGRAM_TOKEN]);
    }

    #[test]
    fn test_config_error_names_missing_keys() {
        let err = AppConfig::from_lookup(lookup(&[(TELEGRAM_TOKEN, "t")])).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains(PRACTICUM_TOKEN));
        assert!(msg.contains(TELEGRAM_CHAT_ID));
        assert!(!msg.contains(TELEGRAM_TOKEN));
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&ALL)).unwrap();
        assert_eq!(config.practicum_token, "practicum");
        assert_eq!(config.telegram_chat_id, "42");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.telegram_api_url, DEFAULT_TELEGRAM_API_URL);
        assert_eq!(config.retry_period, Duration::from_secs(600));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_overrides_and_invalid_numbers() {
        let mut pairs = ALL.to_vec();
        pairs.push(("RETRY_PERIOD_SECS", "30"));
        pairs.push(("PRACTICUM_ENDPOINT", "http://localhost:8080/statuses/"));
        let config = AppConfig::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(config.retry_period, Duration::from_secs(30));
        assert_eq!(config.endpoint, "http://localhost:8080/statuses/");

        pairs.push(("REQUEST_TIMEOUT_SECS", "soon"));
        let err = AppConfig::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(err.to_string().contains("REQUEST_TIMEOUT_SECS"));
    }
}
