//! # Client Configuration
//!
//! | Variable               | Default                                |
//! |------------------------|----------------------------------------|
//! | `SG_API_URL`           | `http://localhost:8000`                |
//! | `SG_HTTP_TIMEOUT_SECS` | `10`                                   |
//! | `SG_TOKEN_FILE`        | `<data dir>/secret-guest/session.json` |
//! | `SG_AUTOSAVE_DELAY_MS` | `1000`                                 |
//! | `SG_QUEUE_MAX_RETRIES` | `3`                                    |
//!
//! Logging has its own variables, see [`crate::debug::DebugConfig`].

use std::path::PathBuf;
use std::time::Duration;

use lib_utils::envs::{get_env_opt, get_env_parse_or};

use crate::core::error::{AppError, Result};
use crate::services::session::FileTokenStore;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    pub http_timeout: Duration,
    /// `None` keeps the session in memory only
    pub token_file: Option<PathBuf>,
    pub autosave_delay: Duration,
    pub queue_max_retries: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            http_timeout: Duration::from_secs(10),
            token_file: None,
            autosave_delay: Duration::from_millis(1000),
            queue_max_retries: 3,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let api_url = get_env_opt("SG_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_url);

        let http_timeout = Duration::from_secs(get_env_parse_or("SG_HTTP_TIMEOUT_SECS", 10u64)?);

        let token_file = get_env_opt("SG_TOKEN_FILE")
            .map(PathBuf::from)
            .or_else(FileTokenStore::default_path);

        let autosave_delay = Duration::from_millis(get_env_parse_or("SG_AUTOSAVE_DELAY_MS", 1000u64)?);

        let queue_max_retries = get_env_parse_or("SG_QUEUE_MAX_RETRIES", defaults.queue_max_retries)?;

        Ok(Self {
            api_url,
            http_timeout,
            token_file,
            autosave_delay,
            queue_max_retries,
        })
    }

    pub fn validate(&self) -> Result<()> {
        lib_utils::validate_http_url(&self.api_url, "SG_API_URL").map_err(AppError::Config)?;

        if self.http_timeout.is_zero() || self.http_timeout > Duration::from_secs(300) {
            return Err(AppError::Config(
                "SG_HTTP_TIMEOUT_SECS must be between 1 and 300".to_string(),
            ));
        }

        if self.autosave_delay > Duration::from_secs(60) {
            return Err(AppError::Config(
                "SG_AUTOSAVE_DELAY_MS must not exceed 60000".to_string(),
            ));
        }

        if self.queue_max_retries > 10 {
            return Err(AppError::Config("SG_QUEUE_MAX_RETRIES must not exceed 10".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.api_url, "http://localhost:8000");
        assert_eq!(config.autosave_delay, Duration::from_millis(1000));
    }

    #[test]
    fn test_queue_config_takes_retry_limit() {
        let config = ClientConfig {
            queue_max_retries: 5,
            ..Default::default()
        };
        let queue = crate::services::mutation_queue::QueueConfig::from(&config);
        assert_eq!(queue.max_retries, 5);
        assert_eq!(queue.retry_delay, Duration::from_millis(500));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad_url = ClientConfig {
            api_url: "localhost:8000".into(),
            ..Default::default()
        };
        assert!(matches!(bad_url.validate(), Err(AppError::Config(_))));

        let zero_timeout = ClientConfig {
            http_timeout: Duration::ZERO,
            ..Default::default()
        };
        assert!(zero_timeout.validate().is_err());

        let many_retries = ClientConfig {
            queue_max_retries: 50,
            ..Default::default()
        };
        assert!(many_retries.validate().is_err());
    }
}
