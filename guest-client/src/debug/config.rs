//! Logging configuration from environment variables

use std::path::PathBuf;

use lib_utils::envs::{get_env_bool_or, get_env_opt};

use crate::core::error::Result;

pub const DEFAULT_LOG_LEVEL: &str = "guest_client=info,warn";
pub const LOG_FILE_PREFIX: &str = "guest-client.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugConfig {
    /// Directory for the daily-rolling log file
    pub log_dir: PathBuf,
    /// Filter used when `RUST_LOG` is unset (e.g. "guest_client=debug,info")
    pub log_level: String,
    /// Mirror log lines to stderr
    pub log_to_stderr: bool,
    /// One JSON object per line in the log file
    pub json: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_to_stderr: false,
            json: false,
        }
    }
}

impl DebugConfig {
    /// Reads `SG_LOG_DIR`, `RUST_LOG`, `SG_LOG_STDERR` and `SG_LOG_JSON`.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            log_dir: get_env_opt("SG_LOG_DIR").map(PathBuf::from).unwrap_or(defaults.log_dir),
            log_level: get_env_opt("RUST_LOG").unwrap_or(defaults.log_level),
            log_to_stderr: get_env_bool_or("SG_LOG_STDERR", defaults.log_to_stderr)?,
            json: get_env_bool_or("SG_LOG_JSON", defaults.json)?,
        })
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join(LOG_FILE_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DebugConfig::default();
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert!(!config.log_to_stderr);
        assert_eq!(config.log_file(), PathBuf::from("logs").join("guest-client.log"));
    }
}
