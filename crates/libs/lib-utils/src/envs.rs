//! # Environment Variables
//!
//! Typed lookups used by the client configuration. Unset or blank variables
//! fall back to defaults; set but malformed ones are errors.

use std::env;
use std::str::FromStr;

/// Value of `name` if set and not blank.
pub fn get_env_opt(name: &'static str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

pub fn get_env_parse_or<T: FromStr>(name: &'static str, default: T) -> Result<T, Error> {
    match get_env_opt(name) {
        Some(val) => val.trim().parse::<T>().map_err(|_| Error::WrongFormat(name)),
        None => Ok(default),
    }
}

/// Accepts `1/0`, `true/false`, `yes/no`, `on/off` in any case.
pub fn get_env_bool_or(name: &'static str, default: bool) -> Result<bool, Error> {
    let Some(val) = get_env_opt(name) else {
        return Ok(default);
    };
    match val.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::WrongFormat(name)),
    }
}

// region:    --- Error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    WrongFormat(&'static str),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::WrongFormat(name) => write!(fmt, "environment variable {name} has an invalid value"),
        }
    }
}

impl std::error::Error for Error {}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own variable names; the process environment is shared.

    #[test]
    fn test_parse_or_default_when_unset() {
        assert_eq!(get_env_parse_or("LIB_UTILS_TEST_UNSET_NUM", 10u64), Ok(10));
        assert_eq!(get_env_bool_or("LIB_UTILS_TEST_UNSET_BOOL", true), Ok(true));
    }

    #[test]
    fn test_parse_or_reads_value() {
        env::set_var("LIB_UTILS_TEST_NUM", " 25 ");
        env::set_var("LIB_UTILS_TEST_BOOL", "Off");
        env::set_var("LIB_UTILS_TEST_BAD", "ten");
        assert_eq!(get_env_parse_or("LIB_UTILS_TEST_NUM", 10u64), Ok(25));
        assert_eq!(get_env_bool_or("LIB_UTILS_TEST_BOOL", true), Ok(false));
        assert_eq!(
            get_env_parse_or("LIB_UTILS_TEST_BAD", 1u32),
            Err(Error::WrongFormat("LIB_UTILS_TEST_BAD"))
        );
    }

    #[test]
    fn test_blank_counts_as_unset() {
        env::set_var("LIB_UTILS_TEST_BLANK", "   ");
        assert_eq!(get_env_opt("LIB_UTILS_TEST_BLANK"), None);
        assert_eq!(get_env_parse_or("LIB_UTILS_TEST_BLANK", 3u8), Ok(3));
    }
}
