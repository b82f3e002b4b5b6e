//! # Time Utilities

use chrono::{DateTime, Utc};

pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Unix seconds (JWT `exp`) to a UTC timestamp.
pub fn from_unix(secs: i64) -> Result<DateTime<Utc>, Error> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| Error::FailToDateParse(secs.to_string()))
}

// region:    --- Error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    FailToDateParse(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_unix() {
        assert_eq!(from_unix(0).unwrap().to_rfc3339(), "1970-01-01T00:00:00+00:00");
        assert_eq!(from_unix(1_900_000_000).unwrap().timestamp(), 1_900_000_000);
        assert!(from_unix(i64::MAX).is_err());
    }
}
