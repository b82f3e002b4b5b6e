//! # Utilities Library
//!
//! Small helpers shared by the client crates: typed environment lookups with
//! defaults, timestamps and input validation.

pub mod envs;
pub mod time;
pub mod validation;

pub use envs::{get_env_bool_or, get_env_opt, get_env_parse_or};
pub use time::{from_unix, now_utc};
pub use validation::{validate_email, validate_http_url, validate_min_length, validate_uuid};
