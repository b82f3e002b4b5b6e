//! # Logging
//!
//! Structured `tracing` output to a daily-rolling file, optionally mirrored
//! to stderr.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use guest_client::debug::{init_logger, DebugConfig};
//!
//! let config = DebugConfig::from_env().unwrap_or_default();
//! let _guard = init_logger(&config);
//!
//! tracing::info!(path = "/assignments/my", duration_ms = 84, "Request succeeded");
//! ```
//!
//! ## Configuration
//!
//! - `RUST_LOG`: filter (e.g. `guest_client=debug,info`)
//! - `SG_LOG_DIR`: log directory (default `logs`)
//! - `SG_LOG_STDERR`: mirror to stderr (`1`/`0`)
//! - `SG_LOG_JSON`: JSON lines in the file (`1`/`0`)

pub mod config;
pub mod logger;

pub use config::DebugConfig;
pub use logger::init as init_logger;
