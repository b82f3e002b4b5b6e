//! # Core Abstractions
//!
//! Error types and the traits the rest of the crate is wired through.
//!
//! ## Modules
//!
//! - **[`error`]**: `ApiError` for backend calls, `AppError` + `Result<T>` for the application
//! - **[`service`]**: `Transport`, `TokenStore`, `ApiService`
//!
//! ## Dependency Injection
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use guest_client::core::service::Transport;
//! use guest_client::services::api::transport::ReqwestTransport;
//! use std::time::Duration;
//!
//! // In production: reqwest
//! let transport: Arc<dyn Transport> = Arc::new(ReqwestTransport::new(Duration::from_secs(10)).unwrap());
//! ```

pub mod error;
pub mod service;

pub use error::{ApiError, AppError, Result};
pub use service::{ApiService, TokenStore, Transport};
