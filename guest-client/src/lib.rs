//! # Secret Guest Client - Library Root
//!
//! Typed client for the Secret Guest backend: reporters take and accept
//! inspection assignments, fill in checklist reports and submit them; staff
//! review reports and maintain the checklist catalogue.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │              guest-client (this crate)                   │
//! ├──────────────────────────────────────────────────────────┤
//! │  services::api     - Endpoint functions over ApiClient   │
//! │  services::session - Token pair + persistence            │
//! │  services::*       - Mutation queue, draft autosave      │
//! │  checklist         - Progress, answers, reordering       │
//! │  core              - Errors and injection traits         │
//! │  config / debug    - Environment config, tracing setup   │
//! └──────────────────────────────────────────────────────────┘
//!          │ HTTP (reqwest)
//!          ▼
//! ┌─────────────────┐
//! │  Backend API    │
//! └─────────────────┘
//! ```
//!
//! ## Authentication
//!
//! The [`Session`](services::session::Session) holds the access/refresh
//! pair and is injected into the [`ApiClient`](services::api::ApiClient).
//! A 401 triggers one refresh shared by every request in flight, then the
//! request is replayed once.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use guest_client::config::ClientConfig;
//! use guest_client::services::api::{self, ApiClient};
//! use guest_client::services::session::Session;
//! use shared::Page;
//!
//! # async fn run() -> guest_client::core::Result<()> {
//! let config = ClientConfig::from_env()?;
//! let client = ApiClient::new(&config, Arc::new(Session::in_memory()))?;
//! api::auth::login(&client, "guest", "secret").await?;
//! let offers = api::assignments::my_assignments(&client, Page::default(), None).await?;
//! println!("{} assignments", offers.total);
//! # Ok(())
//! # }
//! ```

pub mod checklist;
pub mod config;
pub mod core;
pub mod debug;
pub mod services;
pub mod utils;
