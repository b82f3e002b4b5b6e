//! # Shared Data Transfer Objects Library
//!
//! The contract between the Secret Guest backend and its clients.
//! All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::assignments`]**: Offer/accept/decline lifecycle
//!   - **[`dto::reports`]**: Reports and the embedded checklist schema
//!   - **[`dto::checklist`]**: Section/item editor payloads
//! - **[`utils`]**: Display helpers
//!   - **[`utils::format_price`]**: Money with thousands separators
//!   - **[`utils::truncate_id`]**: Shorten UUIDs for tables
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::assignments::AssignmentState;
//!
//! let state = AssignmentState::from_slug("offered").unwrap();
//! assert_eq!(state.id(), 1);
//! ```

pub mod dto;
pub mod utils;

// Wildcard re-exports: shared is a DTO library, everything is public API
pub use dto::*;
pub use utils::*;
