//! # Data Transfer Objects (DTOs)
//!
//! Wire types for the Secret Guest REST API.
//!
//! ## Module Organization
//!
//! - [`auth`] - Registration, token issue/refresh/validate
//! - [`common`] - Status catalogue entries, pricing, pagination
//! - [`assignments`] - Inspection assignments and their lifecycle
//! - [`reports`] - Reports, checklist schemas and answers
//! - [`checklist`] - Staff checklist editor: sections and items
//! - [`listings`] - Listings and listing types
//! - [`users`] - Users and reporter profiles
//! - [`reservations`] - OTA reservations (staff)
//! - [`journal`] - Reporter stay history
//! - [`uploads`] - Presigned media uploads
//! - [`statistics`] - Admin counters
//!
//! ## Serialization Format
//!
//! - **Field naming**: snake_case, except where the backend answers otherwise
//!   (`BookingNumber`, `filePath`, `mainPicture`)
//! - **Optional fields**: Omitted when `None`
//! - **Unknown schema keys**: preserved through `#[serde(flatten)]` so that a
//!   checklist schema survives a read-modify-write cycle intact

pub mod assignments;
pub mod auth;
pub mod checklist;
pub mod common;
pub mod journal;
pub mod listings;
pub mod reports;
pub mod reservations;
pub mod statistics;
pub mod uploads;
pub mod users;

pub use assignments::*;
pub use auth::*;
pub use checklist::*;
pub use common::*;
pub use journal::*;
pub use listings::*;
pub use reports::*;
pub use reservations::*;
pub use statistics::*;
pub use uploads::*;
pub use users::*;
