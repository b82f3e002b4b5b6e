//! # Utility Functions
//!
//! - **[`validation`]**: form validation with the product's messages
//!
//! ## Related Modules
//!
//! - [`shared::utils`]: display formatting (prices, ids)
//! - [`lib_utils`]: env and time helpers

pub mod validation;
