//! # Authentication Library
//!
//! Client-side view of the access token: the claims the backend signs into
//! it and the role catalogue. The client never holds the signing secret, so
//! claims are read without verification and only used for display and
//! routing decisions. The server stays the authority.

pub mod role;
pub mod token;

pub use role::Role;
pub use token::{decode_claims, Claims, Error};
