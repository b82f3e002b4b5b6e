//! # Backend API Client Module
//!
//! Typed access to the Secret Guest REST API. Every endpoint is a free
//! function taking `&ApiClient`; the client owns the bearer/refresh contract.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs            - Module exports and documentation
//! ├── client.rs         - ApiClient, body decoding, 401 refresh-and-replay
//! ├── transport.rs      - Request/response values, reqwest transport
//! ├── retry.rs          - Exponential backoff for idempotent calls
//! ├── auth.rs           - Register, login, validate, refresh, logout
//! ├── assignments.rs    - Offers, the open pool, staff assignment views
//! ├── reports.rs        - Drafts, submission, staff review
//! ├── checklist.rs      - Sections and items, duplication, reordering
//! ├── answer_types.rs   - Answer types and media requirements
//! ├── listings.rs       - Listings and listing types
//! ├── users.rs          - Users and profiles
//! ├── reservations.rs   - OTA reservations
//! ├── journal.rs        - Reporter history
//! ├── uploads.rs        - Presigned media uploads
//! └── statistics.rs     - Admin counters
//! ```

pub mod answer_types;
pub mod assignments;
pub mod auth;
pub mod checklist;
pub mod client;
pub mod journal;
pub mod listings;
pub mod reports;
pub mod reservations;
pub mod retry;
pub mod statistics;
pub mod transport;
pub mod uploads;
pub mod users;

pub use assignments::{ActionOutcome, StaffAssignmentsQuery};
pub use client::{with_query, ApiClient};
pub use retry::{with_retry, RetryPolicy};
pub use transport::{FormPart, HttpRequest, HttpResponse, Method, RequestBody, ReqwestTransport};
pub use uploads::MediaFile;
