//! # Services Module
//!
//! Everything that talks to the backend or runs in the background.
//!
//! ```text
//! services/
//! ├── api/              - Endpoint functions over ApiClient
//! ├── session.rs        - Token pair, persistence, role from claims
//! ├── mutation_queue.rs - Serialized reorder writes with retries
//! └── autosave.rs       - Debounced report draft saving
//! ```
//!
//! ## Service Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  MutationQueue        DraftAutosaver                     │
//! │       │                     │                            │
//! │       └────── Arc<dyn ApiService> ──────┐                │
//! │                                         ▼                │
//! │                     ApiClient ──► Arc<dyn Transport>     │
//! │                         │                                │
//! │                   Arc<Session> ──► Arc<dyn TokenStore>   │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod api;
pub mod autosave;
pub mod mutation_queue;
pub mod session;

pub use api::ApiClient;
pub use autosave::{AutosaveStatus, DraftAutosaver};
pub use mutation_queue::{MutationQueue, QueueEvent, QueueStatus};
pub use session::{FileTokenStore, MemoryTokenStore, Session, SessionTokens};
