//! # Service Traits
//!
//! Seams for dependency injection. Production code plugs in reqwest, a JSON
//! session file and the real [`ApiClient`](crate::services::api::ApiClient);
//! tests plug in scripted fakes.

use async_trait::async_trait;
use shared::{ChecklistItem, ChecklistSchema, ChecklistSection, Report, UpdateItemRequest, UpdateSectionRequest};

use crate::core::error::{ApiError, Result};
use crate::services::api::transport::{HttpRequest, HttpResponse};
use crate::services::session::SessionTokens;

/// Moves one HTTP exchange over the wire.
///
/// Implementations return `Ok` for every response that arrived, whatever
/// its status, and [`ApiError::Network`] when none did.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> std::result::Result<HttpResponse, ApiError>;
}

/// Persistence for the token pair across process restarts.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<SessionTokens>;

    fn save(&self, tokens: &SessionTokens) -> Result<()>;

    fn clear(&self) -> Result<()>;
}

/// The backend writes issued by background workers.
///
/// [`MutationQueue`](crate::services::mutation_queue::MutationQueue) and
/// [`DraftAutosaver`](crate::services::autosave::DraftAutosaver) only see
/// this trait.
#[async_trait]
pub trait ApiService: Send + Sync {
    async fn update_item(&self, id: i64, request: UpdateItemRequest) -> std::result::Result<ChecklistItem, ApiError>;

    async fn update_section(
        &self,
        id: i64,
        request: UpdateSectionRequest,
    ) -> std::result::Result<ChecklistSection, ApiError>;

    async fn save_draft(&self, report_id: &str, schema: ChecklistSchema) -> std::result::Result<Report, ApiError>;
}
