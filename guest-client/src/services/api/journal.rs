//! # Journal
//!
//! The reporter's history of past stays.

use shared::{JournalResponse, Page};

use super::client::{with_query, ApiClient};
use crate::core::error::ApiError;

#[tracing::instrument(skip(client))]
pub async fn my_history(client: &ApiClient, page: Page) -> Result<JournalResponse, ApiError> {
    let params = [("page", page.page.to_string()), ("limit", page.limit.to_string())];
    client.get(&with_query("/journal/my", &params), true).await
}
